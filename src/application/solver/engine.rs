// 探索エンジン - 盤面状態グラフ上の最良優先探索

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};
use std::time::Instant;

use crate::application::progress::ProgressManager;
use crate::domain::collapse::collapse;
use crate::domain::grid::Grid;
use crate::domain::group::find_collapsible_groups;
use crate::domain::search::{Move, SearchOutcome, SearchSummary, SolverConfig};
use crate::vlog;

/// 盤面から1手で到達できるすべての盤面
///
/// 消去可能なグループごとに、代表セル・消去数・消去後の盤面を返す。
pub fn successors(grid: &Grid) -> Vec<Move> {
    find_collapsible_groups(grid)
        .into_iter()
        .map(|group| Move {
            coord: group.anchor(),
            removed: group.len(),
            result: collapse(&group, grid),
        })
        .collect()
}

/// 探索木のノード（親へのリンクで手順を復元する）
struct Node {
    parent: Option<usize>,
    mv: Move,
    total_removed: usize,
}

/// 優先度キューの要素：累計消去数の多い順、同点は先に積んだ順
#[derive(PartialEq, Eq)]
struct Frontier {
    total_removed: usize,
    seq: u64,
    node: usize,
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.total_removed
            .cmp(&other.total_removed)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// 探索本体
struct Search<'a> {
    config: &'a SolverConfig,
    progress: &'a ProgressManager,
    nodes: Vec<Node>,
    heap: BinaryHeap<Frontier>,
    visited: HashSet<Grid>,
    seq: u64,
    enqueued: u64,
}

impl<'a> Search<'a> {
    fn new(root: &Grid, config: &'a SolverConfig, progress: &'a ProgressManager) -> Self {
        let mut visited = HashSet::new();
        visited.insert(root.clone());
        Self {
            config,
            progress,
            nodes: Vec::new(),
            heap: BinaryHeap::new(),
            visited,
            seq: 0,
            enqueued: 0,
        }
    }

    /// 未訪問の子を積む
    fn push_children(&mut self, parent: Option<usize>, grid: &Grid, base_removed: usize) {
        for mv in successors(grid) {
            if !self.visited.insert(mv.result.clone()) {
                continue;
            }
            let total_removed = base_removed + mv.removed;
            self.nodes.push(Node {
                parent,
                mv,
                total_removed,
            });
            self.heap.push(Frontier {
                total_removed,
                seq: self.seq,
                node: self.nodes.len() - 1,
            });
            self.seq += 1;
            self.enqueued += 1;
        }
    }

    /// ルートから `node` までの手順
    fn path_to(&self, node: usize) -> Vec<Move> {
        let mut path = Vec::new();
        let mut cursor = Some(node);
        while let Some(i) = cursor {
            path.push(self.nodes[i].mv.clone());
            cursor = self.nodes[i].parent;
        }
        path.reverse();
        path
    }

    fn limit_reached(&self, expansions: u64) -> bool {
        self.config
            .expansion_limit
            .is_some_and(|limit| expansions >= limit.get())
    }
}

/// 盤面を全消しする手順を最良優先で探す
///
/// 全消しが見つからなければ、累計消去数が最大だった手順を返す。
/// 消去可能なグループがない盤面では空の手順になる。
pub fn solve(root: &Grid, config: &SolverConfig, progress: &ProgressManager) -> SearchOutcome {
    let t0 = Instant::now();
    let mut search = Search::new(root, config, progress);
    search.push_children(None, root, 0);
    vlog!(
        "[探索] 開始: {}x{} 残り{}セル / 初手候補={}",
        root.rows(),
        root.columns(),
        root.non_blank_count(),
        search.heap.len()
    );

    let mut expansions: u64 = 0;
    let mut best: Option<(usize, usize)> = None; // (累計消去数, ノード)
    let mut solved: Option<usize> = None;
    let mut aborted = false;

    while let Some(entry) = search.heap.pop() {
        let improved = match best {
            Some((removed, _)) => entry.total_removed > removed,
            None => true,
        };
        if improved {
            best = Some((entry.total_removed, entry.node));
        }
        let grid = search.nodes[entry.node].mv.result.clone();
        if grid.is_blank() {
            solved = Some(entry.node);
            break;
        }
        if search.progress.is_aborted() || search.limit_reached(expansions) {
            aborted = true;
            break;
        }
        expansions += 1;
        search.push_children(Some(entry.node), &grid, entry.total_removed);
    }

    let cleared = solved.is_some();
    let (removed, path) = match solved.or(best.map(|(_, node)| node)) {
        Some(node) => (search.nodes[node].total_removed, search.path_to(node)),
        None => (0, Vec::new()),
    };

    progress.add_expansions(expansions);
    progress.add_enqueued(search.enqueued);

    let elapsed = t0.elapsed().as_secs_f64();
    let summary = SearchSummary {
        expansions,
        enqueued: search.enqueued,
        cache_hit: false,
        cleared,
        removed,
        aborted,
        elapsed_seconds: elapsed,
        expansions_per_second: if elapsed > 0.0 {
            expansions as f64 / elapsed
        } else {
            0.0
        },
    };
    vlog!(
        "[探索] 終了: {} / 消去={} / 手数={} / 展開={} / 積んだ状態={}{}",
        if cleared { "全消し" } else { "部分解" },
        removed,
        path.len(),
        expansions,
        search.enqueued,
        if aborted { " (打ち切り)" } else { "" }
    );

    SearchOutcome {
        path,
        cleared,
        removed,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::grid::Coord;
    use crate::domain::search::ExpansionLimit;

    fn grid(rows: &[&[u8]]) -> Grid {
        let cells: Vec<Vec<u8>> = rows.iter().map(|r| r.to_vec()).collect();
        Grid::encode(7, &cells)
    }

    /// 手順を実際に適用して最後の盤面を返す
    fn replay(root: &Grid, path: &[Move]) -> Grid {
        let mut g = root.clone();
        for mv in path {
            let group = crate::domain::group::group_at(&g, mv.coord).unwrap();
            assert!(group.is_collapsible());
            g = collapse(&group, &g);
            assert_eq!(g, mv.result);
        }
        g
    }

    #[test]
    fn successors_cover_each_collapsible_group() {
        let g = grid(&[&[1, 1], &[2, 2]]);
        let next = successors(&g);
        assert_eq!(next.len(), 2);
        assert!(next.iter().all(|m| m.removed == 2));
    }

    #[test]
    fn frontier_prefers_more_removed_then_earlier() {
        let mut heap = BinaryHeap::new();
        heap.push(Frontier { total_removed: 3, seq: 0, node: 0 });
        heap.push(Frontier { total_removed: 5, seq: 2, node: 1 });
        heap.push(Frontier { total_removed: 5, seq: 1, node: 2 });
        assert_eq!(heap.pop().unwrap().node, 2);
        assert_eq!(heap.pop().unwrap().node, 1);
        assert_eq!(heap.pop().unwrap().node, 0);
    }

    #[test]
    fn solves_two_by_two_rows() {
        let g = grid(&[&[1, 1], &[2, 2]]);
        let outcome = solve(&g, &SolverConfig::default(), &ProgressManager::new());
        assert!(outcome.cleared);
        assert_eq!(outcome.removed, 4);
        assert_eq!(outcome.path.len(), 2);
        assert!(replay(&g, &outcome.path).is_blank());
    }

    #[test]
    fn needs_gravity_to_clear() {
        // 中央の 2 を消すと上下の 1 が繋がる
        let g = grid(&[&[1], &[2], &[2], &[1]]);
        let outcome = solve(&g, &SolverConfig::default(), &ProgressManager::new());
        assert!(outcome.cleared);
        assert_eq!(outcome.first_move(), Some(Coord::new(1, 0)));
        assert!(replay(&g, &outcome.path).is_blank());
    }

    #[test]
    fn needs_column_compaction_to_clear() {
        // 中央列を消すと左右の列が隣接する
        let g = grid(&[&[1, 2, 1], &[3, 2, 3]]);
        let outcome = solve(&g, &SolverConfig::default(), &ProgressManager::new());
        assert!(outcome.cleared);
        assert_eq!(outcome.first_move(), Some(Coord::new(0, 1)));
        assert_eq!(outcome.path.len(), 3);
    }

    #[test]
    fn checkerboard_has_no_moves() {
        let g = grid(&[&[1, 2], &[2, 1]]);
        let outcome = solve(&g, &SolverConfig::default(), &ProgressManager::new());
        assert!(!outcome.cleared);
        assert!(outcome.path.is_empty());
        assert_eq!(outcome.first_move(), None);
        assert_eq!(outcome.summary.expansions, 0);
    }

    #[test]
    fn unsolvable_falls_back_to_best_partial() {
        // 1 1 を消しても 2 と 3 が残る
        let g = grid(&[&[2, 1, 1, 3]]);
        let outcome = solve(&g, &SolverConfig::default(), &ProgressManager::new());
        assert!(!outcome.cleared);
        assert_eq!(outcome.removed, 2);
        assert_eq!(outcome.first_move(), Some(Coord::new(0, 1)));
    }

    #[test]
    fn expansion_limit_stops_search() {
        let g = grid(&[
            &[1, 2, 1, 2, 3, 3],
            &[1, 2, 3, 2, 1, 1],
            &[2, 3, 3, 1, 2, 2],
        ]);
        let config = SolverConfig::default().with_expansion_limit(ExpansionLimit::new(1).unwrap());
        let outcome = solve(&g, &config, &ProgressManager::new());
        assert!(outcome.summary.expansions <= 1);
        assert!(outcome.first_move().is_some());
    }

    #[test]
    fn aborted_search_returns_best_so_far() {
        let g = grid(&[&[1, 1], &[2, 2]]);
        let progress = ProgressManager::new();
        progress.abort();
        let outcome = solve(&g, &SolverConfig::default(), &progress);
        assert!(outcome.summary.aborted);
        assert!(!outcome.cleared);
        assert_eq!(outcome.summary.expansions, 0);
        assert_eq!(outcome.removed, 2);
        assert!(outcome.first_move().is_some());
    }

    #[test]
    fn progress_accumulates_expansions() {
        let g = grid(&[&[1, 1], &[2, 2]]);
        let progress = ProgressManager::new();
        let outcome = solve(&g, &SolverConfig::default(), &progress);
        assert_eq!(progress.get_stats().expansions, outcome.summary.expansions);
        assert!(outcome.summary.enqueued >= 2);
    }
}
