// ソルバーサービス - 次の一手の推奨とキャッシュ管理

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::application::progress::ProgressManager;
use crate::application::solver::engine::solve;
use crate::domain::collapse::apply_move;
use crate::domain::grid::{Coord, Grid};
use crate::domain::search::{Move, Outcome, SearchOutcome, SearchSummary, SolverConfig};
use crate::infrastructure::cache::{CachedMove, MoveCache};
use crate::vlog;

/// 次の一手を推奨するサービス
///
/// キャッシュはこのサービスが所有する。複数スレッドから使う場合は
/// サービスごと `Mutex` で包むこと。
pub struct SolverService {
    config: SolverConfig,
    cache: MoveCache,
    progress: Arc<ProgressManager>,
    last_summary: Option<SearchSummary>,
}

impl SolverService {
    pub fn new(config: SolverConfig) -> Result<Self> {
        Self::with_cache(config, MoveCache::new())
    }

    /// 読み込み済みのキャッシュを引き継いで作成
    pub fn with_cache(config: SolverConfig, cache: MoveCache) -> Result<Self> {
        config.validate().context("探索設定が不正です")?;
        Ok(Self {
            config,
            cache,
            progress: Arc::new(ProgressManager::new()),
            last_summary: None,
        })
    }

    /// 次にクリックすべきセル
    ///
    /// 盤面が既に空、または消せるグループがなければ None。
    pub fn recommend_move(&mut self, grid: &Grid) -> Option<Coord> {
        if grid.is_blank() {
            return None;
        }
        if let Some(hit) = self.cache.get(grid) {
            self.progress.record_cache_hit();
            self.last_summary = Some(SearchSummary::cache_hit());
            vlog!("[キャッシュ] ヒット: {} ({:?})", hit.coord, hit.outcome);
            return Some(hit.coord);
        }
        self.progress.record_cache_miss();

        let outcome = solve(grid, &self.config, &self.progress);
        // 中断は今回の探索で消費する
        self.progress.clear_abort();
        self.memoize(grid, &outcome);
        self.last_summary = Some(outcome.summary.clone());

        self.cache
            .get(grid)
            .map(|m| m.coord)
            .or_else(|| outcome.first_move())
    }

    /// 推奨手を繰り返し適用した手順（空になるか手がなくなるまで）
    pub fn solution_path(&mut self, grid: &Grid) -> Vec<Move> {
        let mut path = Vec::new();
        let mut current = grid.clone();
        while let Some(coord) = self.recommend_move(&current) {
            let Some(mv) = apply_move(&current, coord) else {
                break;
            };
            current = mv.result.clone();
            path.push(mv);
        }
        path
    }

    /// 手順上のすべての盤面に次の手を記録する
    fn memoize(&mut self, root: &Grid, outcome: &SearchOutcome) {
        let keep = outcome.cleared || (self.config.cache_partial && !outcome.summary.aborted);
        if !keep || outcome.path.is_empty() {
            return;
        }
        let mut state = root.clone();
        let mut remaining = outcome.removed;
        let mut stored = 0usize;
        for mv in &outcome.path {
            let quality = if outcome.cleared {
                Outcome::Cleared
            } else {
                Outcome::Partial { removed: remaining }
            };
            let cached = CachedMove {
                coord: mv.coord,
                outcome: quality,
            };
            if self.cache.record(state, cached) {
                stored += 1;
            }
            remaining = remaining.saturating_sub(mv.removed);
            state = mv.result.clone();
        }
        vlog!(
            "[キャッシュ] 記録: {}/{} 件 (合計 {})",
            stored,
            outcome.path.len(),
            self.cache.len()
        );
    }

    pub fn cache(&self) -> &MoveCache {
        &self.cache
    }

    pub fn into_cache(self) -> MoveCache {
        self.cache
    }

    /// 中断フラグや累計統計の参照用
    pub fn progress(&self) -> Arc<ProgressManager> {
        Arc::clone(&self.progress)
    }

    /// 直近の `recommend_move` のサマリー
    pub fn last_summary(&self) -> Option<&SearchSummary> {
        self.last_summary.as_ref()
    }
}

impl Default for SolverService {
    fn default() -> Self {
        Self {
            config: SolverConfig::default(),
            cache: MoveCache::new(),
            progress: Arc::new(ProgressManager::new()),
            last_summary: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::group::group_at;
    use crate::domain::search::ExpansionLimit;

    fn grid(rows: &[&[u8]]) -> Grid {
        let cells: Vec<Vec<u8>> = rows.iter().map(|r| r.to_vec()).collect();
        Grid::encode(7, &cells)
    }

    #[test]
    fn second_call_is_a_cache_hit() {
        let mut service = SolverService::default();
        let g = grid(&[&[1, 2, 1], &[3, 2, 3]]);

        let first = service.recommend_move(&g);
        assert!(first.is_some());
        assert!(!service.last_summary().unwrap().cache_hit);

        let second = service.recommend_move(&g);
        assert_eq!(first, second);
        let summary = service.last_summary().unwrap();
        assert!(summary.cache_hit);
        assert_eq!(summary.expansions, 0);
        assert_eq!(service.progress().get_stats().cache_hits, 1);
    }

    #[test]
    fn winning_path_is_memoized_for_every_state() {
        let mut service = SolverService::default();
        let g = grid(&[&[1, 2, 1], &[3, 2, 3]]);
        service.recommend_move(&g);
        // 3手の手順 → 3つの盤面が記録される
        assert_eq!(service.cache().len(), 3);
        for entry in service.cache().export() {
            assert_eq!(entry.outcome, Outcome::Cleared);
        }
    }

    #[test]
    fn blank_grid_has_no_move() {
        let mut service = SolverService::default();
        let g = grid(&[&[0, 0]]);
        assert_eq!(service.recommend_move(&g), None);
    }

    #[test]
    fn no_collapsible_group_returns_none() {
        let mut service = SolverService::default();
        let g = grid(&[&[1, 2], &[2, 1]]);
        assert_eq!(service.recommend_move(&g), None);
        assert!(service.cache().is_empty());
    }

    #[test]
    fn partial_results_are_cached_when_enabled() {
        let mut service = SolverService::default();
        let g = grid(&[&[2, 1, 1, 3]]);
        assert_eq!(service.recommend_move(&g), Some(Coord::new(0, 1)));
        let cached = service.cache().get(&g).unwrap();
        assert_eq!(cached.outcome, Outcome::Partial { removed: 2 });
    }

    #[test]
    fn partial_results_are_skipped_when_disabled() {
        let config = SolverConfig {
            cache_partial: false,
            ..SolverConfig::default()
        };
        let mut service = SolverService::new(config).unwrap();
        let g = grid(&[&[2, 1, 1, 3]]);
        assert!(service.recommend_move(&g).is_some());
        assert!(service.cache().is_empty());
    }

    #[test]
    fn limited_search_is_not_cached() {
        let config = SolverConfig::default().with_expansion_limit(ExpansionLimit::new(1).unwrap());
        let mut service = SolverService::new(config).unwrap();
        let g = grid(&[
            &[1, 2, 1, 2, 3, 3],
            &[1, 2, 3, 2, 1, 1],
            &[2, 3, 3, 1, 2, 2],
        ]);
        let coord = service.recommend_move(&g).unwrap();
        assert!(group_at(&g, coord).unwrap().is_collapsible());
        if service.last_summary().unwrap().aborted {
            assert!(service.cache().get(&g).is_none());
        }
    }

    #[test]
    fn abort_only_cuts_short_the_next_search() {
        let mut service = SolverService::default();
        service.progress().abort();
        let first = grid(&[&[1, 2, 1], &[3, 2, 3]]);
        assert!(service.recommend_move(&first).is_some());
        assert!(service.last_summary().unwrap().aborted);
        assert!(!service.progress().is_aborted());

        let second = grid(&[&[1], &[2], &[2], &[1]]);
        assert_eq!(service.recommend_move(&second), Some(Coord::new(1, 0)));
        let summary = service.last_summary().unwrap();
        assert!(!summary.aborted);
        assert!(summary.cleared);
        assert!(service.cache().get(&second).is_some());
    }

    #[test]
    fn solution_path_clears_solvable_grid() {
        let mut service = SolverService::default();
        let g = grid(&[&[1], &[2], &[2], &[1]]);
        let path = service.solution_path(&g);
        assert_eq!(path.len(), 2);
        assert!(path.last().unwrap().result.is_blank());
    }

    #[test]
    fn preloaded_cache_is_used() {
        let g = grid(&[&[1, 1], &[2, 2]]);
        let mut cache = MoveCache::new();
        cache.record(
            g.clone(),
            CachedMove {
                coord: Coord::new(1, 1),
                outcome: Outcome::Cleared,
            },
        );
        let mut service = SolverService::with_cache(SolverConfig::default(), cache).unwrap();
        assert_eq!(service.recommend_move(&g), Some(Coord::new(1, 1)));
        assert!(service.last_summary().unwrap().cache_hit);
        assert_eq!(service.into_cache().len(), 1);
    }
}
