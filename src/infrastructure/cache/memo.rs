// 手のキャッシュ（盤面 → 推奨手）

use crate::domain::grid::{Coord, Grid};
use crate::domain::search::Outcome;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// キャッシュされた推奨手
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CachedMove {
    pub coord: Coord,
    pub outcome: Outcome,
}

/// 永続化用の1エントリ（盤面キーをそのまま保持する）
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub grid: Grid,
    pub row: usize,
    pub col: usize,
    pub outcome: Outcome,
}

/// プロセス内で共有する手のキャッシュ
///
/// 一度記録した手はより悪い手で上書きしない。
#[derive(Clone, Debug, Default)]
pub struct MoveCache {
    map: HashMap<Grid, CachedMove>,
}

impl MoveCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, grid: &Grid) -> Option<CachedMove> {
        self.map.get(grid).copied()
    }

    /// 記録する。既存の手より悪ければ無視して false を返す
    pub fn record(&mut self, grid: Grid, cached: CachedMove) -> bool {
        match self.map.entry(grid) {
            Entry::Vacant(e) => {
                e.insert(cached);
                true
            }
            Entry::Occupied(mut e) => {
                if cached.outcome.is_at_least(&e.get().outcome) {
                    e.insert(cached);
                    true
                } else {
                    false
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// 永続化用に書き出す（盤面のビット列順で安定化）
    pub fn export(&self) -> Vec<CacheEntry> {
        let mut entries: Vec<CacheEntry> = self
            .map
            .iter()
            .map(|(grid, m)| CacheEntry {
                grid: grid.clone(),
                row: m.coord.row,
                col: m.coord.col,
                outcome: m.outcome,
            })
            .collect();
        entries.sort_by(|a, b| {
            (a.grid.rows(), a.grid.columns(), a.grid.bits())
                .cmp(&(b.grid.rows(), b.grid.columns(), b.grid.bits()))
        });
        entries
    }

    /// 取り込む（`record` と同じ上書き規則）。取り込んだ件数を返す
    pub fn import(&mut self, entries: impl IntoIterator<Item = CacheEntry>) -> usize {
        entries
            .into_iter()
            .filter(|e| {
                self.record(
                    e.grid.clone(),
                    CachedMove {
                        coord: Coord::new(e.row, e.col),
                        outcome: e.outcome,
                    },
                )
            })
            .count()
    }
}
