// 探索結果の定義

use crate::domain::grid::{Coord, Grid};
use serde::{Deserialize, Serialize};

/// 1手（クリック座標と消去後の盤面）
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Move {
    pub coord: Coord,
    pub removed: usize,
    pub result: Grid,
}

/// キャッシュされた手の質
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// この手から全消しに至る
    Cleared,
    /// 全消しは見つからず、この盤面から `removed` セル消せる
    Partial { removed: usize },
}

impl Outcome {
    /// `other` より悪くないか（同等なら true）
    pub fn is_at_least(&self, other: &Outcome) -> bool {
        match (self, other) {
            (Outcome::Cleared, _) => true,
            (Outcome::Partial { .. }, Outcome::Cleared) => false,
            (Outcome::Partial { removed: a }, Outcome::Partial { removed: b }) => a >= b,
        }
    }
}

/// 1回の探索の結果
#[derive(Clone, Debug)]
pub struct SearchOutcome {
    /// ルートからの手順（全消しでなければ最良の部分手順）
    pub path: Vec<Move>,
    pub cleared: bool,
    pub removed: usize,
    pub summary: SearchSummary,
}

impl SearchOutcome {
    /// ルートで打つ手
    pub fn first_move(&self) -> Option<Coord> {
        self.path.first().map(|m| m.coord)
    }
}

/// 探索サマリー
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchSummary {
    pub expansions: u64,
    pub enqueued: u64,
    pub cache_hit: bool,
    pub cleared: bool,
    pub removed: usize,
    pub aborted: bool,
    pub elapsed_seconds: f64,
    pub expansions_per_second: f64,
}

impl SearchSummary {
    /// キャッシュヒット時のサマリー
    pub fn cache_hit() -> Self {
        Self {
            cache_hit: true,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleared_beats_partial() {
        let cleared = Outcome::Cleared;
        let partial = Outcome::Partial { removed: 40 };
        assert!(cleared.is_at_least(&partial));
        assert!(cleared.is_at_least(&Outcome::Cleared));
        assert!(!partial.is_at_least(&cleared));
    }

    #[test]
    fn partials_compare_by_removed() {
        let a = Outcome::Partial { removed: 10 };
        let b = Outcome::Partial { removed: 12 };
        assert!(b.is_at_least(&a));
        assert!(a.is_at_least(&a));
        assert!(!a.is_at_least(&b));
    }
}
