// 探索設定のValue Objects

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// 展開回数の上限を表すValue Object
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ExpansionLimit(u64);

impl ExpansionLimit {
    pub fn new(limit: u64) -> Result<Self> {
        if limit == 0 {
            return Err(anyhow!("展開回数の上限は1以上である必要があります"));
        }
        Ok(Self(limit))
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

/// 探索設定のValue Object
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// None なら全消しか探索空間の枯渇まで続ける
    pub expansion_limit: Option<ExpansionLimit>,
    /// 全消しに届かなかった結果もキャッシュするか
    pub cache_partial: bool,
}

impl SolverConfig {
    pub fn validate(&self) -> Result<()> {
        // Value Objectsで既に検証済み
        Ok(())
    }

    pub fn with_expansion_limit(mut self, limit: ExpansionLimit) -> Self {
        self.expansion_limit = Some(limit);
        self
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            expansion_limit: None,
            cache_partial: true,
        }
    }
}
