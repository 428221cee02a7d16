// 盤面サイズのValue Objects

use crate::constants::MAX_COLORS;
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// 行数・列数を表すValue Object
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Dimension(usize);

impl Dimension {
    pub fn new(n: usize) -> Result<Self> {
        if n == 0 {
            return Err(anyhow!("行数・列数は1以上である必要があります"));
        }
        Ok(Self(n))
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

/// 色数を表すValue Object（1..=7）
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NumColors(u8);

impl NumColors {
    pub fn new(n: u8) -> Result<Self> {
        if n == 0 {
            return Err(anyhow!("色数は1以上である必要があります"));
        }
        if n > MAX_COLORS {
            return Err(anyhow!("色数が大きすぎます: {} (最大 {})", n, MAX_COLORS));
        }
        Ok(Self(n))
    }

    pub fn get(&self) -> u8 {
        self.0
    }
}
