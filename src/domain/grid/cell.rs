// セル型定義（パレット文字との相互変換）

use crate::constants::{BLANK_CELL, COLORS, MAX_COLORS};
use anyhow::{anyhow, Result};

/// 盤面入力・表示用のセル型
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Blank,     // '-'
    Color(u8), // 1..=7 = 'R','O','Y','G','B','I','V'
}

impl Cell {
    /// 文字からCellに変換
    pub fn from_char(ch: char) -> Result<Self> {
        match COLORS.find(ch) {
            Some(0) => Ok(Cell::Blank),
            Some(i) => Ok(Cell::Color(i as u8)),
            None => Err(anyhow!("不正な文字: {}", ch)),
        }
    }

    /// Cellを文字に変換
    pub fn to_char(self) -> char {
        COLORS
            .as_bytes()
            .get(self.index() as usize)
            .map_or('?', |&b| b as char)
    }

    /// パック済みの色インデックスから変換
    pub fn from_index(index: u8) -> Result<Self> {
        match index {
            BLANK_CELL => Ok(Cell::Blank),
            1..=MAX_COLORS => Ok(Cell::Color(index)),
            _ => Err(anyhow!("色インデックスが不正: {}", index)),
        }
    }

    /// 色インデックス（ブランクは0）
    pub fn index(self) -> u8 {
        match self {
            Cell::Blank => BLANK_CELL,
            Cell::Color(c) => c,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_chars_map_to_indices() {
        assert_eq!(Cell::from_char('-').unwrap(), Cell::Blank);
        assert_eq!(Cell::from_char('R').unwrap(), Cell::Color(1));
        assert_eq!(Cell::from_char('V').unwrap(), Cell::Color(7));
    }

    #[test]
    fn unknown_char_is_rejected() {
        assert!(Cell::from_char('X').is_err());
        assert!(Cell::from_char('r').is_err());
    }

    #[test]
    fn char_roundtrip() {
        for ch in COLORS.chars() {
            assert_eq!(Cell::from_char(ch).unwrap().to_char(), ch);
        }
    }

    #[test]
    fn index_out_of_palette_fails() {
        assert!(Cell::from_index(8).is_err());
        assert_eq!(Cell::from_index(0).unwrap(), Cell::Blank);
    }
}
