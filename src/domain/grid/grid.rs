// Grid型 - 色セルを列優先で1つの任意幅整数にパックした盤面

use crate::constants::{BITS_PER_CELL, BLANK_CELL};
use crate::domain::grid::bits::{extract_range, overwrite_range, read_bits};
use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 盤面上の座標（0始まり、row=0 が最上段）
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.row, self.col)
    }
}

/// 不変の盤面値
///
/// 列0の各行が最下位ビット側、列内では row 0 が最下位フィールド。
/// 等価性とハッシュは `(rows, columns, num_colors, bits)` の値で決まるので、
/// そのままメモ化のキーに使える。
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid {
    rows: usize,
    columns: usize,
    num_colors: u8,
    bits: BigUint,
}

impl Grid {
    /// パック済みビット列から直接構築
    pub fn from_parts(rows: usize, columns: usize, num_colors: u8, bits: BigUint) -> Self {
        Self {
            rows,
            columns,
            num_colors,
            bits,
        }
    }

    /// 2次元の色配列（[row][col]）をパックする
    ///
    /// 行数・列数・色の範囲は呼び出し側で検証済みの前提。
    pub fn encode(num_colors: u8, color_grid: &[Vec<u8>]) -> Self {
        let rows = color_grid.len();
        let columns = color_grid.first().map_or(0, |r| r.len());
        let mut grid = Self::from_parts(rows, columns, num_colors, BigUint::zero());
        let mut bits = BigUint::zero();
        for (row, line) in color_grid.iter().enumerate() {
            for (col, &color) in line.iter().enumerate() {
                if color != BLANK_CELL {
                    bits |= BigUint::from(color) << grid.cell_bit_position(row, col);
                }
            }
        }
        grid.bits = bits;
        grid
    }

    /// `encode` の逆変換（表示・テスト用）
    pub fn decode(&self) -> Vec<Vec<u8>> {
        let cells = self.cells();
        (0..self.rows)
            .map(|row| {
                (0..self.columns)
                    .map(|col| cells[col * self.rows + row])
                    .collect()
            })
            .collect()
    }

    /// 全セルを列優先で展開（index = col * rows + row）
    pub fn cells(&self) -> Vec<u8> {
        let digits = self.bits.to_u64_digits();
        (0..self.rows * self.columns)
            .map(|i| read_bits(&digits, i * BITS_PER_CELL, BITS_PER_CELL) as u8)
            .collect()
    }

    /// セルのビット位置
    #[inline]
    pub fn cell_bit_position(&self, row: usize, col: usize) -> usize {
        (col * self.rows + row) * BITS_PER_CELL
    }

    /// 1列分のビット幅
    #[inline]
    pub fn bits_per_column(&self) -> usize {
        self.rows * BITS_PER_CELL
    }

    /// セルを取得（範囲外はNone）
    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        if row >= self.rows || col >= self.columns {
            return None;
        }
        extract_range(&self.bits, BITS_PER_CELL, self.cell_bit_position(row, col)).to_u8()
    }

    /// 1列分のビットを取得
    pub fn column_bits(&self, col: usize) -> BigUint {
        extract_range(&self.bits, self.bits_per_column(), self.cell_bit_position(0, col))
    }

    /// 1セルだけ差し替えた新しい盤面
    pub fn with_cell(&self, row: usize, col: usize, color: u8) -> Self {
        let bits = overwrite_range(
            &self.bits,
            &BigUint::from(color),
            BITS_PER_CELL,
            self.cell_bit_position(row, col),
        );
        self.with_bits(bits, self.columns)
    }

    /// ビット列と列数だけを差し替えた新しい盤面
    pub fn with_bits(&self, bits: BigUint, columns: usize) -> Self {
        Self {
            rows: self.rows,
            columns,
            num_colors: self.num_colors,
            bits,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn num_colors(&self) -> u8 {
        self.num_colors
    }

    pub fn bits(&self) -> &BigUint {
        &self.bits
    }

    /// すべてのセルがブランクかどうか
    pub fn is_blank(&self) -> bool {
        self.bits.is_zero()
    }

    /// ブランク以外のセル数
    pub fn non_blank_count(&self) -> usize {
        self.cells().iter().filter(|&&c| c != BLANK_CELL).count()
    }
}
