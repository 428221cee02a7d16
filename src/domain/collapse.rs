// 消去処理 - グループ消去・落下・空列の詰め

use crate::constants::{BITS_PER_CELL, BLANK_CELL};
use crate::domain::grid::bits::{delete_range, extract_range, overwrite_range};
use crate::domain::grid::{Coord, Grid};
use crate::domain::group::{group_at, Group};
use crate::domain::search::Move;
use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};
use std::collections::BTreeMap;

/// グループのセルをブランクにする（詰めはしない）
pub fn clear(group: &Group, grid: &Grid) -> Grid {
    let blank = BigUint::from(BLANK_CELL);
    let bits = group.cells().iter().fold(grid.bits().clone(), |bits, c| {
        overwrite_range(&bits, &blank, BITS_PER_CELL, grid.cell_bit_position(c.row, c.col))
    });
    grid.with_bits(bits, grid.columns())
}

/// グループが触れた列だけを詰める
///
/// 列は右から処理するので、列の削除が左側の列の位置を狂わせない。
/// 空になった列は丸ごと削除し、それ以外の列はグループの行にあるブランクを
/// 削除して最上段（row 0）へブランクを補う。結果としてセルは row の大きい側へ落ちる。
pub fn compact(group: &Group, grid: &Grid) -> Grid {
    let bits_per_column = grid.bits_per_column();
    let mut bits = grid.bits().clone();
    let mut columns = grid.columns();

    for (col, rows) in rows_by_column(group.cells()).into_iter().rev() {
        let position = grid.cell_bit_position(0, col);
        let mut column = extract_range(&bits, bits_per_column, position);
        if column.is_zero() {
            bits = delete_range(&bits, bits_per_column, position);
            columns -= 1;
            continue;
        }
        for row in rows {
            let offset = row * BITS_PER_CELL;
            let color = extract_range(&column, BITS_PER_CELL, offset).to_u8();
            if color == Some(BLANK_CELL) {
                column = delete_range(&column, BITS_PER_CELL, offset) << BITS_PER_CELL;
            }
        }
        bits = overwrite_range(&bits, &column, bits_per_column, position);
    }

    grid.with_bits(bits, columns)
}

/// `clear` → `compact` をまとめて適用
pub fn collapse(group: &Group, grid: &Grid) -> Grid {
    compact(group, &clear(group, grid))
}

/// 座標をクリックした結果（消去可能なグループでなければNone）
pub fn apply_move(grid: &Grid, coord: Coord) -> Option<Move> {
    let group = group_at(grid, coord).filter(Group::is_collapsible)?;
    Some(Move {
        coord,
        removed: group.len(),
        result: collapse(&group, grid),
    })
}

/// 列ごとの行番号（列・行とも昇順）
fn rows_by_column(cells: &[Coord]) -> BTreeMap<usize, Vec<usize>> {
    let mut map: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for c in cells {
        map.entry(c.col).or_default().push(c.row);
    }
    for rows in map.values_mut() {
        rows.sort_unstable();
        rows.dedup();
    }
    map
}
