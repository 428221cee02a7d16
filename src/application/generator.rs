// ランダム盤面生成

use rand::Rng;

use crate::domain::grid::{Dimension, Grid, NumColors};

/// 全セルを 1..=colors の一様乱数で埋めた盤面
pub fn generate<R: Rng + ?Sized>(
    rows: Dimension,
    columns: Dimension,
    colors: NumColors,
    rng: &mut R,
) -> Grid {
    let cells: Vec<Vec<u8>> = (0..rows.get())
        .map(|_| {
            (0..columns.get())
                .map(|_| rng.gen_range(1..=colors.get()))
                .collect()
        })
        .collect();
    Grid::encode(colors.get(), &cells)
}
