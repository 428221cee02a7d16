// グループ検出 - 4連結の同色セルを1パスで集める

use crate::constants::{U64Map, BLANK_CELL, MIN_GROUP_SIZE};
use crate::domain::grid::{Coord, Grid};

/// 同色で4連結なセルの極大集合
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group {
    color: u8,
    cells: Vec<Coord>,
}

impl Group {
    pub fn color(&self) -> u8 {
        self.color
    }

    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// 消去可能（2セル以上）か
    pub fn is_collapsible(&self) -> bool {
        self.cells.len() >= MIN_GROUP_SIZE
    }

    /// クリックする代表セル（走査で最初に見つかったセル）
    pub fn anchor(&self) -> Coord {
        self.cells[0]
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.cells.contains(&coord)
    }
}

/// 盤面のすべてのグループ（1セルのものを含む）を返す
///
/// 列ごとに上から下へ走査し、走査済みの同色隣接セルが属するグループへ合流する。
/// U字形などで複数のグループが隣接した場合は最初に見つかったグループへ併合し、
/// 吸収された側は空にして最後に除外する。
pub fn find_groups(grid: &Grid) -> Vec<Group> {
    let rows = grid.rows();
    let columns = grid.columns();
    let cells = grid.cells();

    let mut groups: Vec<Vec<Coord>> = Vec::new();
    let mut colors: Vec<u8> = Vec::new();
    // セル番号 → グループ番号（走査済みのセルのみ）
    let mut grouped: U64Map<usize> = U64Map::default();

    let index = |row: usize, col: usize| (col * rows + row) as u64;

    for col in 0..columns {
        for row in 0..rows {
            let color = cells[col * rows + row];
            if color == BLANK_CELL {
                continue;
            }

            let mut group: Option<usize> = None;
            // 左・上・下・右の順
            let neighbors = [
                (Some(row), col.checked_sub(1)),
                (row.checked_sub(1), Some(col)),
                (Some(row + 1).filter(|&r| r < rows), Some(col)),
                (Some(row), Some(col + 1).filter(|&c| c < columns)),
            ];
            for (nr, nc) in neighbors {
                let (Some(nr), Some(nc)) = (nr, nc) else {
                    continue;
                };
                if cells[nc * rows + nr] != color {
                    continue;
                }
                let Some(&found) = grouped.get(&index(nr, nc)) else {
                    continue;
                };
                match group {
                    None => group = Some(found),
                    Some(g) if g == found => {}
                    Some(g) => {
                        let absorbed = std::mem::take(&mut groups[found]);
                        for c in &absorbed {
                            grouped.insert(index(c.row, c.col), g);
                        }
                        groups[g].extend(absorbed);
                    }
                }
            }

            let g = group.unwrap_or_else(|| {
                groups.push(Vec::new());
                colors.push(color);
                groups.len() - 1
            });
            groups[g].push(Coord::new(row, col));
            grouped.insert(index(row, col), g);
        }
    }

    groups
        .into_iter()
        .zip(colors)
        .filter(|(cells, _)| !cells.is_empty())
        .map(|(cells, color)| Group { color, cells })
        .collect()
}

/// 消去可能なグループだけを返す
pub fn find_collapsible_groups(grid: &Grid) -> Vec<Group> {
    find_groups(grid)
        .into_iter()
        .filter(Group::is_collapsible)
        .collect()
}

/// 指定座標を含むグループ
pub fn group_at(grid: &Grid, coord: Coord) -> Option<Group> {
    find_groups(grid).into_iter().find(|g| g.contains(coord))
}
