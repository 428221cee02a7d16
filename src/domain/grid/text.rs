// パズル文字列の読み込みと表示

use crate::domain::grid::cell::Cell;
use crate::domain::grid::grid::Grid;
use crate::domain::grid::size::{Dimension, NumColors};
use anyhow::{anyhow, Context, Result};

/// 入力形式:
///
/// ```text
/// rows columns colors
/// RRGB
/// ...
/// ```
///
/// 1行目がヘッダ、続く `rows` 行が盤面（先頭行が row 0）。
/// `colors` は色の種類数の申告値で、セルの検証には使わない
/// （セルはパレット文字であればよい）。
pub fn parse_puzzle(input: &str) -> Result<Grid> {
    let mut lines = input.lines().map(str::trim).filter(|l| !l.is_empty());

    let header = lines.next().ok_or_else(|| anyhow!("ヘッダ行がありません"))?;
    let fields: Vec<&str> = header.split_whitespace().collect();
    if fields.len() != 3 {
        return Err(anyhow!("ヘッダは 'rows columns colors' の3項目: {}", header));
    }
    let rows = Dimension::new(
        fields[0]
            .parse()
            .with_context(|| format!("行数が数値ではありません: {}", fields[0]))?,
    )?;
    let columns = Dimension::new(
        fields[1]
            .parse()
            .with_context(|| format!("列数が数値ではありません: {}", fields[1]))?,
    )?;
    let num_colors = NumColors::new(
        fields[2]
            .parse()
            .with_context(|| format!("色数が数値ではありません: {}", fields[2]))?,
    )?;

    let mut color_grid: Vec<Vec<u8>> = Vec::with_capacity(rows.get());
    for row in 0..rows.get() {
        let line = lines
            .next()
            .ok_or_else(|| anyhow!("盤面の行が足りません: 期待{}、実際{}", rows.get(), row))?;
        let cells = line
            .chars()
            .map(Cell::from_char)
            .collect::<Result<Vec<_>>>()
            .with_context(|| format!("{}行目を読めません", row))?;
        if cells.len() != columns.get() {
            return Err(anyhow!(
                "{}行目の文字数が不正: 期待{}、実際{}",
                row,
                columns.get(),
                cells.len()
            ));
        }
        color_grid.push(cells.into_iter().map(Cell::index).collect());
    }
    if lines.next().is_some() {
        return Err(anyhow!("盤面の行が多すぎます: 期待{}", rows.get()));
    }

    Ok(Grid::encode(num_colors.get(), &color_grid))
}

/// 盤面を1行1段、セルを空白区切りで表示
pub fn render(grid: &Grid) -> String {
    let mut s = String::with_capacity(grid.rows() * (grid.columns() * 2 + 1));
    for line in grid.decode() {
        let row: Vec<String> = line
            .into_iter()
            .map(|c| Cell::from_index(c).map_or('?', Cell::to_char).to_string())
            .collect();
        s.push_str(&row.join(" "));
        s.push('\n');
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_header_and_rows() {
        let g = parse_puzzle("2 3 2\nRRB\nB-R\n").unwrap();
        assert_eq!(g.rows(), 2);
        assert_eq!(g.columns(), 3);
        assert_eq!(g.num_colors(), 2);
        assert_eq!(g.decode(), vec![vec![1, 1, 5], vec![5, 0, 1]]);
    }

    #[test]
    fn tolerates_indentation_and_blank_lines() {
        let g = parse_puzzle("\n   1 2 1\n   GG\n\n").unwrap();
        assert_eq!(g.decode(), vec![vec![4, 4]]);
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(parse_puzzle("").is_err());
        assert!(parse_puzzle("2 2").is_err());
        assert!(parse_puzzle("a 2 2\nRR\nRR").is_err());
        assert!(parse_puzzle("0 2 2\n").is_err());
        assert!(parse_puzzle("2 2 9\nRR\nRR").is_err());
        assert!(parse_puzzle("2 2 2\nRR").is_err());
        assert!(parse_puzzle("2 2 2\nRR\nRRR").is_err());
        assert!(parse_puzzle("2 2 2\nRR\nRZ").is_err());
        assert!(parse_puzzle("1 2 2\nRR\nRR").is_err());
    }

    #[test]
    fn declared_color_count_does_not_limit_palette() {
        let g = parse_puzzle("1 3 2\nROY").unwrap();
        assert_eq!(g.decode(), vec![vec![1, 2, 3]]);
        assert_eq!(g.num_colors(), 2);
    }

    #[test]
    fn render_uses_palette_chars() {
        let g = parse_puzzle("2 2 2\nRB\n-R").unwrap();
        assert_eq!(render(&g), "R B\n- R\n");
    }
}
