// 盤面関連のドメイン層

pub mod bits;
pub mod cell;
pub mod grid;
pub mod size;
pub mod text;

pub use cell::Cell;
pub use grid::{Coord, Grid};
pub use size::{Dimension, NumColors};
pub use text::{parse_puzzle, render};
