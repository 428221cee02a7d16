// Click-o-mania（Collapse）ソルバー - ライブラリモジュール

pub mod constants;
pub mod domain;         // ドメイン層
pub mod application;    // アプリケーション層
pub mod infrastructure; // インフラ層
pub mod logging;

// 外部クレートの再エクスポート
pub use anyhow::{anyhow, Context, Result};
pub use num_bigint::BigUint;

// 主要な型を再エクスポート
pub use application::{generate, ProgressManager, SolverService};
pub use constants::{BITS_PER_CELL, COLORS};
pub use domain::collapse::{apply_move, collapse};
pub use domain::grid::{parse_puzzle, render, Cell, Coord, Grid};
pub use domain::group::{find_groups, Group};
pub use domain::search::{Move, SolverConfig};
pub use infrastructure::{CacheStore, FileCacheStore, MoveCache};
