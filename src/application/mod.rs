// アプリケーション層 - ユースケース

pub mod generator;
pub mod progress;
pub mod solver;

pub use generator::generate;
pub use progress::{ProgressManager, ProgressStats};
pub use solver::SolverService;
