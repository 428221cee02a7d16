// ソルバーアプリケーションサービス

pub mod engine;
pub mod service;

pub use engine::{solve, successors};
pub use service::SolverService;
