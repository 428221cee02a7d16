// 探索関連のドメインモデル

pub mod config;
pub mod result;

pub use config::{ExpansionLimit, SolverConfig};
pub use result::{Move, Outcome, SearchOutcome, SearchSummary};
