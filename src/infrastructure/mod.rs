// インフラ層 - キャッシュと永続化

pub mod cache;
pub mod storage;

pub use cache::MoveCache;
pub use storage::{CacheStore, FileCacheStore, MemoryCacheStore};
