pub mod store;

pub use store::{CacheStore, FileCacheStore, MemoryCacheStore};
