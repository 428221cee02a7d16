// キャッシュ

pub mod memo;

pub use memo::{CacheEntry, CachedMove, MoveCache};
