// 進捗管理

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

/// 進捗統計（プロセス内の累計）
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProgressStats {
    pub expansions: u64,
    pub enqueued: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
}

/// 進捗マネージャー
///
/// 中断フラグは探索ループが展開ごとに確認する。外部のタイムアウトや
/// キャンセルはこのフラグを立てるだけでよい。
pub struct ProgressManager {
    abort_flag: Arc<AtomicBool>,
    expansions: AtomicU64,
    enqueued: AtomicU64,
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
}

impl ProgressManager {
    pub fn new() -> Self {
        Self {
            abort_flag: Arc::new(AtomicBool::new(false)),
            expansions: AtomicU64::new(0),
            enqueued: AtomicU64::new(0),
            cache_hits: AtomicU64::new(0),
            cache_misses: AtomicU64::new(0),
        }
    }

    /// 探索中断フラグを取得
    pub fn abort_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.abort_flag)
    }

    /// 探索を中断
    pub fn abort(&self) {
        self.abort_flag.store(true, Ordering::Relaxed);
    }

    /// 中断されたかチェック
    pub fn is_aborted(&self) -> bool {
        self.abort_flag.load(Ordering::Relaxed)
    }

    /// 中断フラグを下ろす
    pub fn clear_abort(&self) {
        self.abort_flag.store(false, Ordering::Relaxed);
    }

    pub fn add_expansions(&self, count: u64) {
        self.expansions.fetch_add(count, Ordering::Relaxed);
    }

    pub fn add_enqueued(&self, count: u64) {
        self.enqueued.fetch_add(count, Ordering::Relaxed);
    }

    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    /// 現在の統計を取得
    pub fn get_stats(&self) -> ProgressStats {
        ProgressStats {
            expansions: self.expansions.load(Ordering::Relaxed),
            enqueued: self.enqueued.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            cache_misses: self.cache_misses.load(Ordering::Relaxed),
        }
    }

    /// リセット
    pub fn reset(&self) {
        self.clear_abort();
        self.expansions.store(0, Ordering::Relaxed);
        self.enqueued.store(0, Ordering::Relaxed);
        self.cache_hits.store(0, Ordering::Relaxed);
        self.cache_misses.store(0, Ordering::Relaxed);
    }
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}
