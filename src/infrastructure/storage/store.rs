// キャッシュの永続化

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::PathBuf;

use crate::infrastructure::cache::{CacheEntry, MoveCache};
use crate::vlog;

/// 手のキャッシュを読み書きするためのtrait
pub trait CacheStore {
    /// キャッシュを読み込む（保存先がなければ空）
    fn load(&self) -> Result<MoveCache>;

    /// キャッシュを書き出す
    fn save(&mut self, cache: &MoveCache) -> Result<()>;
}

/// JSONファイルへの保存実装
pub struct FileCacheStore {
    path: PathBuf,
}

impl FileCacheStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CacheStore for FileCacheStore {
    fn load(&self) -> Result<MoveCache> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                vlog!("[キャッシュ] ファイルなし: {}", self.path.display());
                return Ok(MoveCache::new());
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("キャッシュを開けません: {}", self.path.display())
                })
            }
        };
        let entries: Vec<CacheEntry> = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("キャッシュを読めません: {}", self.path.display()))?;
        let mut cache = MoveCache::new();
        let n = cache.import(entries);
        vlog!("[キャッシュ] 読み込み: {} 件 ({})", n, self.path.display());
        Ok(cache)
    }

    fn save(&mut self, cache: &MoveCache) -> Result<()> {
        let file = File::create(&self.path)
            .with_context(|| format!("キャッシュを作成できません: {}", self.path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, &cache.export())?;
        writer.flush()?;
        vlog!("[キャッシュ] 保存: {} 件 ({})", cache.len(), self.path.display());
        Ok(())
    }
}

/// メモリ内保存実装（テスト用）
pub struct MemoryCacheStore {
    entries: Vec<CacheEntry>,
    saves: u64,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            saves: 0,
        }
    }

    pub fn entries(&self) -> &[CacheEntry] {
        &self.entries
    }

    pub fn saves(&self) -> u64 {
        self.saves
    }
}

impl Default for MemoryCacheStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CacheStore for MemoryCacheStore {
    fn load(&self) -> Result<MoveCache> {
        let mut cache = MoveCache::new();
        cache.import(self.entries.iter().cloned());
        Ok(cache)
    }

    fn save(&mut self, cache: &MoveCache) -> Result<()> {
        self.entries = cache.export();
        self.saves += 1;
        Ok(())
    }
}
