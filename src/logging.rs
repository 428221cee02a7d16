use anyhow::{anyhow, Context, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// グローバルな詳細ログフラグ
pub static VERBOSE_LOGGING: AtomicBool = AtomicBool::new(false);

/// ログファイルのグローバルハンドル
static LOG_FILE: Mutex<Option<std::fs::File>> = Mutex::new(None);

/// ログファイルを初期化し、詳細ログを有効にする
pub fn init_log_file(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
        .with_context(|| format!("ログファイルを開けません: {}", path.display()))?;

    let mut log_file = LOG_FILE
        .lock()
        .map_err(|_| anyhow!("ログファイルのロックが壊れています"))?;
    *log_file = Some(file);
    enable_verbose_logging();
    Ok(())
}

/// ログをファイルに書き込む（未初期化なら何もしない）
pub fn write_log(message: String) {
    if let Ok(mut log_file) = LOG_FILE.lock() {
        if let Some(ref mut file) = *log_file {
            let _ = writeln!(file, "{}", message);
            let _ = file.flush();
        }
    }
}

/// 詳細ログを有効にする
pub fn enable_verbose_logging() {
    VERBOSE_LOGGING.store(true, Ordering::Relaxed);
}

/// 詳細ログを無効にする
pub fn disable_verbose_logging() {
    VERBOSE_LOGGING.store(false, Ordering::Relaxed);
}

/// 詳細ログが有効かチェック
pub fn is_verbose() -> bool {
    VERBOSE_LOGGING.load(Ordering::Relaxed)
}

/// 詳細ログ出力マクロ（ファイル出力）
#[macro_export]
macro_rules! vlog {
    ($($arg:tt)*) => {
        if $crate::logging::is_verbose() {
            let message = format!($($arg)*);
            $crate::logging::write_log(message);
        }
    };
}
