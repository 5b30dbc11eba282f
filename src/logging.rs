//! File-based tracing setup.
//!
//! The engine owns the terminal while it runs, so logs go to a file:
//!
//! - `WCE_LOG=off` disables logging entirely
//! - `WCE_LOG_DIR` selects the directory (default `logs`)
//! - `RUST_LOG` sets the filter (default `info`)

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const DEFAULT_LOG_DIR: &str = "logs";

/// Where logs for `file_name` would be written, or `None` when disabled.
pub fn log_path_from_env(file_name: &str) -> Option<PathBuf> {
    if env::var("WCE_LOG").is_ok_and(|v| v.trim().eq_ignore_ascii_case("off")) {
        return None;
    }
    let dir = env::var("WCE_LOG_DIR")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_DIR.to_string());
    Some(PathBuf::from(dir).join(file_name))
}

/// Install the global subscriber. Keep the returned guard alive until exit so
/// buffered lines are flushed.
pub fn init_from_env(file_name: &str) -> Result<Option<WorkerGuard>> {
    let Some(path) = log_path_from_env(file_name) else {
        return Ok(None);
    };
    let dir = path
        .parent()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR));
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(&dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_names(true);

    let _ = tracing_subscriber::registry().with(filter).with(layer).try_init();
    Ok(Some(guard))
}
