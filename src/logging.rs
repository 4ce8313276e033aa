//! Tracing setup for the summarisation server.
//!
//! Events go to stdout in a compact format, and a second copy is appended to a log
//! file through a non-blocking writer. The file target is `SUMMARIST_LOG_FILE` when
//! set, falling back to `logs/summarist.log`. If neither destination can be opened
//! the server keeps running with stdout only.
use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Keeps the non-blocking writer's flush thread alive for the process lifetime.
static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Install the global tracing subscriber.
///
/// Filtering honours `RUST_LOG` and defaults to `info`. Must be called once,
/// before the first request is served.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stdout_layer = fmt::layer().with_target(false).compact();

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer);

    match open_log_file() {
        Some(writer) => {
            let file_layer = fmt::layer()
                .with_writer(writer)
                .with_target(true)
                .with_ansi(false)
                .compact();
            registry.with(file_layer).init();
        }
        None => registry.init(),
    }
}

/// Open the log file for appending and wrap it in a non-blocking writer.
fn open_log_file() -> Option<NonBlocking> {
    let path = log_file_path();
    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        if let Err(err) = fs::create_dir_all(parent) {
            eprintln!("Failed to create log directory {}: {err}", parent.display());
            return None;
        }
    }

    match fs::OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => {
            let (writer, guard) = tracing_appender::non_blocking(file);
            let _ = LOG_GUARD.set(guard);
            Some(writer)
        }
        Err(err) => {
            eprintln!("Failed to open log file {}: {err}", path.display());
            None
        }
    }
}

fn log_file_path() -> PathBuf {
    std::env::var("SUMMARIST_LOG_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("logs/summarist.log"))
}
