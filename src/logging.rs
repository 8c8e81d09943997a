//! File logging through `tracing`.
//!
//! The terminal belongs to the UI, so nothing is written to stdout or
//! stderr. Logs go to a daily rolling file under the local data directory:
//! `~/.local/share/mailboard/logs/` on Linux,
//! `~/Library/Application Support/mailboard/logs/` on macOS.
//!
//! `RUST_LOG` overrides the level, e.g. `RUST_LOG=mailboard=trace` to see
//! every key the dispatcher receives.

use std::path::PathBuf;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Filter used when `RUST_LOG` is unset or invalid.
const DEFAULT_LOG_FILTER: &str = "mailboard=info,warn";

/// File name prefix; the appender adds the date.
const LOG_FILE: &str = "mailboard.log";

/// Install the global subscriber.
///
/// # Errors
///
/// Fails when the log directory cannot be determined or created, or when a
/// global subscriber is already set.
pub fn init() -> anyhow::Result<()> {
    let log_dir = get_log_directory()?;
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE);

    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .with(env_filter(std::env::var("RUST_LOG").ok().as_deref()));

    tracing::subscriber::set_global_default(subscriber)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "mailboard starting up");
    tracing::debug!(log_dir = %log_dir.display(), "Log directory");
    Ok(())
}

/// Parse `spec`, falling back to the default filter.
fn env_filter(spec: Option<&str>) -> EnvFilter {
    spec.filter(|s| !s.trim().is_empty())
        .and_then(|s| EnvFilter::try_new(s).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn get_log_directory() -> anyhow::Result<PathBuf> {
    let base_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))?;
    Ok(base_dir.join("mailboard").join("logs"))
}

/// Where logs are written, for `--log-path`.
pub fn log_directory() -> Option<PathBuf> {
    get_log_directory().ok()
}

pub fn shutdown() {
    tracing::info!("mailboard shutting down");
}
