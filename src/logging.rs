//! Logging configuration using the tracing ecosystem.
//!
//! This module configures structured logging with:
//! - File-based output (to avoid TUI corruption)
//! - Daily log rotation
//! - Environment-based log level configuration

use std::path::PathBuf;

use anyhow::Context;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Default log level if neither `RUST_LOG` nor `--log-level` is set.
const DEFAULT_LOG_FILTER: &str = "lazyusers=info,warn";

/// Initialize the logging system.
///
/// Sets up tracing with a daily rotating file appender in the user's local
/// data directory. The filter comes from `level` when given, otherwise from
/// `RUST_LOG`, otherwise from [`DEFAULT_LOG_FILTER`].
///
/// # Log Directory
///
/// - Linux: `~/.local/share/lazyusers/logs/`
/// - macOS: `~/Library/Application Support/lazyusers/logs/`
/// - Windows: `C:\Users\<User>\AppData\Local\lazyusers\logs\`
///
/// # Errors
///
/// Returns an error if `level` is not a valid filter, if the log directory
/// cannot be determined or created, or if a global subscriber is already
/// installed.
pub fn init(level: Option<&str>) -> anyhow::Result<()> {
    let filter = build_filter(level)?;

    let log_dir = get_log_directory()?;
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "lazyusers.log");

    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter);

    tracing::subscriber::set_global_default(subscriber)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "LazyUsers starting up");
    tracing::debug!(log_dir = %log_dir.display(), "Log directory");

    Ok(())
}

/// Build the level filter, preferring an explicit level over the environment.
///
/// An explicit level must parse. A missing or broken `RUST_LOG` falls back to
/// [`DEFAULT_LOG_FILTER`].
fn build_filter(level: Option<&str>) -> anyhow::Result<EnvFilter> {
    match level {
        Some(level) => EnvFilter::try_new(level)
            .with_context(|| format!("Invalid log filter '{}'", level)),
        None => Ok(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))),
    }
}

/// Get the log directory path.
fn get_log_directory() -> anyhow::Result<PathBuf> {
    let base_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))?;

    Ok(base_dir.join("lazyusers").join("logs"))
}

/// Get the path where logs are stored.
#[cfg(test)]
pub fn log_directory() -> Option<PathBuf> {
    get_log_directory().ok()
}

/// Log application shutdown.
pub fn shutdown() {
    tracing::info!("LazyUsers shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_directory_has_expected_structure() {
        if let Some(dir) = log_directory() {
            assert!(dir.ends_with("lazyusers/logs"));
        }
    }

    #[test]
    fn test_build_filter_with_explicit_level() {
        let filter = build_filter(Some("lazyusers=debug")).unwrap();
        assert!(filter.to_string().contains("lazyusers=debug"));
    }

    #[test]
    fn test_build_filter_rejects_invalid_level() {
        let err = build_filter(Some("lazyusers=notalevel")).unwrap_err();
        assert!(format!("{:#}", err).contains("Invalid log filter 'lazyusers=notalevel'"));
    }

    #[test]
    fn test_init_reports_invalid_level_before_installing() {
        // Fails on the filter, so no global subscriber is set by this test
        assert!(init(Some("lazyusers=notalevel")).is_err());
    }
}
