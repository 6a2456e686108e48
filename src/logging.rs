//! Logging setup.
//!
//! Events go to three sinks:
//!
//! | Sink | Level | Content |
//! |------|-------|---------|
//! | `<dir>/success.log` | `RUST_LOG` or `[logging].level` | lifecycle, every search with timing |
//! | `<dir>/error.log` | `ERROR` | command failures |
//! | stderr | `WARN` | corpus warnings, failures |
//!
//! Stdout is left to command output. File writers are non-blocking; keep the
//! returned [`LogGuards`] alive until exit so buffered lines are flushed.
//!
//! A log file that cannot be opened disables that sink only. The failure is
//! reported on stderr and the command carries on.

use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::LoggingConfig;

/// Flush guards for the file writers that were opened.
pub struct LogGuards {
    _guards: Vec<WorkerGuard>,
}

/// Install the global subscriber. Call once, at the top of `main`.
///
/// Fails only on an invalid filter or a second initialization.
pub fn init(config: &LoggingConfig) -> Result<LogGuards> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level)
            .with_context(|| format!("Invalid logging.level: {}", config.level))?,
    };

    let mut guards = Vec::new();
    let mut failures = Vec::new();
    let mut open = |name: &str| match file_writer(&config.dir, name) {
        Ok((writer, guard)) => {
            guards.push(guard);
            Some(writer)
        }
        Err(e) => {
            failures.push(e);
            None
        }
    };
    let success_writer = open("success.log");
    let error_writer = open("error.log");

    let success_layer = success_writer.map(|writer| {
        tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_target(false)
            .with_filter(env_filter)
    });

    let error_layer = error_writer.map(|writer| {
        tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_filter(LevelFilter::ERROR)
    });

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .with_filter(LevelFilter::WARN);

    tracing_subscriber::registry()
        .with(success_layer)
        .with(error_layer)
        .with(stderr_layer)
        .try_init()
        .with_context(|| "Failed to install log subscriber")?;

    for e in failures {
        tracing::warn!(error = %format!("{:#}", e), "file logging disabled");
    }

    Ok(LogGuards { _guards: guards })
}

fn file_writer(dir: &Path, name: &str) -> Result<(NonBlocking, WorkerGuard)> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(name)
        .build(dir)
        .with_context(|| format!("Failed to open log file: {}", dir.join(name).display()))?;

    Ok(tracing_appender::non_blocking(appender))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_writer_creates_directory_and_file() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("nested").join("logs");

        let (_writer, _guard) = file_writer(&dir, "success.log").unwrap();
        assert!(dir.join("success.log").is_file());
    }

    #[test]
    fn test_file_writer_reports_unopenable_file() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("success.log")).unwrap();

        let err = file_writer(tmp.path(), "success.log").unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to open log file"));
    }
}
