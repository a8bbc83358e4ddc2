//! Logging setup: stdout plus an append-only operations log.
//!
//! Every `tracing` event goes to two places:
//!
//! - stdout, formatted for the operator watching the console;
//! - the log file (no ANSI colours), opened in append mode so earlier runs
//!   are kept.
//!
//! The level comes from `RUST_LOG` when set, otherwise from the configured
//! `general.log_level`.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log level {level:?}: {source}")]
    Level {
        level: String,
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },

    #[error("cannot open log file {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("a global logger is already installed: {0}")]
    AlreadyInitialised(#[from] tracing_subscriber::util::TryInitError),
}

/// Builds the level filter: `RUST_LOG` wins over the configured level.
///
/// # Errors
///
/// Returns [`LoggingError::Level`] if `level` is not a valid filter directive
/// and `RUST_LOG` is unset or invalid.
pub fn env_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(level).map_err(|source| LoggingError::Level {
        level: level.to_string(),
        source,
    })
}

/// Opens (creating if needed) the log file for appending.
///
/// # Errors
///
/// Returns [`LoggingError::File`] when the file or its directory cannot be
/// created.
pub fn open_log_file(path: &Path) -> Result<File, LoggingError> {
    let file_error = |source| LoggingError::File {
        path: path.to_path_buf(),
        source,
    };
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(file_error)?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(file_error)
}

/// Installs the global subscriber.  Call once, from `main`.
///
/// `log_file = None` logs to stdout only.
///
/// # Errors
///
/// See [`env_filter`] and [`open_log_file`]; also fails if a global
/// subscriber is already set.
pub fn init_logging(level: &str, log_file: Option<&Path>) -> Result<(), LoggingError> {
    let filter = env_filter(level)?;

    let file_layer = match log_file {
        Some(path) => Some(
            fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(Mutex::new(open_log_file(path)?)),
        ),
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(file_layer)
        .try_init()?;
    Ok(())
}
