//! Logging bootstrap.

use std::env;
use std::fs::{File, OpenOptions};
use std::io;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logging initialization errors.
#[derive(Debug, Clone)]
pub enum InitError {
    /// The level filter string didn't parse.
    InvalidFilter(String),
    /// `PUENTE_LOG_FORMAT` was neither `pretty` nor `json`.
    InvalidFormat(String),
    /// The log file couldn't be opened.
    LogFile(String),
    /// Installing the subscriber failed.
    Subscriber(String),
}

impl InitError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            InitError::InvalidFilter(_) => "LOG_INVALID_FILTER",
            InitError::InvalidFormat(_) => "LOG_INVALID_FORMAT",
            InitError::LogFile(_) => "LOG_FILE_OPEN_FAILED",
            InitError::Subscriber(_) => "LOG_SUBSCRIBER_FAILED",
        }
    }
}

impl std::fmt::Display for InitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InitError::InvalidFilter(detail) => {
                write!(f, "[{}] Invalid log filter: {}", self.code(), detail)
            }
            InitError::InvalidFormat(format) => write!(
                f,
                "[{}] Invalid PUENTE_LOG_FORMAT \"{}\" (expected 'json' or 'pretty')",
                self.code(),
                format
            ),
            InitError::LogFile(detail) => {
                write!(f, "[{}] Failed to open log file: {}", self.code(), detail)
            }
            InitError::Subscriber(detail) => write!(
                f,
                "[{}] Failed to initialize logging: {}",
                self.code(),
                detail
            ),
        }
    }
}

impl std::error::Error for InitError {}

fn open_log_file(path: &str) -> Result<File, InitError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|err| InitError::LogFile(err.to_string()))
}

/// Enable structured logging for puente.
///
/// When `level` is None, this reads `PUENTE_TRACE` if set; the default
/// level is `off`. `PUENTE_LOG_FORMAT` selects `pretty` (default) or `json`
/// output on stderr, and `PUENTE_LOG_FILE` adds a non-ANSI file layer.
/// Returns true when logging is initialized, false if a subscriber is
/// already configured.
pub fn init(level: Option<&str>) -> Result<bool, InitError> {
    if tracing::dispatcher::has_been_set() {
        return Ok(false);
    }

    let level_value = level
        .map(str::to_string)
        .or_else(|| env::var("PUENTE_TRACE").ok())
        .unwrap_or_else(|| "off".to_string());

    let filter = if level_value.eq_ignore_ascii_case("off") {
        EnvFilter::default().add_directive(LevelFilter::OFF.into())
    } else {
        EnvFilter::try_new(&level_value).map_err(|err| InitError::InvalidFilter(err.to_string()))?
    };

    let format = env::var("PUENTE_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());
    let log_file = env::var("PUENTE_LOG_FILE").ok();
    let use_json = format.eq_ignore_ascii_case("json");

    if !use_json && !format.eq_ignore_ascii_case("pretty") {
        return Err(InitError::InvalidFormat(format));
    }

    let map_init_err = |err: tracing_subscriber::util::TryInitError| {
        InitError::Subscriber(err.to_string())
    };

    if use_json {
        let stderr_layer = tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .json();
        let base = tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer);
        if let Some(path) = log_file {
            let file_layer = tracing_subscriber::fmt::layer()
                .with_writer(open_log_file(&path)?)
                .with_ansi(false)
                .json();
            base.with(file_layer).try_init().map_err(map_init_err)?;
        } else {
            base.try_init().map_err(map_init_err)?;
        }
    } else {
        let stderr_layer = tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .pretty();
        let base = tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer);
        if let Some(path) = log_file {
            let file_layer = tracing_subscriber::fmt::layer()
                .with_writer(open_log_file(&path)?)
                .with_ansi(false)
                .pretty();
            base.with(file_layer).try_init().map_err(map_init_err)?;
        } else {
            base.try_init().map_err(map_init_err)?;
        }
    }

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_error_codes_are_stable() {
        assert_eq!(
            InitError::InvalidFormat("xml".to_string()).code(),
            "LOG_INVALID_FORMAT"
        );
        let rendered = InitError::InvalidFormat("xml".to_string()).to_string();
        assert!(rendered.contains("xml"));
        assert!(rendered.contains("pretty"));
    }
}
