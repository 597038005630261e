#![forbid(unsafe_code)]

//! Log subscriber setup.
//!
//! The terminal is in raw mode while the viewer runs, so logs go to a file.
//! Headless runs log to stderr.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::DemoError;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "BGFX_LOG";

/// Filter used when `BGFX_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "info";

/// Where log lines are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    File(PathBuf),
    Stderr,
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber.
///
/// # Errors
///
/// [`DemoError::Io`] if the log file cannot be created,
/// [`DemoError::Logging`] if a subscriber is already installed.
pub fn init(target: &LogTarget) -> Result<(), DemoError> {
    let builder = tracing_subscriber::fmt().with_env_filter(filter());
    let result = match target {
        LogTarget::File(path) => {
            let file = File::create(path)?;
            builder
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init()
        }
        LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init(),
    };
    result.map_err(|err| DemoError::Logging(err.to_string()))
}
