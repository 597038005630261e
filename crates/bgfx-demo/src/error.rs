#![forbid(unsafe_code)]

//! Top-level errors of the viewer binary.

use std::fmt;
use std::io;

/// Anything that stops the viewer before or during its run.
#[derive(Debug)]
pub enum DemoError {
    /// Terminal or file I/O.
    Io(io::Error),
    /// The log subscriber could not be installed.
    Logging(String),
    /// Writing the snapshot image failed.
    Snapshot(image::ImageError),
    /// Headless mode needs at least one background.
    NoImages,
}

impl fmt::Display for DemoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "I/O error: {err}"),
            Self::Logging(msg) => write!(f, "failed to initialize logging: {msg}"),
            Self::Snapshot(err) => write!(f, "failed to write snapshot: {err}"),
            Self::NoImages => f.write_str("no images to render"),
        }
    }
}

impl std::error::Error for DemoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Snapshot(err) => Some(err),
            Self::Logging(_) | Self::NoImages => None,
        }
    }
}

impl From<io::Error> for DemoError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<image::ImageError> for DemoError {
    fn from(err: image::ImageError) -> Self {
        Self::Snapshot(err)
    }
}
