#![forbid(unsafe_code)]

//! Asset loading errors.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Why a palette entry or setting in a sidecar was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteProblem {
    /// Color entry `index` does not have exactly three components.
    Arity { index: usize, len: usize },
    /// Color entry `index` has a component outside `0..=255`.
    Component { index: usize, value: i64 },
    /// `cycleRate` is negative.
    NegativeCycleRate(i64),
    /// `cycleRate` does not fit in a `u32`.
    CycleRateTooLarge(i64),
}

impl fmt::Display for PaletteProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arity { index, len } => {
                write!(f, "color {index} has {len} components, expected 3")
            }
            Self::Component { index, value } => {
                write!(f, "color {index} has component {value} outside 0..=255")
            }
            Self::NegativeCycleRate(rate) => write!(f, "cycleRate {rate} is negative"),
            Self::CycleRateTooLarge(rate) => {
                write!(f, "cycleRate {rate} exceeds {}", u32::MAX)
            }
        }
    }
}

/// Failure to turn a file into a [`bgfx_fx::Background`].
#[derive(Debug)]
pub enum AssetError {
    Io { path: PathBuf, source: io::Error },
    Decode { path: PathBuf, source: image::ImageError },
    Dimensions { path: PathBuf, width: usize, height: usize },
    Sidecar { path: PathBuf, source: serde_json::Error },
    Palette { path: PathBuf, problem: PaletteProblem },
}

impl AssetError {
    /// The file the error refers to.
    pub fn path(&self) -> &Path {
        match self {
            Self::Io { path, .. }
            | Self::Decode { path, .. }
            | Self::Dimensions { path, .. }
            | Self::Sidecar { path, .. }
            | Self::Palette { path, .. } => path,
        }
    }
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "'{}': {source}", path.display()),
            Self::Decode { path, source } => {
                write!(f, "'{}': failed to decode image: {source}", path.display())
            }
            Self::Dimensions {
                path,
                width,
                height,
            } => write!(
                f,
                "'{}': wrong image size {width}x{height}, backgrounds must be {size}x{size}",
                path.display(),
                size = bgfx_fx::FIELD_SIZE
            ),
            Self::Sidecar { path, source } => {
                write!(f, "'{}': malformed palette file: {source}", path.display())
            }
            Self::Palette { path, problem } => {
                write!(f, "'{}': invalid palette: {problem}", path.display())
            }
        }
    }
}

impl std::error::Error for AssetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Decode { source, .. } => Some(source),
            Self::Sidecar { source, .. } => Some(source),
            Self::Dimensions { .. } | Self::Palette { .. } => None,
        }
    }
}
