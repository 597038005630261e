#![forbid(unsafe_code)]

//! Background files on disk.
//!
//! A background is a 256x256 BMP. An optional JSON sidecar with the same
//! stem carries its palette (see [`crate::sidecar`]).

use std::fs;
use std::path::{Path, PathBuf};

use bgfx_fx::{Background, BackgroundError};
use bgfx_render::{ColorGrid, Grid, Rgb};

use crate::error::AssetError;
use crate::sidecar::{self, PaletteSpec, SidecarError, SidecarPalette};

/// Extension of loadable background images, compared case-insensitively.
pub const IMAGE_EXTENSION: &str = "bmp";

/// `water.bmp` -> `water.json`.
#[must_use]
pub fn sidecar_path(image: &Path) -> PathBuf {
    image.with_extension("json")
}

/// Display name of a background: its file name.
fn background_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Decode an image file into an RGB grid.
///
/// # Errors
///
/// [`AssetError::Io`] when the file cannot be opened, [`AssetError::Decode`]
/// when its contents are not a supported image.
pub fn decode_pixels(path: &Path) -> Result<ColorGrid, AssetError> {
    let reader = image::ImageReader::open(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = reader.with_guessed_format().map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let rgb = reader
        .decode()
        .map_err(|source| AssetError::Decode {
            path: path.to_path_buf(),
            source,
        })?
        .to_rgb8();

    let (width, height) = rgb.dimensions();
    Ok(Grid::from_fn(width as usize, height as usize, |x, y| {
        let [r, g, b] = rgb.get_pixel(x as u32, y as u32).0;
        Rgb::new(r, g, b)
    }))
}

/// Read the sidecar next to `image`, if there is one.
///
/// `Ok(None)` means the background is static.
fn read_palette(image: &Path) -> Result<Option<PaletteSpec>, AssetError> {
    let path = sidecar_path(image);
    let meta = match fs::metadata(&path) {
        Ok(meta) => meta,
        Err(_) => {
            tracing::info!(image = %image.display(), "no palette file, background is static");
            return Ok(None);
        }
    };
    if !meta.is_file() {
        tracing::warn!(path = %path.display(), "palette path is not a regular file, ignoring");
        return Ok(None);
    }

    let text = fs::read_to_string(&path).map_err(|source| AssetError::Io {
        path: path.clone(),
        source,
    })?;
    match sidecar::parse_sidecar(&text) {
        Ok(SidecarPalette::Palette(spec)) => {
            if spec.cycle_rate == 0 {
                tracing::warn!(path = %path.display(), "palette cycleRate is 0, colors will not cycle");
            }
            Ok(Some(spec))
        }
        Ok(SidecarPalette::MissingSection) => {
            tracing::warn!(path = %path.display(), "palette file has no palette section");
            Ok(None)
        }
        Ok(SidecarPalette::NoColors) => {
            tracing::warn!(path = %path.display(), "palette has no colors");
            Ok(None)
        }
        Err(SidecarError::Json(source)) => Err(AssetError::Sidecar { path, source }),
        Err(SidecarError::Palette(problem)) => Err(AssetError::Palette { path, problem }),
    }
}

/// Load one background and its optional palette.
///
/// # Errors
///
/// Any [`AssetError`]: unreadable or undecodable image, wrong dimensions, or a
/// sidecar that exists but is malformed.
pub fn load_background(path: &Path) -> Result<Background, AssetError> {
    let pixels = decode_pixels(path)?;
    let background = Background::new(background_name(path), pixels).map_err(|err| match err {
        BackgroundError::Dimensions { width, height } => AssetError::Dimensions {
            path: path.to_path_buf(),
            width,
            height,
        },
    })?;

    let background = match read_palette(path)? {
        Some(spec) => background.with_palette(spec.colors, spec.cycle_rate, spec.ping_pong),
        None => background,
    };
    tracing::debug!(
        path = %path.display(),
        palette = background.palette().len(),
        cycle_rate = background.cycle_rate(),
        "background loaded"
    );
    Ok(background)
}

/// Load every background in `dir`, in path order.
///
/// Files that fail to load are logged and skipped. A missing directory yields
/// an empty list.
#[must_use]
pub fn discover(dir: &Path) -> Vec<Background> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) if dir.is_dir() => entries,
        _ => {
            tracing::info!(dir = %dir.display(), "background directory not found");
            return Vec::new();
        }
    };

    let mut paths: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_ok_and(|t| t.is_file()))
        .map(|entry| entry.path())
        .collect();
    paths.sort();

    let mut backgrounds = Vec::new();
    for path in paths {
        let Some(ext) = path.extension() else {
            tracing::warn!(path = %path.display(), "file has no extension, skipping");
            continue;
        };
        if !ext.eq_ignore_ascii_case(IMAGE_EXTENSION) {
            continue;
        }
        match load_background(&path) {
            Ok(bg) => backgrounds.push(bg),
            Err(err) => tracing::warn!("skipping background: {err}"),
        }
    }
    tracing::info!(dir = %dir.display(), count = backgrounds.len(), "backgrounds loaded");
    backgrounds
}
