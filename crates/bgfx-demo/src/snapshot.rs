#![forbid(unsafe_code)]

//! Headless rendering to a PNG file.

use std::path::Path;

use bgfx_fx::{FIELD_SIZE, Stage};
use bgfx_render::{ColorGrid, Grid, Rgb};
use image::{ImageFormat, RgbImage};

use crate::error::DemoError;

/// Fixed clock step for headless frames.
pub const SNAPSHOT_DT: f64 = 1.0 / 60.0;

/// Render `frames` frames (at least one) on a fixed clock and return the
/// last one. `None` when the stage has no images.
pub fn render_frames(stage: &mut Stage, frames: u32) -> Option<ColorGrid> {
    let mut out = Grid::new(FIELD_SIZE, FIELD_SIZE, Rgb::BLACK);
    let mut last = None;
    for _ in 0..frames.max(1) {
        if !stage.render(&mut out) {
            return None;
        }
        last = Some(out.clone());
        stage.end_frame(SNAPSHOT_DT);
    }
    last
}

/// Convert a color grid to an `image` buffer.
pub fn to_image(grid: &ColorGrid) -> RgbImage {
    let (w, h) = grid.dims();
    RgbImage::from_fn(w as u32, h as u32, |x, y| {
        let c = grid.at(x as usize, y as usize);
        image::Rgb([c.r, c.g, c.b])
    })
}

/// Run headless and write the last frame to `path` as PNG.
///
/// # Errors
///
/// [`DemoError::NoImages`] without backgrounds, [`DemoError::Snapshot`] if
/// the file cannot be written.
pub fn write_snapshot(stage: &mut Stage, frames: u32, path: &Path) -> Result<(), DemoError> {
    let frame = render_frames(stage, frames).ok_or(DemoError::NoImages)?;
    to_image(&frame).save_with_format(path, ImageFormat::Png)?;
    tracing::info!(path = %path.display(), frames, "snapshot written");
    Ok(())
}
