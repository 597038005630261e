#![forbid(unsafe_code)]

//! One loaded field-map background.
//!
//! Pixels, palette and palette index map are fixed at construction. Motion
//! and the palette cycler are the mutable runtime state that the renderer and
//! parameter edits act on.

use std::collections::BTreeSet;
use std::fmt;

use bgfx_render::{ColorGrid, Rgb};

use crate::cycler::{CycleMode, PaletteCycler};
use crate::palette::PaletteMap;
use crate::warp::Motion;

/// Width and height every background must have.
pub const FIELD_SIZE: usize = 256;

/// Rejected background construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackgroundError {
    /// The pixel grid is not `FIELD_SIZE` x `FIELD_SIZE`.
    Dimensions { width: usize, height: usize },
}

impl fmt::Display for BackgroundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackgroundError::Dimensions { width, height } => write!(
                f,
                "background must be {FIELD_SIZE}x{FIELD_SIZE}, got {width}x{height}"
            ),
        }
    }
}

impl std::error::Error for BackgroundError {}

/// How a background's colors are resolved when rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Output is the sampled source pixel.
    Static,
    /// Mapped pixels are replaced by the rotated palette entry.
    Animated,
}

/// A background image and its effect state.
#[derive(Debug, Clone)]
pub struct Background {
    name: String,
    pixels: ColorGrid,
    palette: Vec<Rgb>,
    indices: PaletteMap,
    cycle_rate: u32,
    cycler: PaletteCycler,
    motion: Motion,
}

impl Background {
    /// A static background with no palette.
    ///
    /// # Errors
    ///
    /// Returns [`BackgroundError::Dimensions`] unless `pixels` is
    /// [`FIELD_SIZE`] square.
    pub fn new(name: impl Into<String>, pixels: ColorGrid) -> Result<Self, BackgroundError> {
        let (width, height) = pixels.dims();
        if width != FIELD_SIZE || height != FIELD_SIZE {
            return Err(BackgroundError::Dimensions { width, height });
        }
        Ok(Self {
            name: name.into(),
            indices: PaletteMap::unmapped(width, height),
            pixels,
            palette: Vec::new(),
            cycle_rate: 0,
            cycler: PaletteCycler::default(),
            motion: Motion::default(),
        })
    }

    /// Attach a palette and build the index map.
    ///
    /// `cycle_rate` is in cycles per second; 0 disables cycling.
    #[must_use]
    pub fn with_palette(mut self, palette: Vec<Rgb>, cycle_rate: u32, ping_pong: bool) -> Self {
        self.indices = PaletteMap::build(&self.pixels, &palette);
        self.palette = palette;
        self.cycle_rate = cycle_rate;
        self.cycler = PaletteCycler::new(CycleMode::from_ping_pong(ping_pong));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn pixels(&self) -> &ColorGrid {
        &self.pixels
    }

    #[inline]
    pub fn palette(&self) -> &[Rgb] {
        &self.palette
    }

    #[inline]
    pub fn indices(&self) -> &PaletteMap {
        &self.indices
    }

    #[inline]
    pub const fn cycle_rate(&self) -> u32 {
        self.cycle_rate
    }

    /// Seconds between palette ticks, or `None` when cycling is off.
    pub fn cycle_interval(&self) -> Option<f64> {
        (self.cycle_rate > 0).then(|| 1.0 / f64::from(self.cycle_rate))
    }

    /// Static when there is no palette or the cycle rate is 0.
    pub fn render_mode(&self) -> RenderMode {
        if self.palette.is_empty() || self.cycle_rate == 0 {
            RenderMode::Static
        } else {
            RenderMode::Animated
        }
    }

    #[inline]
    pub fn cycler(&self) -> &PaletteCycler {
        &self.cycler
    }

    #[inline]
    pub fn cycler_mut(&mut self) -> &mut PaletteCycler {
        &mut self.cycler
    }

    #[inline]
    pub fn motion(&self) -> &Motion {
        &self.motion
    }

    #[inline]
    pub fn motion_mut(&mut self) -> &mut Motion {
        &mut self.motion
    }

    /// Advance the cycler one step. Does nothing without a palette.
    pub fn cycle_palette(&mut self) {
        if !self.palette.is_empty() {
            self.cycler.tick(self.palette.len());
        }
    }

    /// Add the scroll speeds to the scroll position.
    pub fn advance_scroll(&mut self) {
        let (w, h) = self.pixels.dims();
        self.motion.advance_scroll(w, h);
    }

    /// Distinct colors of the source pixels, in ascending `(r, g, b)` order.
    pub fn distinct_colors(&self) -> Vec<Rgb> {
        self.pixels
            .as_slice()
            .iter()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Palette as currently displayed: entry `i` shows
    /// `palette[(i + offset) mod len]`.
    pub fn rotated_palette(&self) -> Vec<Rgb> {
        let len = self.palette.len();
        if len == 0 {
            return Vec::new();
        }
        let offset = self.cycler.offset() as usize;
        (0..len).map(|i| self.palette[(i + offset) % len]).collect()
    }
}
