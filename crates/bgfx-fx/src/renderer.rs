#![forbid(unsafe_code)]

//! Full-frame effect pass.
//!
//! Drives the [`DistortionSampler`] over the active background and resolves
//! each sampled pixel to an output color:
//!
//! - **Static**: the source pixel.
//! - **Animated**: unmapped pixels show the source pixel; a pixel mapped to
//!   palette index `i` shows `palette[(i + offset) mod len]`.
//!
//! # No Per-Frame Allocations
//!
//! The output grid is caller-owned and only reallocated when its dimensions
//! differ from the background's.

use bgfx_render::{ColorGrid, Grid, Rgb};

use crate::background::{Background, RenderMode};
use crate::effect_state::EffectState;
use crate::warp::DistortionSampler;

/// Renders backgrounds into an output grid.
#[derive(Debug, Default)]
pub struct EffectRenderer {
    frames: u64,
}

impl EffectRenderer {
    pub const fn new() -> Self {
        Self { frames: 0 }
    }

    /// Frames rendered so far.
    #[inline]
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// Render one frame of `background` into `out`.
    ///
    /// Advances the phase angles in `state` and the background's scanline
    /// offsets. With no background the call does nothing and returns `false`.
    pub fn render(
        &mut self,
        background: Option<&mut Background>,
        state: &mut EffectState,
        out: &mut ColorGrid,
    ) -> bool {
        let Some(background) = background else {
            return false;
        };

        let (w, h) = background.pixels().dims();
        if out.dims() != (w, h) {
            *out = Grid::new(w, h, Rgb::BLACK);
        }

        let sampler = DistortionSampler::new(w, h);
        let mut motion = *background.motion();
        let mode = background.render_mode();
        let pixels = background.pixels();

        match mode {
            RenderMode::Static => {
                sampler.sample_frame(state, &mut motion, |s| {
                    out.set(s.x, s.y, pixels.at(s.src_x, s.src_y));
                });
            }
            RenderMode::Animated => {
                let palette = background.palette();
                let indices = background.indices();
                let len = palette.len();
                let offset = background.cycler().offset() as usize;
                sampler.sample_frame(state, &mut motion, |s| {
                    let color = match indices.index(s.src_x, s.src_y) {
                        Some(idx) => palette[(idx as usize + offset) % len],
                        None => pixels.at(s.src_x, s.src_y),
                    };
                    out.set(s.x, s.y, color);
                });
            }
        }

        *background.motion_mut() = motion;
        self.frames += 1;
        true
    }
}
