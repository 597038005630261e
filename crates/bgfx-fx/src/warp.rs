#![forbid(unsafe_code)]

//! Scanline distortion sampler.
//!
//! For every output pixel, in strict row-major order, the sampler picks the
//! source pixel to show. Two sinusoidal phase accumulators drive a per-pixel
//! horizontal shift and a per-row vertical shift on top of a plain scroll.
//!
//! # Algorithm
//!
//! ```text
//! for y in rows:
//!     src_y = (y + scroll_y + offset_y) mod height      // offset_y from the previous row
//!     for x in columns:
//!         offset_x = shift(angle_x, factor_x, width)
//!         src_x = (x + scroll_x + offset_x) mod width
//!         emit (x, y) <- (src_x, src_y)
//!         angle_x += inc_x; angle_y += inc_y           // reflected at 360
//!     offset_y = shift(angle_y, factor_y, height)
//!
//! shift(a, f, n) = floor(sin(a deg) * f), plus (n - 1) when negative
//! ```
//!
//! The `(n - 1)` near-wrap is deliberate: a shift of -1 lands on column
//! `n - 2`, not `n - 1`.
//!
//! # Determinism
//!
//! Output depends only on the [`EffectState`] and [`Motion`] passed in; both
//! are advanced in place so consecutive frames continue the wave.

use crate::effect_state::EffectState;

/// Per-background motion state consumed and advanced by the sampler.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Motion {
    /// Scroll position, always in `[0, width)`.
    pub scroll_pos_x: usize,
    /// Scroll position, always in `[0, height)`.
    pub scroll_pos_y: usize,
    /// Pixels per frame added to `scroll_pos_x`.
    pub scroll_speed_h: i32,
    /// Pixels per frame added to `scroll_pos_y`.
    pub scroll_speed_v: i32,
    /// Last computed horizontal shift.
    pub scanline_offset_x: i32,
    /// Last computed vertical shift; carried into the next frame's first row.
    pub scanline_offset_y: i32,
    pub scanline_factor_x: f64,
    pub scanline_factor_y: f64,
}

impl Motion {
    /// Add the scroll speeds to the scroll positions, wrapping into range.
    pub fn advance_scroll(&mut self, width: usize, height: usize) {
        self.scroll_pos_x = wrap(self.scroll_pos_x as i64 + i64::from(self.scroll_speed_h), width);
        self.scroll_pos_y = wrap(self.scroll_pos_y as i64 + i64::from(self.scroll_speed_v), height);
    }
}

/// One sampled pixel: output position and the source position it shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    pub x: usize,
    pub y: usize,
    pub src_x: usize,
    pub src_y: usize,
}

/// Shift for phase `angle` (degrees) scaled by `factor`, with the near-wrap
/// applied to negative values.
#[inline]
pub fn scanline_offset(angle: f64, factor: f64, dim: usize) -> i32 {
    // `as` saturates and maps NaN to 0.
    let shift = (angle.to_radians().sin() * factor).floor() as i32;
    if shift < 0 {
        shift.saturating_add(dim.saturating_sub(1) as i32)
    } else {
        shift
    }
}

/// Euclidean wrap of `value` into `[0, n)`. `n == 0` yields 0.
#[inline]
pub fn wrap(value: i64, n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    value.rem_euclid(n as i64) as usize
}

/// Row-major walker that maps output pixels to source pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistortionSampler {
    width: usize,
    height: usize,
}

impl DistortionSampler {
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    #[inline]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Walk one frame, calling `visit` for every output pixel in row-major
    /// order. Advances `state`'s angles once per pixel and updates the
    /// scanline offsets in `motion`.
    pub fn sample_frame(
        &self,
        state: &mut EffectState,
        motion: &mut Motion,
        mut visit: impl FnMut(Sample),
    ) {
        let (w, h) = (self.width, self.height);
        if w == 0 || h == 0 {
            return;
        }

        for y in 0..h {
            let src_y = wrap(
                y as i64 + motion.scroll_pos_y as i64 + i64::from(motion.scanline_offset_y),
                h,
            );
            for x in 0..w {
                motion.scanline_offset_x = scanline_offset(state.angle_x, motion.scanline_factor_x, w);
                let src_x = wrap(
                    x as i64 + motion.scroll_pos_x as i64 + i64::from(motion.scanline_offset_x),
                    w,
                );
                visit(Sample { x, y, src_x, src_y });
                state.step();
            }
            motion.scanline_offset_y = scanline_offset(state.angle_y, motion.scanline_factor_y, h);
        }
    }
}
