#![forbid(unsafe_code)]

//! Global phase accumulators shared by every background.
//!
//! The two angles advance once per sampled pixel and survive image switches,
//! so the wave keeps its phase when the user flips between backgrounds.

/// Angle increment (degrees per pixel) restored by a reset.
pub const DEFAULT_ANGLE_INCREASE: f64 = 0.05;

/// Scanline-factor step restored by a reset.
pub const DEFAULT_SCANLINE_FACTOR_DELTA: f64 = 0.025;

/// Angles are reflected once they pass this value.
pub const ANGLE_LIMIT: f64 = 360.0;

/// Phase accumulators and the global tunables that drive them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectState {
    /// Horizontal phase, degrees.
    pub angle_x: f64,
    /// Vertical phase, degrees.
    pub angle_y: f64,
    pub angle_inc_x: f64,
    pub angle_inc_y: f64,
    pub scanline_factor_delta_x: f64,
    pub scanline_factor_delta_y: f64,
}

impl Default for EffectState {
    fn default() -> Self {
        Self {
            angle_x: 0.0,
            angle_y: 0.0,
            angle_inc_x: DEFAULT_ANGLE_INCREASE,
            angle_inc_y: DEFAULT_ANGLE_INCREASE,
            scanline_factor_delta_x: DEFAULT_SCANLINE_FACTOR_DELTA,
            scanline_factor_delta_y: DEFAULT_SCANLINE_FACTOR_DELTA,
        }
    }
}

impl EffectState {
    /// Restore the increments and deltas. The phase angles are left alone.
    pub fn restore_baseline(&mut self) {
        self.angle_inc_x = DEFAULT_ANGLE_INCREASE;
        self.angle_inc_y = DEFAULT_ANGLE_INCREASE;
        self.scanline_factor_delta_x = DEFAULT_SCANLINE_FACTOR_DELTA;
        self.scanline_factor_delta_y = DEFAULT_SCANLINE_FACTOR_DELTA;
    }

    /// Advance both angles by one pixel step, reflecting at [`ANGLE_LIMIT`].
    #[inline]
    pub fn step(&mut self) {
        self.angle_x = reflect(self.angle_x + self.angle_inc_x);
        self.angle_y = reflect(self.angle_y + self.angle_inc_y);
    }

    /// Clamp both angle increments to be non-negative.
    pub fn clamp_increments(&mut self) {
        if self.angle_inc_x < 0.0 {
            self.angle_inc_x = 0.0;
        }
        if self.angle_inc_y < 0.0 {
            self.angle_inc_y = 0.0;
        }
    }
}

/// `360 - a` once `a` exceeds 360. The result can be negative.
#[inline]
pub fn reflect(angle: f64) -> f64 {
    if angle > ANGLE_LIMIT {
        ANGLE_LIMIT - angle
    } else {
        angle
    }
}
