#![forbid(unsafe_code)]

//! Tunable parameters and the edit cursor.
//!
//! | Parameter | Owner | Step |
//! |-----------|-------|------|
//! | `ScrollSpeedH/V` | background | 1 |
//! | `AngleIncreaseX/Y` | global | 0.01 |
//! | `ScanlineFactorDeltaX/Y` | global | 0.005 |
//! | `ScanlineFactorX/Y` | background | current delta |

use rand::Rng;

use crate::background::Background;
use crate::effect_state::EffectState;
use crate::warp::Motion;

/// Angle increment step.
pub const ANGLE_INCREASE_STEP: f64 = 0.01;
/// Scanline-factor delta step.
pub const SCANLINE_DELTA_STEP: f64 = 0.005;
/// Random scroll speeds are drawn from `-RANDOM_SCROLL_SPEED..=RANDOM_SCROLL_SPEED`.
pub const RANDOM_SCROLL_SPEED: i32 = 5;
/// Random scanline factors are drawn from `[0, RANDOM_SCANLINE_FACTOR)`.
pub const RANDOM_SCANLINE_FACTOR: f64 = 10.0;

/// One editable knob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    ScrollSpeedH,
    ScrollSpeedV,
    AngleIncreaseX,
    AngleIncreaseY,
    ScanlineFactorDeltaX,
    ScanlineFactorDeltaY,
    ScanlineFactorX,
    ScanlineFactorY,
}

impl Parameter {
    /// All parameters in cursor order.
    pub const ALL: [Parameter; 8] = [
        Parameter::ScrollSpeedH,
        Parameter::ScrollSpeedV,
        Parameter::AngleIncreaseX,
        Parameter::AngleIncreaseY,
        Parameter::ScanlineFactorDeltaX,
        Parameter::ScanlineFactorDeltaY,
        Parameter::ScanlineFactorX,
        Parameter::ScanlineFactorY,
    ];

    /// Position in [`Parameter::ALL`].
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|&p| p == self).unwrap_or(0)
    }

    /// Next parameter, clamped at the last one.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1).min(Self::ALL.len() - 1)]
    }

    /// Previous parameter, clamped at the first one.
    pub fn prev(self) -> Self {
        Self::ALL[self.index().saturating_sub(1)]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Parameter::ScrollSpeedH => "ScrollSpeedH",
            Parameter::ScrollSpeedV => "ScrollSpeedV",
            Parameter::AngleIncreaseX => "AngleIncreaseX",
            Parameter::AngleIncreaseY => "AngleIncreaseY",
            Parameter::ScanlineFactorDeltaX => "ScanlineFactorDeltaX",
            Parameter::ScanlineFactorDeltaY => "ScanlineFactorDeltaY",
            Parameter::ScanlineFactorX => "ScanlineFactorX",
            Parameter::ScanlineFactorY => "ScanlineFactorY",
        }
    }

    /// Whether the value lives on the background rather than in [`EffectState`].
    pub const fn is_per_background(self) -> bool {
        matches!(
            self,
            Parameter::ScrollSpeedH
                | Parameter::ScrollSpeedV
                | Parameter::ScanlineFactorX
                | Parameter::ScanlineFactorY
        )
    }
}

impl std::fmt::Display for Parameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Edit cursor plus the operations that act on the selected parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterStore {
    selected: Parameter,
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self {
            selected: Parameter::ScrollSpeedH,
        }
    }
}

impl ParameterStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub const fn selected(&self) -> Parameter {
        self.selected
    }

    pub fn select_next(&mut self) {
        self.selected = self.selected.next();
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.prev();
    }

    /// Step the selected parameter up. No-op without a background.
    pub fn increase(&self, state: &mut EffectState, background: Option<&mut Background>) {
        self.nudge(state, background, 1);
    }

    /// Step the selected parameter down, then clamp both angle increments to
    /// be non-negative. No-op without a background.
    pub fn decrease(&self, state: &mut EffectState, background: Option<&mut Background>) {
        self.nudge(state, background, -1);
    }

    fn nudge(&self, state: &mut EffectState, background: Option<&mut Background>, sign: i32) {
        let Some(background) = background else {
            return;
        };
        let s = f64::from(sign);
        let motion = background.motion_mut();
        match self.selected {
            Parameter::ScrollSpeedH => motion.scroll_speed_h = motion.scroll_speed_h.saturating_add(sign),
            Parameter::ScrollSpeedV => motion.scroll_speed_v = motion.scroll_speed_v.saturating_add(sign),
            Parameter::AngleIncreaseX => state.angle_inc_x += s * ANGLE_INCREASE_STEP,
            Parameter::AngleIncreaseY => state.angle_inc_y += s * ANGLE_INCREASE_STEP,
            Parameter::ScanlineFactorDeltaX => state.scanline_factor_delta_x += s * SCANLINE_DELTA_STEP,
            Parameter::ScanlineFactorDeltaY => state.scanline_factor_delta_y += s * SCANLINE_DELTA_STEP,
            Parameter::ScanlineFactorX => {
                motion.scanline_factor_x += s * state.scanline_factor_delta_x;
            }
            Parameter::ScanlineFactorY => {
                motion.scanline_factor_y += s * state.scanline_factor_delta_y;
            }
        }
        if sign < 0 {
            state.clamp_increments();
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(parameter = %self.selected, sign, "parameter nudged");
    }

    /// Restore the global baseline, then zero the background's motion and
    /// rewind its palette cycler.
    pub fn reset(&self, state: &mut EffectState, background: Option<&mut Background>) {
        state.restore_baseline();
        if let Some(background) = background {
            *background.motion_mut() = Motion::default();
            background.cycler_mut().reset();
        }
    }

    /// Restore the global baseline, then draw fresh random values for the
    /// background and the global increments. Without a background only the
    /// baseline is restored.
    pub fn randomize<R: Rng + ?Sized>(
        &self,
        state: &mut EffectState,
        background: Option<&mut Background>,
        rng: &mut R,
    ) {
        state.restore_baseline();
        let Some(background) = background else {
            return;
        };
        *background.motion_mut() = Motion {
            scroll_speed_h: rng.random_range(-RANDOM_SCROLL_SPEED..=RANDOM_SCROLL_SPEED),
            scroll_speed_v: rng.random_range(-RANDOM_SCROLL_SPEED..=RANDOM_SCROLL_SPEED),
            scanline_factor_x: rng.random::<f64>() * RANDOM_SCANLINE_FACTOR,
            scanline_factor_y: rng.random::<f64>() * RANDOM_SCANLINE_FACTOR,
            ..Motion::default()
        };
        state.angle_inc_x = rng.random::<f64>();
        state.angle_inc_y = rng.random::<f64>();
        state.scanline_factor_delta_x = rng.random::<f64>();
        state.scanline_factor_delta_y = rng.random::<f64>();
        background.cycler_mut().reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect_state::{DEFAULT_ANGLE_INCREASE, DEFAULT_SCANLINE_FACTOR_DELTA};
    use bgfx_render::{Grid, Rgb};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn background() -> Background {
        Background::new("test", Grid::new(256, 256, Rgb::BLACK)).unwrap()
    }

    #[test]
    fn cursor_clamps_at_both_ends() {
        let mut p = ParameterStore::new();
        p.select_previous();
        assert_eq!(p.selected(), Parameter::ScrollSpeedH);
        for _ in 0..20 {
            p.select_next();
        }
        assert_eq!(p.selected(), Parameter::ScanlineFactorY);
    }

    #[test]
    fn index_matches_all_order() {
        for (i, p) in Parameter::ALL.iter().enumerate() {
            assert_eq!(p.index(), i);
        }
    }

    #[test]
    fn scroll_speed_steps_by_one() {
        let p = ParameterStore::new();
        let mut state = EffectState::default();
        let mut bg = background();
        p.increase(&mut state, Some(&mut bg));
        p.increase(&mut state, Some(&mut bg));
        p.decrease(&mut state, Some(&mut bg));
        assert_eq!(bg.motion().scroll_speed_h, 1);
    }

    #[test]
    fn scanline_factor_steps_by_current_delta() {
        let mut p = ParameterStore::new();
        while p.selected() != Parameter::ScanlineFactorY {
            p.select_next();
        }
        let mut state = EffectState {
            scanline_factor_delta_y: 0.5,
            ..EffectState::default()
        };
        let mut bg = background();
        p.increase(&mut state, Some(&mut bg));
        p.increase(&mut state, Some(&mut bg));
        assert_eq!(bg.motion().scanline_factor_y, 1.0);
    }

    #[test]
    fn decrease_clamps_angle_increment_at_zero() {
        let mut p = ParameterStore::new();
        p.select_next();
        p.select_next();
        assert_eq!(p.selected(), Parameter::AngleIncreaseX);
        let mut state = EffectState::default();
        let mut bg = background();
        for _ in 0..10 {
            p.decrease(&mut state, Some(&mut bg));
        }
        assert_eq!(state.angle_inc_x, 0.0);
        assert_eq!(state.angle_inc_y, DEFAULT_ANGLE_INCREASE);
    }

    #[test]
    fn edits_without_background_are_noops() {
        let mut p = ParameterStore::new();
        p.select_next();
        p.select_next();
        let mut state = EffectState::default();
        p.increase(&mut state, None);
        p.decrease(&mut state, None);
        assert_eq!(state, EffectState::default());
    }

    #[test]
    fn reset_zeroes_motion_and_restores_baseline() {
        let p = ParameterStore::new();
        let mut state = EffectState {
            angle_x: 42.0,
            angle_inc_x: 0.9,
            scanline_factor_delta_x: 0.3,
            ..EffectState::default()
        };
        let mut bg = background();
        bg.motion_mut().scroll_pos_x = 17;
        bg.motion_mut().scanline_factor_x = 4.0;
        p.reset(&mut state, Some(&mut bg));
        assert_eq!(*bg.motion(), Motion::default());
        assert_eq!(state.angle_inc_x, DEFAULT_ANGLE_INCREASE);
        assert_eq!(state.scanline_factor_delta_x, DEFAULT_SCANLINE_FACTOR_DELTA);
        assert_eq!(state.angle_x, 42.0);
    }

    #[test]
    fn reset_without_background_restores_baseline_only() {
        let p = ParameterStore::new();
        let mut state = EffectState {
            angle_inc_y: 0.9,
            ..EffectState::default()
        };
        p.reset(&mut state, None);
        assert_eq!(state, EffectState::default());
    }

    #[test]
    fn randomize_stays_in_ranges() {
        let p = ParameterStore::new();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let mut state = EffectState::default();
            let mut bg = background();
            bg.motion_mut().scroll_pos_y = 99;
            p.randomize(&mut state, Some(&mut bg), &mut rng);
            let m = bg.motion();
            assert!((-5..=5).contains(&m.scroll_speed_h));
            assert!((-5..=5).contains(&m.scroll_speed_v));
            assert!((0.0..10.0).contains(&m.scanline_factor_x));
            assert!((0.0..10.0).contains(&m.scanline_factor_y));
            assert!((0.0..1.0).contains(&state.angle_inc_x));
            assert!((0.0..1.0).contains(&state.scanline_factor_delta_y));
            assert_eq!(m.scroll_pos_y, 0);
            assert_eq!(m.scanline_offset_x, 0);
        }
    }

    #[test]
    fn randomize_without_background_restores_baseline() {
        let p = ParameterStore::new();
        let mut rng = StdRng::seed_from_u64(1);
        let mut state = EffectState {
            angle_inc_x: 0.7,
            ..EffectState::default()
        };
        p.randomize(&mut state, None, &mut rng);
        assert_eq!(state, EffectState::default());
    }

    #[test]
    fn labels_match_display() {
        assert_eq!(Parameter::AngleIncreaseY.to_string(), "AngleIncreaseY");
        assert!(Parameter::ScanlineFactorX.is_per_background());
        assert!(!Parameter::ScanlineFactorDeltaX.is_per_background());
    }
}
