#![forbid(unsafe_code)]

//! Palette rotation.
//!
//! [`PaletteCycler`] owns the rotation offset into a background's palette and
//! advances it one step per tick, either wrapping around or bouncing between
//! the ends. [`CycleClock`] turns frame deltas into ticks at a fixed rate,
//! independent of the frame rate.

/// How the offset moves at the ends of the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CycleMode {
    /// `offset = (offset + 1) mod len`.
    #[default]
    Wrap,
    /// Count up to `len - 1`, then back down to 0, and so on.
    PingPong,
}

impl CycleMode {
    pub const fn from_ping_pong(ping_pong: bool) -> Self {
        if ping_pong { Self::PingPong } else { Self::Wrap }
    }
}

/// Rotation offset plus the ping-pong direction flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteCycler {
    mode: CycleMode,
    offset: u32,
    hit_min: bool,
    hit_max: bool,
}

impl PaletteCycler {
    pub const fn new(mode: CycleMode) -> Self {
        Self {
            mode,
            offset: 0,
            hit_min: true,
            hit_max: false,
        }
    }

    #[inline]
    pub const fn offset(&self) -> u32 {
        self.offset
    }

    #[inline]
    pub const fn mode(&self) -> CycleMode {
        self.mode
    }

    /// `(hit_min, hit_max)`.
    #[inline]
    pub const fn bounds_hit(&self) -> (bool, bool) {
        (self.hit_min, self.hit_max)
    }

    /// Offset back to 0, direction back to ascending.
    pub fn reset(&mut self) {
        self.offset = 0;
        self.hit_min = true;
        self.hit_max = false;
    }

    /// Advance one step through a palette of `len` entries.
    ///
    /// `len == 0` is a caller bug: it asserts in debug builds and does nothing
    /// in release builds. A single-entry palette keeps the offset at 0.
    pub fn tick(&mut self, len: usize) {
        debug_assert!(len > 0, "palette cycled with no entries");
        if len == 0 {
            return;
        }
        let last = (len - 1) as u32;

        match self.mode {
            CycleMode::Wrap => {
                self.offset = (self.offset + 1) % len as u32;
            }
            CycleMode::PingPong if last == 0 => {
                self.reset();
            }
            CycleMode::PingPong => {
                if self.hit_min && !self.hit_max {
                    self.offset += 1;
                } else if self.hit_max && !self.hit_min {
                    self.offset = self.offset.saturating_sub(1);
                }

                if self.offset >= last {
                    self.offset = last;
                    self.hit_max = true;
                    self.hit_min = false;
                } else if self.offset == 0 {
                    self.hit_min = true;
                    self.hit_max = false;
                }
            }
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(offset = self.offset, len, "palette cycled");
    }
}

impl Default for PaletteCycler {
    fn default() -> Self {
        Self::new(CycleMode::Wrap)
    }
}

/// Accumulates frame time and reports when a cycle interval has elapsed.
///
/// One clock is shared by all backgrounds, so switching images does not
/// restart the cadence.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CycleClock {
    accumulated: f64,
}

impl CycleClock {
    pub const fn new() -> Self {
        Self { accumulated: 0.0 }
    }

    #[inline]
    pub fn accumulate(&mut self, dt: f64) {
        self.accumulated += dt;
    }

    /// If more than `interval` seconds have accumulated, reset to zero and
    /// return `true`. At most one tick per call.
    pub fn take_tick(&mut self, interval: f64) -> bool {
        if self.accumulated > interval {
            self.accumulated = 0.0;
            true
        } else {
            false
        }
    }

    #[inline]
    pub const fn accumulated(&self) -> f64 {
        self.accumulated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_mode_rolls_over() {
        let mut c = PaletteCycler::new(CycleMode::Wrap);
        let offsets: Vec<u32> = (0..5)
            .map(|_| {
                c.tick(3);
                c.offset()
            })
            .collect();
        assert_eq!(offsets, vec![1, 2, 0, 1, 2]);
    }

    #[test]
    fn ping_pong_bounces_between_ends() {
        let mut c = PaletteCycler::new(CycleMode::PingPong);
        let offsets: Vec<u32> = (0..8)
            .map(|_| {
                c.tick(4);
                c.offset()
            })
            .collect();
        assert_eq!(offsets, vec![1, 2, 3, 2, 1, 0, 1, 2]);
    }

    #[test]
    fn ping_pong_flags_flip_at_ends() {
        let mut c = PaletteCycler::new(CycleMode::PingPong);
        c.tick(2);
        assert_eq!(c.offset(), 1);
        assert_eq!(c.bounds_hit(), (false, true));
        c.tick(2);
        assert_eq!(c.offset(), 0);
        assert_eq!(c.bounds_hit(), (true, false));
    }

    #[test]
    fn single_entry_ping_pong_stays_at_zero() {
        let mut c = PaletteCycler::new(CycleMode::PingPong);
        for _ in 0..5 {
            c.tick(1);
            assert_eq!(c.offset(), 0);
            assert_eq!(c.bounds_hit(), (true, false));
        }
    }

    #[test]
    fn single_entry_wrap_stays_at_zero() {
        let mut c = PaletteCycler::new(CycleMode::Wrap);
        c.tick(1);
        assert_eq!(c.offset(), 0);
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn empty_palette_tick_is_noop_in_release() {
        let mut c = PaletteCycler::new(CycleMode::Wrap);
        c.tick(0);
        assert_eq!(c.offset(), 0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "no entries")]
    fn empty_palette_tick_asserts_in_debug() {
        PaletteCycler::new(CycleMode::Wrap).tick(0);
    }

    #[test]
    fn reset_restores_ascending_start() {
        let mut c = PaletteCycler::new(CycleMode::PingPong);
        c.tick(2);
        c.reset();
        assert_eq!(c, PaletteCycler::new(CycleMode::PingPong));
    }

    #[test]
    fn clock_fires_only_after_interval_and_resets() {
        let mut clock = CycleClock::new();
        clock.accumulate(0.3);
        assert!(!clock.take_tick(0.5));
        clock.accumulate(0.3);
        assert!(clock.take_tick(0.5));
        assert_eq!(clock.accumulated(), 0.0);
        assert!(!clock.take_tick(0.5));
    }

    #[test]
    fn clock_exact_interval_does_not_fire() {
        let mut clock = CycleClock::new();
        clock.accumulate(0.5);
        assert!(!clock.take_tick(0.5));
    }

    #[test]
    fn clock_ticks_at_most_once_per_check() {
        let mut clock = CycleClock::new();
        clock.accumulate(10.0);
        assert!(clock.take_tick(0.1));
        assert!(!clock.take_tick(0.1));
    }

    #[test]
    fn mode_from_flag() {
        assert_eq!(CycleMode::from_ping_pong(true), CycleMode::PingPong);
        assert_eq!(CycleMode::from_ping_pong(false), CycleMode::Wrap);
    }
}
