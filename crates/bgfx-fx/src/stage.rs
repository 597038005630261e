#![forbid(unsafe_code)]

//! The stage: background collection, global effect state and the command
//! stream.
//!
//! # Frame Protocol
//!
//! ```text
//! apply(cmd)*        // input for this frame
//! render(&mut out)   // sample the active background
//! ... present ...
//! end_frame(dt)      // scroll, then maybe tick the palette
//! ```
//!
//! Scroll and palette updates happen after presentation, so the frame on
//! screen always matches the snapshot taken before `end_frame`.

use bgfx_render::{ColorGrid, Rgb};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::background::Background;
use crate::cycler::CycleClock;
use crate::effect_state::EffectState;
use crate::params::{Parameter, ParameterStore};
use crate::renderer::EffectRenderer;
use crate::warp::Motion;

/// Everything the user can ask the stage to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    NextImage,
    PreviousImage,
    NextParameter,
    PreviousParameter,
    IncreaseParameter,
    DecreaseParameter,
    RandomizeParameters,
    ResetParameters,
    Quit,
}

/// Value of one tunable, as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    Int(i32),
    Float(f64),
}

/// Read-only view of the effect state for display.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSnapshot {
    pub state: EffectState,
    /// Motion of the active background, if any.
    pub motion: Option<Motion>,
    /// Palette rotation offset of the active background, if any.
    pub palette_offset: Option<u32>,
    pub selected: Parameter,
    /// Zero-based index of the active background.
    pub image_index: Option<usize>,
    pub image_count: usize,
    pub image_name: Option<String>,
}

impl ParamSnapshot {
    /// Current value of `param`. Per-background values read 0 without an image.
    pub fn value(&self, param: Parameter) -> ParamValue {
        let m = self.motion.unwrap_or_default();
        match param {
            Parameter::ScrollSpeedH => ParamValue::Int(m.scroll_speed_h),
            Parameter::ScrollSpeedV => ParamValue::Int(m.scroll_speed_v),
            Parameter::AngleIncreaseX => ParamValue::Float(self.state.angle_inc_x),
            Parameter::AngleIncreaseY => ParamValue::Float(self.state.angle_inc_y),
            Parameter::ScanlineFactorDeltaX => ParamValue::Float(self.state.scanline_factor_delta_x),
            Parameter::ScanlineFactorDeltaY => ParamValue::Float(self.state.scanline_factor_delta_y),
            Parameter::ScanlineFactorX => ParamValue::Float(m.scanline_factor_x),
            Parameter::ScanlineFactorY => ParamValue::Float(m.scanline_factor_y),
        }
    }
}

/// Distinct colors of one background.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorReport {
    pub name: String,
    pub colors: Vec<Rgb>,
}

impl std::fmt::Display for ColorReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}: {} colors", self.name, self.colors.len())?;
        for (i, c) in self.colors.iter().enumerate() {
            writeln!(f, "{} : {c}", i + 1)?;
        }
        Ok(())
    }
}

/// Owner of all backgrounds and global effect state.
#[derive(Debug)]
pub struct Stage {
    backgrounds: Vec<Background>,
    active: Option<usize>,
    state: EffectState,
    params: ParameterStore,
    renderer: EffectRenderer,
    cycle_clock: CycleClock,
    rng: StdRng,
    running: bool,
}

impl Stage {
    /// Stage with the first background active and a seeded RNG for
    /// [`Command::RandomizeParameters`].
    pub fn new(backgrounds: Vec<Background>, seed: u64) -> Self {
        Self::with_rng(backgrounds, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(backgrounds: Vec<Background>, rng: StdRng) -> Self {
        let active = (!backgrounds.is_empty()).then_some(0);
        Self {
            backgrounds,
            active,
            state: EffectState::default(),
            params: ParameterStore::new(),
            renderer: EffectRenderer::new(),
            cycle_clock: CycleClock::new(),
            rng,
            running: true,
        }
    }

    #[inline]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.backgrounds.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.backgrounds.is_empty()
    }

    pub fn backgrounds(&self) -> &[Background] {
        &self.backgrounds
    }

    #[inline]
    pub const fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active(&self) -> Option<&Background> {
        self.active.and_then(|i| self.backgrounds.get(i))
    }

    pub fn active_mut(&mut self) -> Option<&mut Background> {
        self.active.and_then(|i| self.backgrounds.get_mut(i))
    }

    #[inline]
    pub const fn state(&self) -> &EffectState {
        &self.state
    }

    #[inline]
    pub const fn params(&self) -> &ParameterStore {
        &self.params
    }

    pub const fn cycle_clock(&self) -> &CycleClock {
        &self.cycle_clock
    }

    /// Apply one command.
    pub fn apply(&mut self, command: Command) {
        #[cfg(feature = "tracing")]
        tracing::debug!(?command, "apply");

        let active = self.active.and_then(|i| self.backgrounds.get_mut(i));
        match command {
            Command::NextImage => self.step_image(1),
            Command::PreviousImage => self.step_image(-1),
            Command::NextParameter => self.params.select_next(),
            Command::PreviousParameter => self.params.select_previous(),
            Command::IncreaseParameter => self.params.increase(&mut self.state, active),
            Command::DecreaseParameter => self.params.decrease(&mut self.state, active),
            Command::RandomizeParameters => {
                self.params.randomize(&mut self.state, active, &mut self.rng);
            }
            Command::ResetParameters => self.params.reset(&mut self.state, active),
            Command::Quit => self.running = false,
        }
    }

    fn step_image(&mut self, delta: i64) {
        let len = self.backgrounds.len();
        let Some(current) = self.active else {
            return;
        };
        if len == 0 {
            return;
        }
        let next = (current as i64 + delta).rem_euclid(len as i64) as usize;
        self.active = Some(next);

        #[cfg(feature = "tracing")]
        tracing::info!(
            index = next,
            name = self.backgrounds[next].name(),
            "background selected"
        );
    }

    /// Render the active background into `out`. Returns `false` when there
    /// is nothing to render.
    pub fn render(&mut self, out: &mut ColorGrid) -> bool {
        let active = self.active.and_then(|i| self.backgrounds.get_mut(i));
        self.renderer.render(active, &mut self.state, out)
    }

    /// Post-presentation update: scroll the active background and tick its
    /// palette when its interval has elapsed on the shared cycle clock.
    pub fn end_frame(&mut self, dt: f64) {
        self.cycle_clock.accumulate(dt);
        let clock = &mut self.cycle_clock;
        let Some(background) = self.active.and_then(|i| self.backgrounds.get_mut(i)) else {
            return;
        };
        background.advance_scroll();
        if let Some(interval) = background.cycle_interval()
            && clock.take_tick(interval)
        {
            background.cycle_palette();
        }
    }

    pub fn snapshot(&self) -> ParamSnapshot {
        let active = self.active();
        ParamSnapshot {
            state: self.state,
            motion: active.map(|b| *b.motion()),
            palette_offset: active.map(|b| b.cycler().offset()),
            selected: self.params.selected(),
            image_index: self.active,
            image_count: self.backgrounds.len(),
            image_name: active.map(|b| b.name().to_owned()),
        }
    }

    /// Distinct colors of every background, in collection order.
    pub fn color_report(&self) -> Vec<ColorReport> {
        self.backgrounds
            .iter()
            .map(|b| ColorReport {
                name: b.name().to_owned(),
                colors: b.distinct_colors(),
            })
            .collect()
    }

    /// The active palette rotated by the current offset; empty without one.
    pub fn palette_swatches(&self) -> Vec<Rgb> {
        self.active().map(Background::rotated_palette).unwrap_or_default()
    }

    /// Frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.renderer.frames()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::background::FIELD_SIZE;
    use bgfx_render::Grid;

    const A: Rgb = Rgb::new(10, 20, 30);
    const B: Rgb = Rgb::new(40, 50, 60);

    fn bg(name: &str, c: Rgb) -> Background {
        Background::new(name, Grid::new(FIELD_SIZE, FIELD_SIZE, c)).unwrap()
    }

    #[test]
    fn image_navigation_wraps() {
        let mut stage = Stage::new(vec![bg("a", A), bg("b", B), bg("c", A)], 0);
        assert_eq!(stage.active_index(), Some(0));
        stage.apply(Command::PreviousImage);
        assert_eq!(stage.active_index(), Some(2));
        stage.apply(Command::NextImage);
        assert_eq!(stage.active_index(), Some(0));
        stage.apply(Command::NextImage);
        assert_eq!(stage.active().unwrap().name(), "b");
    }

    #[test]
    fn empty_stage_ignores_everything_but_quit() {
        let mut stage = Stage::new(Vec::new(), 0);
        for cmd in [
            Command::NextImage,
            Command::PreviousImage,
            Command::IncreaseParameter,
            Command::DecreaseParameter,
        ] {
            stage.apply(cmd);
        }
        assert_eq!(stage.active_index(), None);
        assert_eq!(*stage.state(), EffectState::default());
        let mut out = Grid::new(1, 1, B);
        assert!(!stage.render(&mut out));
        stage.end_frame(1.0);
        assert!(stage.palette_swatches().is_empty());
        stage.apply(Command::Quit);
        assert!(!stage.is_running());
    }

    #[test]
    fn motion_is_kept_per_background() {
        let mut stage = Stage::new(vec![bg("a", A), bg("b", B)], 0);
        stage.apply(Command::IncreaseParameter);
        stage.apply(Command::NextImage);
        assert_eq!(stage.snapshot().motion.unwrap().scroll_speed_h, 0);
        stage.apply(Command::PreviousImage);
        assert_eq!(stage.snapshot().motion.unwrap().scroll_speed_h, 1);
    }

    #[test]
    fn end_frame_scrolls_after_render() {
        let mut stage = Stage::new(vec![bg("a", A)], 0);
        stage.apply(Command::IncreaseParameter);
        stage.apply(Command::IncreaseParameter);
        let mut out = Grid::new(FIELD_SIZE, FIELD_SIZE, Rgb::BLACK);
        stage.render(&mut out);
        assert_eq!(stage.snapshot().motion.unwrap().scroll_pos_x, 0);
        stage.end_frame(0.016);
        assert_eq!(stage.snapshot().motion.unwrap().scroll_pos_x, 2);
    }

    #[test]
    fn palette_ticks_on_shared_clock() {
        let animated = bg("p", A).with_palette(vec![A, B], 2, false);
        let mut stage = Stage::new(vec![animated], 0);
        stage.end_frame(0.3);
        assert_eq!(stage.snapshot().palette_offset, Some(0));
        stage.end_frame(0.3);
        assert_eq!(stage.snapshot().palette_offset, Some(1));
        assert_eq!(stage.cycle_clock().accumulated(), 0.0);
        assert_eq!(stage.palette_swatches(), vec![B, A]);
    }

    #[test]
    fn clock_keeps_running_for_static_backgrounds() {
        let mut stage = Stage::new(vec![bg("s", A)], 0);
        stage.end_frame(0.75);
        assert_eq!(stage.cycle_clock().accumulated(), 0.75);
    }

    #[test]
    fn parameter_cursor_commands() {
        let mut stage = Stage::new(vec![bg("a", A)], 0);
        stage.apply(Command::NextParameter);
        stage.apply(Command::NextParameter);
        assert_eq!(stage.snapshot().selected, Parameter::AngleIncreaseX);
        stage.apply(Command::IncreaseParameter);
        assert_eq!(
            stage.snapshot().value(Parameter::AngleIncreaseX),
            ParamValue::Float(0.05 + 0.01)
        );
        stage.apply(Command::PreviousParameter);
        assert_eq!(stage.snapshot().selected, Parameter::ScrollSpeedV);
    }

    #[test]
    fn randomize_is_reproducible_per_seed() {
        let mut a = Stage::new(vec![bg("a", A)], 99);
        let mut b = Stage::new(vec![bg("a", A)], 99);
        a.apply(Command::RandomizeParameters);
        b.apply(Command::RandomizeParameters);
        assert_eq!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn reset_after_randomize_restores_defaults() {
        let mut stage = Stage::new(vec![bg("a", A)], 3);
        stage.apply(Command::RandomizeParameters);
        stage.apply(Command::ResetParameters);
        let snap = stage.snapshot();
        assert_eq!(snap.motion, Some(Motion::default()));
        assert_eq!(snap.state.angle_inc_x, 0.05);
    }

    #[test]
    fn color_report_lists_each_background() {
        let stage = Stage::new(vec![bg("a", A), bg("b", B)], 0);
        let report = stage.color_report();
        assert_eq!(report.len(), 2);
        assert_eq!(report[1].colors, vec![B]);
        assert_eq!(report[0].to_string(), "a: 1 colors\n1 : 10/20/30\n");
    }

    #[test]
    fn snapshot_without_background() {
        let stage = Stage::new(Vec::new(), 0);
        let snap = stage.snapshot();
        assert_eq!(snap.image_count, 0);
        assert_eq!(snap.image_index, None);
        assert_eq!(snap.value(Parameter::ScrollSpeedH), ParamValue::Int(0));
    }
}
