#![forbid(unsafe_code)]

//! Warped field-map effect engine.
//!
//! A fixed 256x256 background is scrolled, shifted per scanline by two
//! sinusoidal phase accumulators, and optionally palette-cycled. The
//! [`Stage`] owns the backgrounds and global state and consumes a stream of
//! [`Command`]s plus a per-frame clock.
//!
//! # Example
//!
//! ```
//! use bgfx_fx::{Background, Command, Stage, FIELD_SIZE};
//! use bgfx_render::{Grid, Rgb};
//!
//! let pixels = Grid::new(FIELD_SIZE, FIELD_SIZE, Rgb::new(10, 20, 30));
//! let bg = Background::new("water", pixels)
//!     .unwrap()
//!     .with_palette(vec![Rgb::new(10, 20, 30), Rgb::new(40, 50, 60)], 2, false);
//!
//! let mut stage = Stage::new(vec![bg], 0);
//! let mut frame = Grid::new(FIELD_SIZE, FIELD_SIZE, Rgb::BLACK);
//! stage.apply(Command::IncreaseParameter);
//! assert!(stage.render(&mut frame));
//! stage.end_frame(1.0 / 60.0);
//! ```

pub mod background;
pub mod cycler;
pub mod effect_state;
pub mod palette;
pub mod params;
pub mod renderer;
pub mod stage;
pub mod warp;

pub use background::{Background, BackgroundError, FIELD_SIZE, RenderMode};
pub use cycler::{CycleClock, CycleMode, PaletteCycler};
pub use effect_state::EffectState;
pub use palette::PaletteMap;
pub use params::{Parameter, ParameterStore};
pub use renderer::EffectRenderer;
pub use stage::{ColorReport, Command, ParamSnapshot, ParamValue, Stage};
pub use warp::{DistortionSampler, Motion, Sample};
