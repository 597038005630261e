#![forbid(unsafe_code)]

//! Render kernel: colors, pixel grids, cell surfaces and ANSI presentation.

pub mod ansi;
pub mod color;
pub mod grid;
pub mod presenter;
pub mod surface;

pub use color::Rgb;
pub use grid::{ColorGrid, Grid, GridSizeMismatch};
pub use presenter::{ChangeRun, PresentStats, Presenter};
pub use surface::{Cell, Surface};
