#![forbid(unsafe_code)]

//! bgfx viewer.
//!
//! Loads backgrounds from a directory and either runs the interactive
//! terminal viewer or renders headless to a PNG snapshot.

pub mod app;
pub mod cli;
pub mod error;
pub mod fps;
pub mod keymap;
pub mod logging;
pub mod overlay;
pub mod snapshot;

use bgfx_fx::Stage;
use web_time::{SystemTime, UNIX_EPOCH};

use crate::cli::Opts;
use crate::error::DemoError;
use crate::logging::LogTarget;

/// Seed derived from the wall clock.
fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

/// Build the stage described by `opts`.
pub fn build_stage(opts: &Opts) -> Stage {
    let backgrounds = bgfx_assets::discover(&opts.dir);
    let seed = opts.seed.unwrap_or_else(clock_seed);
    tracing::info!(count = backgrounds.len(), seed, "stage ready");
    Stage::new(backgrounds, seed)
}

/// Run the viewer (or the headless snapshot) to completion.
///
/// # Errors
///
/// Logging setup, terminal, or snapshot failures.
pub fn run(opts: &Opts) -> Result<(), DemoError> {
    let target = match opts.snapshot {
        Some(_) => LogTarget::Stderr,
        None => LogTarget::File(opts.log_file.clone()),
    };
    logging::init(&target)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), dir = %opts.dir.display(), "bgfx starting");

    let mut stage = build_stage(opts);
    match &opts.snapshot {
        Some(path) => snapshot::write_snapshot(&mut stage, opts.frames, path),
        None => app::run(opts, stage),
    }
}
