#![forbid(unsafe_code)]

//! Interactive viewer: input, composition and the frame loop.

use std::io::{self, Write};
use std::thread;

use bgfx_core::{Event, SessionOptions, TerminalSession};
use bgfx_fx::{FIELD_SIZE, Stage};
use bgfx_render::{ColorGrid, Grid, Presenter, Rgb, Surface};
use web_time::{Duration, Instant};

use crate::cli::Opts;
use crate::error::DemoError;
use crate::fps::FpsCounter;
use crate::keymap::{self, Action};
use crate::overlay::{self, View};

/// Viewer state around the [`Stage`].
#[derive(Debug)]
pub struct App {
    stage: Stage,
    frame: ColorGrid,
    fps: FpsCounter,
    show_help: bool,
    scale: usize,
}

impl App {
    pub fn new(stage: Stage, scale: usize) -> Self {
        Self {
            stage,
            frame: Grid::new(FIELD_SIZE, FIELD_SIZE, Rgb::BLACK),
            fps: FpsCounter::new(),
            show_help: false,
            scale,
        }
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub const fn show_help(&self) -> bool {
        self.show_help
    }

    pub const fn fps(&self) -> u32 {
        self.fps.fps()
    }

    pub fn is_running(&self) -> bool {
        self.stage.is_running()
    }

    pub fn handle(&mut self, action: Action) {
        match action {
            Action::Engine(command) => {
                tracing::debug!(?command, "command");
                self.stage.apply(command);
            }
            Action::ToggleHelp => self.show_help = !self.show_help,
            Action::DumpColors => {
                for report in self.stage.color_report() {
                    tracing::info!("{report}");
                }
            }
        }
    }

    /// Map and apply one input event. Resizes are left to the caller.
    pub fn handle_event(&mut self, event: &Event) {
        if let Some(action) = keymap::map_event(event) {
            self.handle(action);
        }
    }

    /// Render the effect and compose the whole screen into `surface`.
    pub fn draw(&mut self, surface: &mut Surface) {
        let has_frame = self.stage.render(&mut self.frame);
        let snapshot = self.stage.snapshot();
        let swatches = self.stage.palette_swatches();
        overlay::draw(
            surface,
            &View {
                snapshot: &snapshot,
                frame: has_frame.then_some(&self.frame),
                swatches: &swatches,
                fps: self.fps.fps(),
                show_help: self.show_help,
                scale: self.scale,
            },
        );
    }

    /// Close the frame: count it and advance the stage clock.
    pub fn end_frame(&mut self, dt: f64) {
        self.fps.tick(dt);
        self.stage.end_frame(dt);
        tracing::trace!(dt, fps = self.fps.fps(), "frame");
    }
}

/// Run the interactive viewer until quit or the auto-exit deadline.
///
/// # Errors
///
/// Terminal setup or output failures.
pub fn run(opts: &Opts, stage: Stage) -> Result<(), DemoError> {
    let session = TerminalSession::new(SessionOptions {
        alternate_screen: true,
        hide_cursor: true,
    })?;
    let mut presenter = Presenter::new(io::stdout(), true);
    let (cols, rows) = session.size()?;
    let mut surface = Surface::new(cols, rows);
    let mut app = App::new(stage, opts.scale);

    let budget = opts.frame_budget();
    let deadline = opts.exit_after();
    let started = Instant::now();
    let mut last = Instant::now();

    while app.is_running() {
        for event in session.drain_events()? {
            if let Event::Resize { width, height } = event {
                tracing::debug!(width, height, "resize");
                surface = Surface::new(width, height);
                presenter.invalidate();
            }
            app.handle_event(&event);
        }

        app.draw(&mut surface);
        presenter.present(&surface)?;

        if let Some(budget) = budget {
            let wait = remaining(budget, last.elapsed());
            if !wait.is_zero() {
                thread::sleep(wait);
            }
        }

        let now = Instant::now();
        let dt = now.duration_since(last).as_secs_f64();
        last = now;
        app.end_frame(dt);

        if deadline.is_some_and(|d| started.elapsed() >= d) {
            tracing::info!("exit deadline reached");
            break;
        }
    }

    let mut out = presenter.into_inner()?;
    out.flush()?;
    drop(session);
    Ok(())
}

/// Frame budget left after `spent`.
pub fn remaining(budget: Duration, spent: Duration) -> Duration {
    budget.saturating_sub(spent)
}
