#![forbid(unsafe_code)]

//! Presenter: state-tracked ANSI emission for [`Surface`] frames.
//!
//! The presenter keeps the last surface it wrote and, on the next frame, emits
//! only the cells that changed. Changed cells on a row are grouped into runs so
//! each run costs a single cursor move.
//!
//! # Design Principles
//!
//! - **State tracking**: current fg/bg and cursor are tracked to skip redundant output
//! - **Run grouping**: one CUP per run of adjacent changed cells
//! - **Single write**: output is buffered and flushed once per frame
//! - **Synchronized output**: DEC 2026 wraps each frame when enabled
//!
//! # Usage
//!
//! ```ignore
//! use bgfx_render::presenter::Presenter;
//! use bgfx_render::surface::Surface;
//!
//! let mut presenter = Presenter::new(std::io::stdout(), true);
//! let mut surface = Surface::new(80, 24);
//! // ... blit and draw text into `surface` ...
//! presenter.present(&surface)?;
//! ```

use std::io::{self, BufWriter, Write};

use crate::ansi;
use crate::color::Rgb;
use crate::surface::{Cell, Surface};

/// Size of the internal write buffer (64KB).
const BUFFER_CAPACITY: usize = 64 * 1024;

/// A horizontal run of changed cells on one row, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeRun {
    pub y: u16,
    pub x0: u16,
    pub x1: u16,
}

/// Per-frame emission counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PresentStats {
    pub cells_changed: usize,
    pub runs: usize,
    pub full_redraw: bool,
}

/// Compute runs of cells that differ between `prev` and `next`.
///
/// Both surfaces must have the same dimensions.
pub fn diff_runs(prev: &Surface, next: &Surface) -> Vec<ChangeRun> {
    debug_assert_eq!(
        (prev.cols(), prev.rows()),
        (next.cols(), next.rows()),
        "diff_runs needs equal surface sizes"
    );
    let mut runs = Vec::new();
    let width = next.cols() as usize;
    if width == 0 {
        return runs;
    }
    for (y, (old_row, new_row)) in prev.cells().rows().zip(next.cells().rows()).enumerate() {
        let mut open: Option<usize> = None;
        for x in 0..width {
            let changed = old_row[x] != new_row[x];
            match (changed, open) {
                (true, None) => open = Some(x),
                (false, Some(x0)) => {
                    runs.push(ChangeRun {
                        y: y as u16,
                        x0: x0 as u16,
                        x1: (x - 1) as u16,
                    });
                    open = None;
                }
                _ => {}
            }
        }
        if let Some(x0) = open {
            runs.push(ChangeRun {
                y: y as u16,
                x0: x0 as u16,
                x1: (width - 1) as u16,
            });
        }
    }
    runs
}

/// State-tracked ANSI presenter.
pub struct Presenter<W: Write> {
    writer: BufWriter<W>,
    /// Last surface written; `None` forces a full redraw.
    previous: Option<Surface>,
    /// Current colors (None = unknown/reset).
    current_fg: Option<Rgb>,
    current_bg: Option<Rgb>,
    /// Current cursor position (0-indexed). None = unknown.
    cursor_x: Option<u16>,
    cursor_y: Option<u16>,
    sync_output: bool,
}

impl<W: Write> Presenter<W> {
    /// Create a presenter. `sync_output` wraps every frame in DEC 2026.
    pub fn new(writer: W, sync_output: bool) -> Self {
        Self {
            writer: BufWriter::with_capacity(BUFFER_CAPACITY, writer),
            previous: None,
            current_fg: None,
            current_bg: None,
            cursor_x: None,
            cursor_y: None,
            sync_output,
        }
    }

    /// Present a frame.
    ///
    /// The first frame, and any frame whose size differs from the previous
    /// one, clears the screen and writes every cell.
    pub fn present(&mut self, surface: &Surface) -> io::Result<PresentStats> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "present",
            cols = surface.cols(),
            rows = surface.rows()
        )
        .entered();

        if self.sync_output {
            ansi::sync_begin(&mut self.writer)?;
        }

        let same_size = self
            .previous
            .as_ref()
            .is_some_and(|p| p.cols() == surface.cols() && p.rows() == surface.rows());

        let runs = match self.previous.as_ref() {
            Some(prev) if same_size => diff_runs(prev, surface),
            _ => {
                ansi::sgr_reset(&mut self.writer)?;
                ansi::erase_display(&mut self.writer)?;
                self.reset();
                (0..surface.rows())
                    .filter(|_| surface.cols() > 0)
                    .map(|y| ChangeRun {
                        y,
                        x0: 0,
                        x1: surface.cols() - 1,
                    })
                    .collect()
            }
        };

        let mut stats = PresentStats {
            runs: runs.len(),
            full_redraw: !same_size,
            ..PresentStats::default()
        };

        for run in &runs {
            self.move_cursor_to(run.x0, run.y)?;
            for x in run.x0..=run.x1 {
                if let Some(cell) = surface.get(x, run.y) {
                    self.emit_cell(cell)?;
                    stats.cells_changed += 1;
                }
            }
        }

        ansi::sgr_reset(&mut self.writer)?;
        self.current_fg = None;
        self.current_bg = None;

        if self.sync_output {
            ansi::sync_end(&mut self.writer)?;
        }

        match self.previous.as_mut() {
            Some(prev) if same_size => prev.clone_from(surface),
            _ => self.previous = Some(surface.clone()),
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(
            cells = stats.cells_changed,
            runs = stats.runs,
            full = stats.full_redraw,
            "frame presented"
        );
        self.writer.flush()?;
        Ok(stats)
    }

    fn emit_cell(&mut self, cell: Cell) -> io::Result<()> {
        if self.current_fg != Some(cell.fg) {
            ansi::sgr_fg(&mut self.writer, cell.fg)?;
            self.current_fg = Some(cell.fg);
        }
        if self.current_bg != Some(cell.bg) {
            ansi::sgr_bg(&mut self.writer, cell.bg)?;
            self.current_bg = Some(cell.bg);
        }
        let mut buf = [0u8; 4];
        self.writer.write_all(cell.ch.encode_utf8(&mut buf).as_bytes())?;
        if let Some(x) = self.cursor_x {
            self.cursor_x = Some(x.saturating_add(1));
        }
        Ok(())
    }

    fn move_cursor_to(&mut self, x: u16, y: u16) -> io::Result<()> {
        if self.cursor_x == Some(x) && self.cursor_y == Some(y) {
            return Ok(());
        }
        ansi::cup(&mut self.writer, y, x)?;
        self.cursor_x = Some(x);
        self.cursor_y = Some(y);
        Ok(())
    }

    /// Forget the previous frame so the next `present` redraws everything.
    pub fn invalidate(&mut self) {
        self.previous = None;
        self.reset();
    }

    /// Reset tracked color and cursor state.
    pub fn reset(&mut self) {
        self.current_fg = None;
        self.current_bg = None;
        self.cursor_x = None;
        self.cursor_y = None;
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    /// Get the inner writer (consuming the presenter).
    ///
    /// Flushes any buffered data before returning the writer.
    pub fn into_inner(self) -> Result<W, io::Error> {
        self.writer
            .into_inner()
            .map_err(|e| io::Error::other(e.to_string()))
    }
}
