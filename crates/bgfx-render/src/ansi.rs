#![forbid(unsafe_code)]

//! ANSI escape sequence generation helpers.
//!
//! Pure byte-generation functions for the handful of control sequences the
//! presenter needs. No state tracking here; see [`crate::presenter`].
//!
//! | Sequence | Description |
//! |----------|-------------|
//! | `ESC [ 0 m` | SGR reset |
//! | `ESC [ 38;2;r;g;b m` | true color foreground |
//! | `ESC [ 48;2;r;g;b m` | true color background |
//! | `ESC [ row ; col H` | CUP (1-indexed) |
//! | `ESC [ 2 J` | erase display |
//! | `ESC [ ? 2026 h/l` | synchronized output |

use std::io::{self, Write};

use crate::color::Rgb;

/// SGR reset: `CSI 0 m`
pub const SGR_RESET: &[u8] = b"\x1b[0m";

/// Begin synchronized output: `CSI ? 2026 h`
pub const SYNC_BEGIN: &[u8] = b"\x1b[?2026h";

/// End synchronized output: `CSI ? 2026 l`
pub const SYNC_END: &[u8] = b"\x1b[?2026l";

/// Write SGR reset sequence.
#[inline]
pub fn sgr_reset<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(SGR_RESET)
}

/// True color foreground: `CSI 38;2;r;g;b m`
pub fn sgr_fg<W: Write>(w: &mut W, color: Rgb) -> io::Result<()> {
    write!(w, "\x1b[38;2;{};{};{}m", color.r, color.g, color.b)
}

/// True color background: `CSI 48;2;r;g;b m`
pub fn sgr_bg<W: Write>(w: &mut W, color: Rgb) -> io::Result<()> {
    write!(w, "\x1b[48;2;{};{};{}m", color.r, color.g, color.b)
}

/// CUP (Cursor Position): `CSI row ; col H`
///
/// Takes 0-indexed coordinates and emits the 1-indexed form.
pub fn cup<W: Write>(w: &mut W, row: u16, col: u16) -> io::Result<()> {
    write!(
        w,
        "\x1b[{};{}H",
        row.saturating_add(1),
        col.saturating_add(1)
    )
}

/// ED (Erase Display), entire screen: `CSI 2 J`
#[inline]
pub fn erase_display<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(b"\x1b[2J")
}

#[inline]
pub fn sync_begin<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(SYNC_BEGIN)
}

#[inline]
pub fn sync_end<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(SYNC_END)
}
