#![forbid(unsafe_code)]

//! Terminal cell surface.
//!
//! A [`Surface`] is the composed screen for one frame: a grid of character
//! cells, each with a foreground and background color. Pixel images are
//! blitted with the upper-half-block glyph (`▀`), so one cell carries two
//! vertically stacked pixels (top = foreground, bottom = background).

use crate::color::Rgb;
use crate::grid::{ColorGrid, Grid};

/// Upper half block: the top pixel is drawn in the foreground color.
pub const HALF_BLOCK: char = '\u{2580}';

/// One terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub ch: char,
    pub fg: Rgb,
    pub bg: Rgb,
}

impl Cell {
    /// Blank cell: a space on black.
    pub const BLANK: Self = Self {
        ch: ' ',
        fg: Rgb::WHITE,
        bg: Rgb::BLACK,
    };

    #[inline]
    pub const fn new(ch: char, fg: Rgb, bg: Rgb) -> Self {
        Self { ch, fg, bg }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::BLANK
    }
}

/// Composed terminal screen for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    cells: Grid<Cell>,
}

impl Surface {
    /// Blank surface of `cols` x `rows` cells.
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cells: Grid::new(cols as usize, rows as usize, Cell::BLANK),
        }
    }

    #[inline]
    pub fn cols(&self) -> u16 {
        self.cells.width() as u16
    }

    #[inline]
    pub fn rows(&self) -> u16 {
        self.cells.height() as u16
    }

    /// Cell at `(col, row)`, if inside the surface.
    #[inline]
    pub fn get(&self, col: u16, row: u16) -> Option<Cell> {
        self.cells.get(col as usize, row as usize)
    }

    /// Write one cell; writes outside the surface are clipped.
    #[inline]
    pub fn set(&mut self, col: u16, row: u16, cell: Cell) {
        self.cells.set(col as usize, row as usize, cell);
    }

    /// Reset every cell to [`Cell::BLANK`].
    pub fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    /// Underlying cell grid.
    #[inline]
    pub fn cells(&self) -> &Grid<Cell> {
        &self.cells
    }

    /// Write `text` starting at `(col, row)`, one char per cell, clipped at the
    /// right edge. Returns the number of cells written.
    pub fn put_str(&mut self, col: u16, row: u16, text: &str, fg: Rgb, bg: Rgb) -> u16 {
        if row >= self.rows() {
            return 0;
        }
        let mut written = 0u16;
        for (i, ch) in text.chars().enumerate() {
            let Some(x) = col.checked_add(i as u16) else {
                break;
            };
            if x >= self.cols() {
                break;
            }
            self.set(x, row, Cell::new(ch, fg, bg));
            written += 1;
        }
        written
    }

    /// Write `text` so that it ends just before column `right`.
    pub fn put_str_right(&mut self, right: u16, row: u16, text: &str, fg: Rgb, bg: Rgb) -> u16 {
        let len = text.chars().count() as u16;
        self.put_str(right.saturating_sub(len), row, text, fg, bg)
    }

    /// Paint a rectangle of blank cells with background `bg`.
    pub fn fill_rect(&mut self, col: u16, row: u16, width: u16, height: u16, bg: Rgb) {
        for y in row..row.saturating_add(height).min(self.rows()) {
            for x in col..col.saturating_add(width).min(self.cols()) {
                self.set(x, y, Cell::new(' ', bg, bg));
            }
        }
    }

    /// Blit `image` at `(col, row)` using half blocks, sampling every `step`-th
    /// pixel in both directions. Returns the `(cols, rows)` footprint.
    ///
    /// A `step` of 0 is treated as 1.
    pub fn blit_half_blocks(&mut self, image: &ColorGrid, col: u16, row: u16, step: usize) -> (u16, u16) {
        let step = step.max(1);
        let (w, h) = image.dims();
        let out_cols = w.div_ceil(step);
        let out_px_rows = h.div_ceil(step);
        let out_rows = out_px_rows.div_ceil(2);

        for cy in 0..out_rows {
            let top_y = cy * 2 * step;
            let bottom_y = (cy * 2 + 1) * step;
            for cx in 0..out_cols {
                let sx = cx * step;
                let top = image.at(sx, top_y);
                let bottom = image.get(sx, bottom_y).unwrap_or(Rgb::BLACK);
                self.set(
                    col.saturating_add(cx as u16),
                    row.saturating_add(cy as u16),
                    Cell::new(HALF_BLOCK, top, bottom),
                );
            }
        }
        (out_cols as u16, out_rows as u16)
    }
}

/// Footprint in cells of an image of `width` x `height` pixels blitted with `step`.
pub fn half_block_footprint(width: usize, height: usize, step: usize) -> (u16, u16) {
    let step = step.max(1);
    (
        width.div_ceil(step) as u16,
        height.div_ceil(step).div_ceil(2) as u16,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb = Rgb::new(255, 0, 0);
    const BLUE: Rgb = Rgb::new(0, 0, 255);

    #[test]
    fn put_str_clips_at_right_edge() {
        let mut s = Surface::new(4, 1);
        let n = s.put_str(2, 0, "abc", Rgb::WHITE, Rgb::BLACK);
        assert_eq!(n, 2);
        assert_eq!(s.get(2, 0).unwrap().ch, 'a');
        assert_eq!(s.get(3, 0).unwrap().ch, 'b');
    }

    #[test]
    fn put_str_below_surface_is_noop() {
        let mut s = Surface::new(4, 1);
        assert_eq!(s.put_str(0, 5, "abc", Rgb::WHITE, Rgb::BLACK), 0);
        assert_eq!(s, Surface::new(4, 1));
    }

    #[test]
    fn put_str_right_aligns() {
        let mut s = Surface::new(10, 1);
        s.put_str_right(10, 0, "1/3", Rgb::WHITE, Rgb::BLACK);
        assert_eq!(s.get(7, 0).unwrap().ch, '1');
        assert_eq!(s.get(9, 0).unwrap().ch, '3');
    }

    #[test]
    fn half_blocks_pack_two_rows_per_cell() {
        let image = Grid::from_fn(2, 2, |_, y| if y == 0 { RED } else { BLUE });
        let mut s = Surface::new(2, 1);
        let footprint = s.blit_half_blocks(&image, 0, 0, 1);
        assert_eq!(footprint, (2, 1));
        let cell = s.get(1, 0).unwrap();
        assert_eq!(cell, Cell::new(HALF_BLOCK, RED, BLUE));
    }

    #[test]
    fn odd_height_pads_bottom_with_black() {
        let image = Grid::new(1, 3, RED);
        let mut s = Surface::new(1, 2);
        s.blit_half_blocks(&image, 0, 0, 1);
        assert_eq!(s.get(0, 1).unwrap().bg, Rgb::BLACK);
        assert_eq!(s.get(0, 1).unwrap().fg, RED);
    }

    #[test]
    fn step_downsamples() {
        let image = Grid::from_fn(8, 8, |x, y| Rgb::new(x as u8, y as u8, 0));
        let mut s = Surface::new(4, 2);
        let footprint = s.blit_half_blocks(&image, 0, 0, 2);
        assert_eq!(footprint, (4, 2));
        assert_eq!(footprint, half_block_footprint(8, 8, 2));
        // Cell (1, 1) shows pixel rows 4 and 6 of column 2.
        let cell = s.get(1, 1).unwrap();
        assert_eq!(cell.fg, Rgb::new(2, 4, 0));
        assert_eq!(cell.bg, Rgb::new(2, 6, 0));
    }

    #[test]
    fn fill_rect_clips() {
        let mut s = Surface::new(3, 3);
        s.fill_rect(1, 1, 10, 10, RED);
        assert_eq!(s.get(0, 0).unwrap(), Cell::BLANK);
        assert_eq!(s.get(2, 2).unwrap().bg, RED);
    }
}
