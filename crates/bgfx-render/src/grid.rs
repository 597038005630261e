#![forbid(unsafe_code)]

//! Fixed-size 2D grid storage.
//!
//! `Grid<T>` is a flat row-major buffer with explicit stride helpers. It backs
//! both the source pixels of a background ([`ColorGrid`]) and derived
//! per-pixel data such as palette indices.
//!
//! # Layout
//!
//! Cells are stored in row-major order: `index = y * width + x`.
//!
//! # Invariants
//!
//! 1. `cells.len() == width * height`
//! 2. Width and height never change after creation

use crate::color::Rgb;

/// A grid of source or output pixels.
pub type ColorGrid = Grid<Rgb>;

/// Row-major 2D grid with bounds-checked accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

/// Returned by [`Grid::from_vec`] when the cell count does not match the dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSizeMismatch {
    pub width: usize,
    pub height: usize,
    pub len: usize,
}

impl std::fmt::Display for GridSizeMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "grid of {}x{} needs {} cells, got {}",
            self.width,
            self.height,
            self.width * self.height,
            self.len
        )
    }
}

impl std::error::Error for GridSizeMismatch {}

impl<T: Copy> Grid<T> {
    /// Create a grid filled with `fill`.
    pub fn new(width: usize, height: usize, fill: T) -> Self {
        Self {
            width,
            height,
            cells: vec![fill; width * height],
        }
    }

    /// Wrap an existing row-major buffer.
    ///
    /// # Errors
    ///
    /// Returns [`GridSizeMismatch`] if `cells.len() != width * height`.
    pub fn from_vec(width: usize, height: usize, cells: Vec<T>) -> Result<Self, GridSizeMismatch> {
        if cells.len() != width * height {
            return Err(GridSizeMismatch {
                width,
                height,
                len: cells.len(),
            });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Build a grid by evaluating `f(x, y)` for every cell in row-major order.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                cells.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    #[inline]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`.
    #[inline]
    pub const fn dims(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Flat index of `(x, y)`, or `None` when out of bounds.
    #[inline]
    pub fn index_of(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then_some(y * self.width + x)
    }

    /// Cell at `(x, y)`, or `None` when out of bounds.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<T> {
        self.index_of(x, y).map(|i| self.cells[i])
    }

    /// Cell at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is out of bounds.
    #[inline]
    pub fn at(&self, x: usize, y: usize) -> T {
        assert!(
            x < self.width && y < self.height,
            "grid access ({x}, {y}) out of bounds for {}x{}",
            self.width,
            self.height
        );
        self.cells[y * self.width + x]
    }

    /// Write `value` at `(x, y)`. Out-of-bounds writes are ignored.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: T) {
        if let Some(i) = self.index_of(x, y) {
            self.cells[i] = value;
        }
    }

    /// Overwrite every cell.
    pub fn fill(&mut self, value: T) {
        self.cells.fill(value);
    }

    /// Row `y` as a slice.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: usize) -> &[T] {
        let start = y * self.width;
        &self.cells[start..start + self.width]
    }

    /// Row `y` as a mutable slice.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_mut(&mut self, y: usize) -> &mut [T] {
        let start = y * self.width;
        &mut self.cells[start..start + self.width]
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        // chunks_exact(0) panics; a zero-width grid has no cells to yield anyway.
        self.cells.chunks_exact(self.width.max(1))
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.cells
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.cells
    }

    /// Map every cell into a new grid of the same size.
    pub fn map<U: Copy>(&self, f: impl FnMut(T) -> U) -> Grid<U> {
        Grid {
            width: self.width,
            height: self.height,
            cells: self.cells.iter().copied().map(f).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_fills_every_cell() {
        let g = Grid::new(4, 3, 7u8);
        assert_eq!(g.dims(), (4, 3));
        assert_eq!(g.len(), 12);
        assert!(g.as_slice().iter().all(|&c| c == 7));
    }

    #[test]
    fn from_vec_rejects_wrong_length() {
        let err = Grid::from_vec(2, 2, vec![0u8; 3]).unwrap_err();
        assert_eq!(
            err,
            GridSizeMismatch {
                width: 2,
                height: 2,
                len: 3
            }
        );
        assert_eq!(err.to_string(), "grid of 2x2 needs 4 cells, got 3");
    }

    #[test]
    fn from_fn_is_row_major() {
        let g = Grid::from_fn(3, 2, |x, y| (y * 10 + x) as u8);
        assert_eq!(g.as_slice(), &[0, 1, 2, 10, 11, 12]);
        assert_eq!(g.at(2, 1), 12);
        assert_eq!(g.row(1), &[10, 11, 12]);
    }

    #[test]
    fn get_is_bounds_checked() {
        let g = Grid::new(2, 2, 1u8);
        assert_eq!(g.get(1, 1), Some(1));
        assert_eq!(g.get(2, 0), None);
        assert_eq!(g.get(0, 2), None);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn at_panics_out_of_bounds() {
        let g = Grid::new(2, 2, 0u8);
        let _ = g.at(2, 0);
    }

    #[test]
    fn set_ignores_out_of_bounds() {
        let mut g = Grid::new(2, 2, 0u8);
        g.set(1, 0, 5);
        g.set(9, 9, 5);
        assert_eq!(g.as_slice(), &[0, 5, 0, 0]);
    }

    #[test]
    fn rows_iterate_top_to_bottom() {
        let g = Grid::from_fn(2, 3, |_, y| y as u8);
        let rows: Vec<&[u8]> = g.rows().collect();
        assert_eq!(rows, vec![&[0, 0][..], &[1, 1][..], &[2, 2][..]]);
    }

    #[test]
    fn zero_width_grid_has_no_rows() {
        let g: Grid<u8> = Grid::new(0, 4, 0);
        assert!(g.is_empty());
        assert_eq!(g.rows().count(), 0);
    }

    #[test]
    fn map_preserves_dimensions() {
        let g = Grid::from_fn(3, 2, |x, _| x as u8);
        let doubled = g.map(|c| u16::from(c) * 2);
        assert_eq!(doubled.dims(), (3, 2));
        assert_eq!(doubled.row(0), &[0, 2, 4]);
    }

    #[test]
    fn color_grid_alias() {
        let mut g: ColorGrid = Grid::new(2, 1, Rgb::BLACK);
        g.row_mut(0)[1] = Rgb::WHITE;
        assert_eq!(g.at(1, 0), Rgb::WHITE);
    }
}
