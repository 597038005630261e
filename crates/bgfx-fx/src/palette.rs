#![forbid(unsafe_code)]

//! Palette index map.
//!
//! For a background and its ordered palette, [`PaletteMap`] records per pixel
//! the index of the first palette entry with exactly the same RGB value, or
//! `None` when no entry matches. Built once at load time; `O(W·H·N)`.

use bgfx_render::{ColorGrid, Grid, Rgb};

/// Per-pixel palette indices for one background.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteMap {
    indices: Grid<Option<u32>>,
    palette_len: u32,
}

impl PaletteMap {
    /// Match every pixel against `palette` by linear scan.
    ///
    /// Earlier entries win when the palette contains duplicates. A palette
    /// that matches nothing is not an error.
    pub fn build(pixels: &ColorGrid, palette: &[Rgb]) -> Self {
        let indices = pixels.map(|px| {
            palette
                .iter()
                .position(|&entry| entry == px)
                .map(|i| i as u32)
        });
        Self {
            indices,
            palette_len: palette.len() as u32,
        }
    }

    /// Map for a background without a palette: every pixel unmapped.
    pub fn unmapped(width: usize, height: usize) -> Self {
        Self {
            indices: Grid::new(width, height, None),
            palette_len: 0,
        }
    }

    /// Palette index at `(x, y)`, `None` if unmapped or out of bounds.
    #[inline]
    pub fn index(&self, x: usize, y: usize) -> Option<u32> {
        self.indices.get(x, y).flatten()
    }

    /// Index at `(x, y)` with unmapped pixels reported as the palette length.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is out of bounds.
    pub fn raw_index(&self, x: usize, y: usize) -> u32 {
        self.indices.at(x, y).unwrap_or(self.palette_len)
    }

    /// The value [`raw_index`](Self::raw_index) uses for "unmapped".
    #[inline]
    pub const fn sentinel(&self) -> u32 {
        self.palette_len
    }

    #[inline]
    pub const fn palette_len(&self) -> u32 {
        self.palette_len
    }

    pub fn dims(&self) -> (usize, usize) {
        self.indices.dims()
    }

    /// Number of pixels that matched a palette entry.
    pub fn mapped_count(&self) -> usize {
        self.indices.as_slice().iter().filter(|i| i.is_some()).count()
    }

    pub fn grid(&self) -> &Grid<Option<u32>> {
        &self.indices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: Rgb = Rgb::new(10, 20, 30);
    const B: Rgb = Rgb::new(40, 50, 60);
    const C: Rgb = Rgb::new(1, 1, 1);

    #[test]
    fn exact_match_only() {
        let pixels = Grid::from_vec(3, 1, vec![A, B, Rgb::new(10, 20, 31)]).unwrap();
        let map = PaletteMap::build(&pixels, &[A, B]);
        assert_eq!(map.index(0, 0), Some(0));
        assert_eq!(map.index(1, 0), Some(1));
        assert_eq!(map.index(2, 0), None);
        assert_eq!(map.mapped_count(), 2);
    }

    #[test]
    fn first_duplicate_wins() {
        let pixels = Grid::new(1, 1, B);
        let map = PaletteMap::build(&pixels, &[A, B, B]);
        assert_eq!(map.index(0, 0), Some(1));
    }

    #[test]
    fn raw_index_reports_sentinel() {
        let pixels = Grid::from_vec(2, 1, vec![A, C]).unwrap();
        let map = PaletteMap::build(&pixels, &[A, B]);
        assert_eq!(map.sentinel(), 2);
        assert_eq!(map.raw_index(0, 0), 0);
        assert_eq!(map.raw_index(1, 0), 2);
    }

    #[test]
    fn no_matches_is_not_an_error() {
        let pixels = Grid::new(4, 4, C);
        let map = PaletteMap::build(&pixels, &[A, B]);
        assert_eq!(map.mapped_count(), 0);
        assert_eq!(map.dims(), (4, 4));
    }

    #[test]
    fn empty_palette_leaves_everything_unmapped() {
        let pixels = Grid::new(2, 2, A);
        let built = PaletteMap::build(&pixels, &[]);
        assert_eq!(built, PaletteMap::unmapped(2, 2));
        assert_eq!(built.raw_index(1, 1), 0);
    }
}
