//! Grid geometry.
//!
//! The field is a square, row-major bit-field. Its side length is a
//! configuration input (frame header, config file) and is never recovered
//! from a buffer capacity with `floor(sqrt(..))`, which corrupts the layout of
//! any field whose cell count is not a perfect square.

use crate::constants::CELLS_PER_BYTE;

/// Dimensions of a square cell field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridDims {
    side: u32,
}

impl GridDims {
    /// Creates dimensions for a `side x side` field.
    ///
    /// A side of zero is raised to one so the shader never divides by zero.
    #[must_use]
    pub const fn new(side: u32) -> Self {
        Self {
            side: if side == 0 { 1 } else { side },
        }
    }

    /// Smallest square field that holds `cells` cells.
    ///
    /// Used only when neither the protocol nor the config supplies a side.
    #[must_use]
    pub fn covering(cells: usize) -> Self {
        let mut side = (cells as f64).sqrt() as usize;
        while side * side < cells {
            side += 1;
        }
        while side > 1 && (side - 1) * (side - 1) >= cells {
            side -= 1;
        }
        Self::new(u32::try_from(side).unwrap_or(u32::MAX))
    }

    /// Side length in cells.
    #[inline]
    #[must_use]
    pub const fn side(&self) -> u32 {
        self.side
    }

    /// Total cells in the field.
    #[inline]
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.side as usize * self.side as usize
    }

    /// Bytes a bit-packed frame body of this field occupies.
    #[inline]
    #[must_use]
    pub const fn body_len(&self) -> usize {
        self.cell_count().div_ceil(CELLS_PER_BYTE)
    }

    /// Maps a linear cell index to `(x, y)`.
    #[inline]
    #[must_use]
    pub const fn position(&self, index: usize) -> (usize, usize) {
        let side = self.side as usize;
        (index % side, index / side)
    }

    /// Dimensions as the `vec2<f32>` the vertex shader expects.
    #[inline]
    #[must_use]
    pub fn as_uniform(&self) -> [f32; 2] {
        let side = self.side as f32;
        [side, side]
    }
}

impl Default for GridDims {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_covering_perfect_square() {
        assert_eq!(GridDims::covering(64).side(), 8);
        assert_eq!(GridDims::covering(4096).side(), 64);
    }

    #[test]
    fn test_covering_rounds_up() {
        // floor(sqrt(72)) = 8 would drop the last row
        assert_eq!(GridDims::covering(72).side(), 9);
        assert_eq!(GridDims::covering(65).side(), 9);
        assert_eq!(GridDims::covering(2).side(), 2);
    }

    #[test]
    fn test_covering_degenerate() {
        assert_eq!(GridDims::covering(0).side(), 1);
        assert_eq!(GridDims::covering(1).side(), 1);
    }

    #[test]
    fn test_position_is_row_major() {
        let dims = GridDims::new(8);
        assert_eq!(dims.position(0), (0, 0));
        assert_eq!(dims.position(7), (7, 0));
        assert_eq!(dims.position(8), (0, 1));
        assert_eq!(dims.position(63), (7, 7));
    }

    #[test]
    fn test_body_len() {
        assert_eq!(GridDims::new(8).body_len(), 8);
        assert_eq!(GridDims::new(3).body_len(), 2);
        assert_eq!(GridDims::new(0).side(), 1);
    }
}
