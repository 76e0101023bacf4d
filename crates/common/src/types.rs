/// Errors raised while constructing a grid. No other grid operation can fail.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GridError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    ZeroDimension { width: u32, height: u32 },
    #[error("grid of {width}x{height} cells is not addressable")]
    TooLarge { width: u32, height: u32 },
    #[error("alive density must be within [0, 1], got {0}")]
    InvalidDensity(f64),
}

/// Validated width and height of a toroidal grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    width: u32,
    height: u32,
}

impl Dimensions {
    /// Validate a `width x height` grid. Both sides must be non-zero and the
    /// cell count must fit a `u32` linear index.
    pub fn new(width: u32, height: u32) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::ZeroDimension { width, height });
        }
        if width.checked_mul(height).is_none() {
            return Err(GridError::TooLarge { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Length in bytes of a buffer packing one bit per cell.
    pub fn byte_len(&self) -> usize {
        self.cell_count().div_ceil(8)
    }

    /// Normalize an arbitrary `(row, col)` onto the torus.
    ///
    /// Uses Euclidean remainder, so `-1` maps to the last row/column. This is
    /// the only place coordinates are wrapped.
    pub fn wrap(&self, row: i64, col: i64) -> (u32, u32) {
        let row = row.rem_euclid(i64::from(self.height)) as u32;
        let col = col.rem_euclid(i64::from(self.width)) as u32;
        (row, col)
    }

    /// Row-major linear index of an already-normalized coordinate.
    pub fn linear_index(&self, row: u32, col: u32) -> usize {
        debug_assert!(row < self.height && col < self.width);
        row as usize * self.width as usize + col as usize
    }
}
