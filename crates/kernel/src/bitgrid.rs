use lifegrid_common::{Dimensions, GridError};

/// Fixed-size 2D boolean grid packed one bit per cell, row-major.
///
/// Cell `(row, col)` lives at linear index `i = row * width + col`, stored in
/// `bytes[i / 8]` under mask `1 << (i % 8)`. Padding bits past the last cell
/// are always zero. The buffer is allocated once and never resized.
///
/// Coordinates passed to [`get`](Self::get) and [`set`](Self::set) must
/// already be normalized; wraparound is the owner's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitGrid {
    dims: Dimensions,
    bytes: Box<[u8]>,
}

impl BitGrid {
    /// Allocate an all-dead grid.
    pub fn new(width: u32, height: u32) -> Result<Self, GridError> {
        Ok(Self::with_dimensions(Dimensions::new(width, height)?))
    }

    /// Allocate an all-dead grid for pre-validated dimensions.
    pub fn with_dimensions(dims: Dimensions) -> Self {
        Self {
            dims,
            bytes: vec![0u8; dims.byte_len()].into_boxed_slice(),
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    pub fn width(&self) -> u32 {
        self.dims.width()
    }

    pub fn height(&self) -> u32 {
        self.dims.height()
    }

    /// Read the cell at a normalized coordinate.
    pub fn get(&self, row: u32, col: u32) -> bool {
        self.get_index(self.dims.linear_index(row, col))
    }

    /// Write the cell at a normalized coordinate, leaving every other bit untouched.
    pub fn set(&mut self, row: u32, col: u32, alive: bool) {
        let idx = self.dims.linear_index(row, col);
        self.set_index(idx, alive);
    }

    /// Flip the cell at a normalized coordinate.
    pub fn toggle(&mut self, row: u32, col: u32) {
        let idx = self.dims.linear_index(row, col);
        self.bytes[idx / 8] ^= mask(idx);
    }

    /// Read by linear index.
    pub fn get_index(&self, idx: usize) -> bool {
        self.bytes[idx / 8] & mask(idx) != 0
    }

    /// Write by linear index.
    pub fn set_index(&mut self, idx: usize, alive: bool) {
        let byte = &mut self.bytes[idx / 8];
        if alive {
            *byte |= mask(idx);
        } else {
            *byte &= !mask(idx);
        }
    }

    /// Set every cell to `alive` in one pass.
    pub fn fill(&mut self, alive: bool) {
        let value = if alive { 0xFF } else { 0x00 };
        self.bytes.fill(value);
        if alive {
            self.clear_padding();
        }
    }

    /// Read-only view of the packed buffer.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of live cells.
    pub fn count_ones(&self) -> usize {
        self.bytes.iter().map(|b| b.count_ones() as usize).sum()
    }

    fn clear_padding(&mut self) {
        let used = self.dims.cell_count() % 8;
        if used == 0 {
            return;
        }
        if let Some(last) = self.bytes.last_mut() {
            *last &= (1u8 << used) - 1;
        }
    }
}

fn mask(idx: usize) -> u8 {
    1 << (idx % 8)
}
