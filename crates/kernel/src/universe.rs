use std::fmt;

use lifegrid_common::{Dimensions, GridError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::bitgrid::BitGrid;
use crate::config::{self, UniverseConfig};
use crate::patterns::Pattern;
use crate::rule;

/// A toroidal Game of Life universe.
///
/// Owns the current generation and a scratch grid of the same size. Every
/// generation is computed into the scratch grid from a frozen snapshot of the
/// current one, then the two are swapped, so neither buffer is reallocated
/// after construction.
///
/// The packed buffer returned by [`cells`](Self::cells) is only meaningful
/// until the next mutating call. After a `tick` the previous view refers to
/// what is now the scratch grid and holds stale bytes.
#[derive(Debug, Clone)]
pub struct Universe {
    current: BitGrid,
    scratch: BitGrid,
    /// Probability that `randomize` makes a cell alive.
    density: f64,
    /// Seed for the next `randomize`. Advanced after every use.
    seed: u64,
}

impl Universe {
    /// Create an all-dead universe with default density and seed.
    pub fn new(width: u32, height: u32) -> Result<Self, GridError> {
        Self::from_config(&UniverseConfig::new(width, height))
    }

    /// Create an all-dead universe from a configuration.
    pub fn from_config(config: &UniverseConfig) -> Result<Self, GridError> {
        let dims = config.validate()?;
        tracing::debug!(
            width = dims.width(),
            height = dims.height(),
            bytes = dims.byte_len(),
            "universe created"
        );
        Ok(Self {
            current: BitGrid::with_dimensions(dims),
            scratch: BitGrid::with_dimensions(dims),
            density: config.density,
            seed: config.seed,
        })
    }

    pub fn width(&self) -> u32 {
        self.current.width()
    }

    pub fn height(&self) -> u32 {
        self.current.height()
    }

    pub fn dimensions(&self) -> Dimensions {
        self.current.dimensions()
    }

    /// Packed bit buffer of the current generation.
    ///
    /// Bit `i = row * width + col` is `bytes[i / 8] & (1 << (i % 8))`.
    pub fn cells(&self) -> &[u8] {
        self.current.as_bytes()
    }

    /// Typed view of the current generation.
    pub fn get_cells(&self) -> &BitGrid {
        &self.current
    }

    /// Whether the cell at `(row, col)` is alive, after wraparound.
    pub fn is_alive(&self, row: impl Into<i64>, col: impl Into<i64>) -> bool {
        let (row, col) = self.normalize(row.into(), col.into());
        self.current.get(row, col)
    }

    /// Number of live cells in the current generation.
    pub fn live_count(&self) -> usize {
        self.current.count_ones()
    }

    pub fn density(&self) -> f64 {
        self.density
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Change the alive probability used by `randomize`.
    pub fn set_density(&mut self, density: f64) -> Result<(), GridError> {
        config::validate_density(density)?;
        self.density = density;
        Ok(())
    }

    /// Restart the seed stream consumed by `randomize`.
    pub fn reseed(&mut self, seed: u64) {
        self.seed = seed;
    }

    /// Advance the universe by exactly one generation.
    pub fn tick(&mut self) {
        let _span = tracing::trace_span!("tick").entered();
        let dims = self.current.dimensions();
        let mut births = 0usize;
        let mut deaths = 0usize;

        for row in 0..dims.height() {
            for col in 0..dims.width() {
                let alive = self.current.get(row, col);
                let next = rule::next_state(alive, self.live_neighbor_count(row, col));
                match (alive, next) {
                    (false, true) => births += 1,
                    (true, false) => deaths += 1,
                    _ => {}
                }
                self.scratch.set(row, col, next);
            }
        }

        std::mem::swap(&mut self.current, &mut self.scratch);
        tracing::trace!(
            births,
            deaths,
            live = self.current.count_ones(),
            "generation advanced"
        );
    }

    /// Flip one cell. Coordinates wrap around both axes.
    pub fn toggle_cell(&mut self, row: impl Into<i64>, col: impl Into<i64>) {
        let (row, col) = self.normalize(row.into(), col.into());
        self.current.toggle(row, col);
    }

    /// Force one cell alive. Coordinates wrap around both axes.
    pub fn activate_cell(&mut self, row: impl Into<i64>, col: impl Into<i64>) {
        let (row, col) = self.normalize(row.into(), col.into());
        self.current.set(row, col, true);
    }

    /// Force every listed cell alive.
    pub fn set_cells(&mut self, cells: &[(i64, i64)]) {
        for &(row, col) in cells {
            self.activate_cell(row, col);
        }
    }

    /// Stamp a pattern with its top-left corner at `(row, col)`. Cells that
    /// fall off an edge wrap to the other side.
    pub fn place(&mut self, pattern: &Pattern, row: impl Into<i64>, col: impl Into<i64>) {
        let (row, col) = (row.into(), col.into());
        for &(dr, dc) in pattern.cells {
            self.activate_cell(row + dr, col + dc);
        }
    }

    /// Overwrite every cell with an independent pseudo-random state.
    ///
    /// Draws from the current seed, then advances it, so consecutive calls
    /// produce different grids while a fixed starting seed is reproducible.
    pub fn randomize(&mut self) {
        tracing::debug!(density = self.density, seed = self.seed, "randomizing");
        let mut rng = StdRng::seed_from_u64(self.seed);
        self.seed = splitmix64(self.seed);
        for idx in 0..self.current.dimensions().cell_count() {
            self.current.set_index(idx, rng.gen_bool(self.density));
        }
    }

    /// Kill every cell.
    pub fn clear(&mut self) {
        tracing::debug!("clearing universe");
        self.current.fill(false);
    }

    /// Deterministic hash of the current generation and dimensions.
    pub fn state_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325; // FNV offset basis
        let mix = |h: &mut u64, bytes: &[u8]| {
            for &b in bytes {
                *h ^= b as u64;
                *h = h.wrapping_mul(0x0100_0000_01b3);
            }
        };
        mix(&mut h, &self.width().to_le_bytes());
        mix(&mut h, &self.height().to_le_bytes());
        mix(&mut h, self.current.as_bytes());
        h
    }

    fn normalize(&self, row: i64, col: i64) -> (u32, u32) {
        self.current.dimensions().wrap(row, col)
    }

    /// Live cells among the distinct toroidally-adjacent cells of `(row, col)`.
    ///
    /// On axes shorter than 3 the wrapped offsets collide; each distinct cell
    /// is counted once and the cell itself never counts.
    fn live_neighbor_count(&self, row: u32, col: u32) -> u8 {
        let (row_i, col_i) = (i64::from(row), i64::from(col));
        let (rows, row_len) = axis_span(|d| self.normalize(row_i + d, col_i).0);
        let (cols, col_len) = axis_span(|d| self.normalize(row_i, col_i + d).1);

        let mut count = 0;
        for &r in &rows[..row_len] {
            for &c in &cols[..col_len] {
                if (r, c) != (row, col) && self.current.get(r, c) {
                    count += 1;
                }
            }
        }
        count
    }
}

/// Distinct wrapped positions at offsets -1, 0 and +1 along one axis.
fn axis_span(wrap: impl Fn(i64) -> u32) -> ([u32; 3], usize) {
    let mut span = [0u32; 3];
    let mut len = 0;
    for d in -1..=1 {
        let pos = wrap(d);
        if !span[..len].contains(&pos) {
            span[len] = pos;
            len += 1;
        }
    }
    (span, len)
}

impl fmt::Display for Universe {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..self.height() {
            for col in 0..self.width() {
                let symbol = if self.current.get(row, col) { '◼' } else { '◻' };
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Splitmix64 step, used to advance the randomize seed.
fn splitmix64(mut state: u64) -> u64 {
    state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::{BLINKER, GLIDER};

    fn alive_cells(u: &Universe) -> Vec<(u32, u32)> {
        let mut cells = Vec::new();
        for row in 0..u.height() {
            for col in 0..u.width() {
                if u.get_cells().get(row, col) {
                    cells.push((row, col));
                }
            }
        }
        cells
    }

    #[test]
    fn universe_starts_dead() {
        let u = Universe::new(7, 3).unwrap();
        assert_eq!(u.width(), 7);
        assert_eq!(u.height(), 3);
        assert_eq!(u.cells(), &[0, 0, 0]);
        assert_eq!(u.live_count(), 0);
    }

    #[test]
    fn zero_dimensions_fail_construction() {
        assert!(matches!(
            Universe::new(0, 3),
            Err(GridError::ZeroDimension { .. })
        ));
        assert!(Universe::new(3, 0).is_err());
    }

    #[test]
    fn invalid_density_fails_construction() {
        let mut config = UniverseConfig::new(4, 4);
        config.density = 2.0;
        assert_eq!(
            Universe::from_config(&config).unwrap_err(),
            GridError::InvalidDensity(2.0)
        );
    }

    #[test]
    fn toggle_wraps_negative_and_oversized() {
        let mut u = Universe::new(5, 4).unwrap();
        u.toggle_cell(-1, -1);
        assert_eq!(alive_cells(&u), vec![(3, 4)]);
        u.toggle_cell(7, 5);
        assert_eq!(alive_cells(&u), vec![(3, 0), (3, 4)]);
        u.toggle_cell(3u32, 4u32);
        assert_eq!(alive_cells(&u), vec![(3, 0)]);
    }

    #[test]
    fn toggle_twice_restores_only_that_cell() {
        let mut u = Universe::new(6, 6).unwrap();
        u.set_cells(&[(0, 0), (2, 3), (5, 5)]);
        let before = u.get_cells().clone();
        u.toggle_cell(2, 3);
        assert!(!u.is_alive(2, 3));
        assert_eq!(u.live_count(), 2);
        u.toggle_cell(2, 3);
        assert_eq!(u.get_cells(), &before);
    }

    #[test]
    fn activate_is_idempotent() {
        let mut u = Universe::new(6, 6).unwrap();
        u.activate_cell(1, 2);
        let once = u.get_cells().clone();
        u.activate_cell(1, 2);
        assert_eq!(u.get_cells(), &once);
        assert_eq!(u.live_count(), 1);
    }

    #[test]
    fn activate_wraps_like_is_alive() {
        let mut u = Universe::new(4, 3).unwrap();
        u.activate_cell(-4, 9);
        assert!(u.is_alive(2, 1));
        assert!(u.is_alive(-1, -3));
    }

    #[test]
    fn clear_zeroes_buffer() {
        let mut u = Universe::new(5, 5).unwrap();
        u.randomize();
        u.clear();
        assert_eq!(u.cells(), &[0u8; 4]);
    }

    #[test]
    fn randomize_keeps_dimensions_and_length() {
        let mut u = Universe::new(13, 7).unwrap();
        u.randomize();
        assert_eq!(u.width(), 13);
        assert_eq!(u.height(), 7);
        assert_eq!(u.cells().len(), 12);
        assert!(u.live_count() <= 91);
    }

    #[test]
    fn randomize_advances_seed() {
        let mut u = Universe::new(32, 32).unwrap();
        u.randomize();
        let first = u.state_hash();
        assert_ne!(u.seed(), 0);
        u.randomize();
        assert_ne!(u.state_hash(), first);
    }

    #[test]
    fn randomize_same_seed_is_reproducible() {
        let mut a = Universe::new(20, 20).unwrap();
        let mut b = Universe::new(20, 20).unwrap();
        a.reseed(42);
        b.reseed(42);
        a.randomize();
        b.randomize();
        assert_eq!(a.cells(), b.cells());
    }

    #[test]
    fn randomize_density_extremes() {
        let mut u = Universe::new(9, 9).unwrap();
        u.set_density(1.0).unwrap();
        u.randomize();
        assert_eq!(u.live_count(), 81);
        u.set_density(0.0).unwrap();
        u.randomize();
        assert_eq!(u.live_count(), 0);
    }

    #[test]
    fn set_density_rejects_out_of_range() {
        let mut u = Universe::new(3, 3).unwrap();
        assert!(u.set_density(1.01).is_err());
        assert_eq!(u.density(), config::DEFAULT_DENSITY);
    }

    #[test]
    fn randomize_leaves_padding_zero() {
        let mut u = Universe::new(3, 3).unwrap();
        u.set_density(1.0).unwrap();
        u.randomize();
        assert_eq!(u.cells(), &[0xFF, 0x01]);
    }

    #[test]
    fn tick_reads_frozen_snapshot() {
        // A vertical blinker must become horizontal in a single step; an
        // in-place update would corrupt later neighbor counts.
        let mut u = Universe::new(5, 5).unwrap();
        u.set_cells(&[(1, 2), (2, 2), (3, 2)]);
        u.tick();
        assert_eq!(alive_cells(&u), vec![(2, 1), (2, 2), (2, 3)]);
    }

    #[test]
    fn neighbors_wrap_across_corners() {
        let mut u = Universe::new(6, 6).unwrap();
        u.set_cells(&[(0, 0), (0, 5), (5, 0)]);
        // (5, 5) touches all three through the corners and is born.
        u.tick();
        assert!(u.is_alive(5, 5));
    }

    #[test]
    fn single_column_never_counts_self() {
        // Width 1: left and right neighbors wrap onto the cell itself.
        let mut u = Universe::new(1, 5).unwrap();
        u.activate_cell(2, 0);
        assert_eq!(u.live_neighbor_count(2, 0), 0);
        u.tick();
        assert_eq!(u.live_count(), 0);
    }

    #[test]
    fn single_row_never_counts_self() {
        let mut u = Universe::new(5, 1).unwrap();
        u.activate_cell(0, 2);
        assert_eq!(u.live_neighbor_count(0, 2), 0);
        assert_eq!(u.live_neighbor_count(0, 1), 1);
    }

    #[test]
    fn two_by_two_counts_each_neighbor_once() {
        let mut u = Universe::new(2, 2).unwrap();
        u.set_cells(&[(0, 0), (0, 1), (1, 0), (1, 1)]);
        assert_eq!(u.live_neighbor_count(0, 0), 3);
    }

    #[test]
    fn place_wraps_pattern() {
        let mut u = Universe::new(5, 5).unwrap();
        u.place(&BLINKER, 0, 4);
        assert_eq!(alive_cells(&u), vec![(0, 0), (0, 1), (0, 4)]);
    }

    #[test]
    fn place_glider() {
        let mut u = Universe::new(8, 8).unwrap();
        u.place(&GLIDER, 1, 1);
        assert_eq!(
            alive_cells(&u),
            vec![(1, 2), (2, 3), (3, 1), (3, 2), (3, 3)]
        );
    }

    #[test]
    fn display_renders_rows() {
        let mut u = Universe::new(3, 2).unwrap();
        u.activate_cell(0, 1);
        u.activate_cell(1, 2);
        assert_eq!(u.to_string(), "◻◼◻\n◻◻◼\n");
    }

    #[test]
    fn state_hash_tracks_contents() {
        let mut a = Universe::new(8, 8).unwrap();
        let b = Universe::new(8, 8).unwrap();
        assert_eq!(a.state_hash(), b.state_hash());
        a.activate_cell(3, 3);
        assert_ne!(a.state_hash(), b.state_hash());
    }

    #[test]
    fn state_hash_includes_dimensions() {
        let a = Universe::new(8, 2).unwrap();
        let b = Universe::new(4, 4).unwrap();
        assert_eq!(a.cells(), b.cells());
        assert_ne!(a.state_hash(), b.state_hash());
    }

    #[test]
    fn splitmix64_is_deterministic() {
        assert_eq!(splitmix64(7), splitmix64(7));
        assert_ne!(splitmix64(1), splitmix64(2));
    }
}
