//! Game of Life kernel: packed-bit toroidal universe, B3/S23 stepping.
//!
//! # Invariants
//! - Every generation is computed from a frozen snapshot of the previous one.
//! - Coordinates wrap on both axes; per-cell operations cannot fail.
//! - The packed buffer is allocated once per universe and never resized.

pub mod bitgrid;
pub mod config;
pub mod patterns;
pub mod rule;
pub mod universe;

pub use bitgrid::BitGrid;
pub use config::{ConfigError, UniverseConfig, DEFAULT_DENSITY};
pub use lifegrid_common::{Dimensions, GridError};
pub use patterns::Pattern;
pub use universe::Universe;
