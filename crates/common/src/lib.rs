//! Shared grid types: dimensions, toroidal addressing, construction errors.
//!
//! # Invariants
//! - A `Dimensions` value always has a positive, addressable cell count.
//! - Every coordinate reaching storage has been normalized by [`Dimensions::wrap`].

mod types;

pub use types::{Dimensions, GridError};
