//! Moving coordinates between geographic space and a tile's local grid.
//!
//! [`mercator`] holds the spherical mercator formulas. [`TileProjection`] builds the
//! pair of projectors for one tile and extent.

pub mod mercator;
mod tile_projection;

pub use tile_projection::*;
