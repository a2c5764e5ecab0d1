//! Small geometric predicates.

mod triangle;

pub use triangle::{RelateOverlap, Triangle, TriangleOverlap};
