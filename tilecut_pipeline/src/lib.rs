//! Tile rendering on top of `tilecut_geometry`.
//!
//! Feature collections are turned into [`Layers`], pushed through the stage
//! operations (project, cull, clip, simplify, dedup) for one [`TileSpec`] and
//! encoded into a vector tile. [`TileRenderer`] drives the whole sequence, for one
//! tile or for many tiles in parallel.

mod config;
mod dedup;
mod layer;
mod render;
mod tile;

pub use config::{DedupConfig, PipelineConfig};
pub use dedup::remove_overlap_triangles;
pub use layer::{Layer, Layers, TRIANGLE_OVERLAP_ZOOM};
pub use render::TileRenderer;
pub use tile::TileSpec;
