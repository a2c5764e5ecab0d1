//! GeoJSON input and output.
//!
//! Converts GeoJSON text into [`crate::GeoCollection`] and back. Parsing walks a
//! `serde_json::Value` tree; malformed positions and unknown types surface as
//! [`crate::vector_tile::CodecError`] inside the returned `anyhow` error.

mod parse;
mod read;
mod write;

pub use parse::*;
pub use read::*;
pub use write::*;
