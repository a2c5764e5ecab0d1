//! Vector Tile (MVT) support.
//!
//! Low-level read/write of the Mapbox Vector Tile protobuf format:
//!
//! - [`commands`]: the geometry command stream with its zigzag delta coding.
//! - [`geometry_type`]: the wire-level geometry type.
//! - [`feature`]: one feature in wire form.
//! - [`layer`]: a layer with its key/value tables and features.
//! - [`property_manager`]: interning of keys and values into tag indices.
//! - [`tile`]: the top-level container holding the layers.
//! - [`value`]: typed layer values.
//!
//! Decoding is defensive: malformed input turns into a [`CodecError`] or an
//! `anyhow` error carrying one, never into a panic.

mod commands;
mod error;
mod feature;
mod geometry_type;
mod layer;
mod property_manager;
mod tile;
mod value;

pub use commands::{command_word, decode_geometry, encode_geometry, zigzag_decode, zigzag_encode};
pub use error::CodecError;
pub use feature::VectorTileFeature;
pub use geometry_type::GeomType;
pub use layer::{DEFAULT_EXTENT, DEFAULT_VERSION, VectorTileLayer};
pub use property_manager::{PropertyManager, VTLPMap};
pub use tile::VectorTile;
pub use value::ValueKey;
