//! Geometry for vector tiles: the feature model, projection between geographic and
//! tile space, clipping, Douglas-Peucker simplification and the Mapbox Vector Tile
//! codec.

mod geo;
pub mod clip;
pub mod geojson;
pub mod math;
pub mod projection;
pub mod simplify;
pub mod vector_tile;

pub use self::geo::*;
