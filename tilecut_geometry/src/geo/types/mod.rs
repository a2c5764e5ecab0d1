// Geometry primitives: coordinates, bounds, points, lines, rings and polygons plus
// their multi-geometry counterparts. All of them share `GeometryTrait`, and the
// collection-like ones also implement `CompositeGeometryTrait`.

mod bound;
mod coordinates;
mod linestring;
mod macros;
mod point;
mod polygon;
mod ring;
mod traits;

pub use bound::*;
pub use coordinates::*;
pub use linestring::*;
pub use point::*;
pub use polygon::*;
pub use ring::*;
pub use traits::*;
