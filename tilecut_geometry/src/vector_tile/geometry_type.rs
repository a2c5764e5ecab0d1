use super::CodecError;
use crate::geo::Geometry;

/// The wire-level geometry type of a vector tile feature (field 3).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum GeomType {
	#[default]
	Unknown = 0,
	Point = 1,
	LineString = 2,
	Polygon = 3,
}

impl GeomType {
	pub fn as_u64(&self) -> u64 {
		*self as u64
	}
}

impl From<u64> for GeomType {
	fn from(value: u64) -> Self {
		match value {
			1 => GeomType::Point,
			2 => GeomType::LineString,
			3 => GeomType::Polygon,
			_ => GeomType::Unknown,
		}
	}
}

impl TryFrom<&Geometry> for GeomType {
	type Error = CodecError;

	fn try_from(geometry: &Geometry) -> Result<Self, CodecError> {
		use Geometry::*;
		match geometry {
			Point(_) | MultiPoint(_) => Ok(GeomType::Point),
			LineString(_) | MultiLineString(_) => Ok(GeomType::LineString),
			Ring(_) | Polygon(_) | MultiPolygon(_) => Ok(GeomType::Polygon),
			Collection(_) => Err(CodecError::UnsupportedGeometryType(geometry.type_name().to_string())),
		}
	}
}
