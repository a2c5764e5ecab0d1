use super::*;
use std::fmt::Debug;

/// The geometry tree. Every stage of the pipeline (projection, clipping,
/// simplification, encoding) dispatches on this enum.
#[derive(Clone, PartialEq)]
pub enum Geometry {
	Point(PointGeometry),
	MultiPoint(MultiPointGeometry),
	LineString(LineStringGeometry),
	MultiLineString(MultiLineStringGeometry),
	Ring(RingGeometry),
	Polygon(PolygonGeometry),
	MultiPolygon(MultiPolygonGeometry),
	Collection(Vec<Geometry>),
}

fn to_coordinates<T: Copy + Into<f64>>(value: &[[T; 2]]) -> Vec<Coordinates> {
	value.iter().map(Coordinates::from).collect()
}

fn to_rings<T: Copy + Into<f64>>(value: &[Vec<[T; 2]>]) -> Vec<RingGeometry> {
	value.iter().map(|ring| RingGeometry(to_coordinates(ring))).collect()
}

impl Geometry {
	pub fn new_point<T: Copy + Into<f64>>(value: [T; 2]) -> Self {
		Self::Point(PointGeometry::from(&value))
	}

	pub fn new_multi_point<T: Copy + Into<f64>>(value: &[[T; 2]]) -> Self {
		Self::MultiPoint(MultiPointGeometry(value.iter().map(PointGeometry::from).collect()))
	}

	pub fn new_line_string<T: Copy + Into<f64>>(value: &[[T; 2]]) -> Self {
		Self::LineString(LineStringGeometry(to_coordinates(value)))
	}

	pub fn new_multi_line_string<T: Copy + Into<f64>>(value: &[Vec<[T; 2]>]) -> Self {
		Self::MultiLineString(MultiLineStringGeometry(
			value.iter().map(|line| LineStringGeometry(to_coordinates(line))).collect(),
		))
	}

	pub fn new_ring<T: Copy + Into<f64>>(value: &[[T; 2]]) -> Self {
		Self::Ring(RingGeometry(to_coordinates(value)))
	}

	pub fn new_polygon<T: Copy + Into<f64>>(value: &[Vec<[T; 2]>]) -> Self {
		Self::Polygon(PolygonGeometry(to_rings(value)))
	}

	pub fn new_multi_polygon<T: Copy + Into<f64>>(value: &[Vec<Vec<[T; 2]>>]) -> Self {
		Self::MultiPolygon(MultiPolygonGeometry(
			value.iter().map(|polygon| PolygonGeometry(to_rings(polygon))).collect(),
		))
	}

	#[must_use]
	pub fn type_name(&self) -> &'static str {
		match self {
			Geometry::Point(_) => "Point",
			Geometry::MultiPoint(_) => "MultiPoint",
			Geometry::LineString(_) => "LineString",
			Geometry::MultiLineString(_) => "MultiLineString",
			Geometry::Ring(_) => "Ring",
			Geometry::Polygon(_) => "Polygon",
			Geometry::MultiPolygon(_) => "MultiPolygon",
			Geometry::Collection(_) => "GeometryCollection",
		}
	}

	/// True if the geometry holds no coordinates at all.
	#[must_use]
	pub fn is_empty(&self) -> bool {
		match self {
			Geometry::Point(_) => false,
			Geometry::MultiPoint(g) => g.0.is_empty(),
			Geometry::LineString(g) => g.0.is_empty(),
			Geometry::MultiLineString(g) => g.0.iter().all(|l| l.0.is_empty()),
			Geometry::Ring(g) => g.0.is_empty(),
			Geometry::Polygon(g) => g.0.iter().all(|r| r.0.is_empty()),
			Geometry::MultiPolygon(g) => g.0.iter().all(|p| p.0.iter().all(|r| r.0.is_empty())),
			Geometry::Collection(g) => g.iter().all(Geometry::is_empty),
		}
	}

	/// Returns the first `n` coordinates in storage order (fewer if the geometry is smaller).
	#[must_use]
	pub fn first_coordinates(&self, n: usize) -> Vec<Coordinates> {
		let mut result = Vec::with_capacity(n);
		self.for_each_coordinate(&mut |c| {
			if result.len() < n {
				result.push(*c);
			}
		});
		result
	}
}

impl GeometryTrait for Geometry {
	fn for_each_coordinate(&self, f: &mut impl FnMut(&Coordinates)) {
		match self {
			Geometry::Point(g) => g.for_each_coordinate(f),
			Geometry::MultiPoint(g) => g.for_each_coordinate(f),
			Geometry::LineString(g) => g.for_each_coordinate(f),
			Geometry::MultiLineString(g) => g.for_each_coordinate(f),
			Geometry::Ring(g) => g.for_each_coordinate(f),
			Geometry::Polygon(g) => g.for_each_coordinate(f),
			Geometry::MultiPolygon(g) => g.for_each_coordinate(f),
			Geometry::Collection(g) => {
				for geometry in g {
					geometry.for_each_coordinate(f);
				}
			}
		}
	}

	fn project(&mut self, projection: &impl Fn(Coordinates) -> Coordinates) {
		match self {
			Geometry::Point(g) => g.project(projection),
			Geometry::MultiPoint(g) => g.project(projection),
			Geometry::LineString(g) => g.project(projection),
			Geometry::MultiLineString(g) => g.project(projection),
			Geometry::Ring(g) => g.project(projection),
			Geometry::Polygon(g) => g.project(projection),
			Geometry::MultiPolygon(g) => g.project(projection),
			Geometry::Collection(g) => {
				for geometry in g {
					geometry.project(projection);
				}
			}
		}
	}
}

impl Debug for Geometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let (type_name, inner): (&str, &dyn Debug) = match self {
			Geometry::Point(g) => ("Point", g),
			Geometry::MultiPoint(g) => ("MultiPoint", g),
			Geometry::LineString(g) => ("LineString", g),
			Geometry::MultiLineString(g) => ("MultiLineString", g),
			Geometry::Ring(g) => ("Ring", g),
			Geometry::Polygon(g) => ("Polygon", g),
			Geometry::MultiPolygon(g) => ("MultiPolygon", g),
			Geometry::Collection(g) => ("Collection", g),
		};
		f.debug_tuple(type_name).field(inner).finish()
	}
}

impl From<PointGeometry> for Geometry {
	fn from(g: PointGeometry) -> Self {
		Geometry::Point(g)
	}
}

impl From<MultiPointGeometry> for Geometry {
	fn from(g: MultiPointGeometry) -> Self {
		Geometry::MultiPoint(g)
	}
}

impl From<LineStringGeometry> for Geometry {
	fn from(g: LineStringGeometry) -> Self {
		Geometry::LineString(g)
	}
}

impl From<MultiLineStringGeometry> for Geometry {
	fn from(g: MultiLineStringGeometry) -> Self {
		Geometry::MultiLineString(g)
	}
}

impl From<RingGeometry> for Geometry {
	fn from(g: RingGeometry) -> Self {
		Geometry::Ring(g)
	}
}

impl From<PolygonGeometry> for Geometry {
	fn from(g: PolygonGeometry) -> Self {
		Geometry::Polygon(g)
	}
}

impl From<MultiPolygonGeometry> for Geometry {
	fn from(g: MultiPolygonGeometry) -> Self {
		Geometry::MultiPolygon(g)
	}
}
