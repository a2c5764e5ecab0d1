use super::{Coordinates, GeometryTrait, RingGeometry};
use std::fmt::Debug;

/// An exterior ring followed by zero or more interior rings (holes).
#[derive(Clone, PartialEq, Default)]
pub struct PolygonGeometry(pub Vec<RingGeometry>);

impl PolygonGeometry {
	#[must_use]
	pub fn exterior(&self) -> Option<&RingGeometry> {
		self.0.first()
	}

	#[must_use]
	pub fn interiors(&self) -> &[RingGeometry] {
		self.0.get(1..).unwrap_or_default()
	}
}

impl GeometryTrait for PolygonGeometry {
	fn for_each_coordinate(&self, f: &mut impl FnMut(&Coordinates)) {
		for ring in &self.0 {
			ring.for_each_coordinate(f);
		}
	}

	fn project(&mut self, projection: &impl Fn(Coordinates) -> Coordinates) {
		for ring in &mut self.0 {
			ring.project(projection);
		}
	}
}

impl Debug for PolygonGeometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(&self.0).finish()
	}
}

crate::impl_from_array!(PolygonGeometry, RingGeometry);
crate::impl_composite_geometry!(PolygonGeometry, RingGeometry);

impl From<RingGeometry> for PolygonGeometry {
	fn from(ring: RingGeometry) -> Self {
		PolygonGeometry(vec![ring])
	}
}

#[derive(Clone, PartialEq, Default)]
pub struct MultiPolygonGeometry(pub Vec<PolygonGeometry>);

impl GeometryTrait for MultiPolygonGeometry {
	fn for_each_coordinate(&self, f: &mut impl FnMut(&Coordinates)) {
		for polygon in &self.0 {
			polygon.for_each_coordinate(f);
		}
	}

	fn project(&mut self, projection: &impl Fn(Coordinates) -> Coordinates) {
		for polygon in &mut self.0 {
			polygon.project(projection);
		}
	}
}

impl Debug for MultiPolygonGeometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(&self.0).finish()
	}
}

crate::impl_from_array!(MultiPolygonGeometry, PolygonGeometry);
crate::impl_composite_geometry!(MultiPolygonGeometry, PolygonGeometry);
