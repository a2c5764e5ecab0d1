use super::{Coordinates, GeometryTrait};
use std::fmt::Debug;

/// An open polyline.
#[derive(Clone, PartialEq, Default)]
pub struct LineStringGeometry(pub Vec<Coordinates>);

impl GeometryTrait for LineStringGeometry {
	fn for_each_coordinate(&self, f: &mut impl FnMut(&Coordinates)) {
		self.0.iter().for_each(f);
	}

	fn project(&mut self, projection: &impl Fn(Coordinates) -> Coordinates) {
		self.0.iter_mut().for_each(|c| *c = projection(*c));
	}
}

impl Debug for LineStringGeometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(&self.0).finish()
	}
}

crate::impl_from_array!(LineStringGeometry, Coordinates);
crate::impl_composite_geometry!(LineStringGeometry, Coordinates);

#[derive(Clone, PartialEq, Default)]
pub struct MultiLineStringGeometry(pub Vec<LineStringGeometry>);

impl GeometryTrait for MultiLineStringGeometry {
	fn for_each_coordinate(&self, f: &mut impl FnMut(&Coordinates)) {
		self.0.iter().for_each(|line| line.for_each_coordinate(f));
	}

	fn project(&mut self, projection: &impl Fn(Coordinates) -> Coordinates) {
		self.0.iter_mut().for_each(|line| line.project(projection));
	}
}

impl Debug for MultiLineStringGeometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(&self.0).finish()
	}
}

crate::impl_from_array!(MultiLineStringGeometry, LineStringGeometry);
crate::impl_composite_geometry!(MultiLineStringGeometry, LineStringGeometry);
