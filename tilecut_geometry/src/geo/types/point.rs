use super::{Coordinates, GeometryTrait};
use std::fmt::Debug;

#[derive(Clone, Copy, PartialEq)]
pub struct PointGeometry(pub Coordinates);

impl PointGeometry {
	#[must_use]
	pub fn new(c: Coordinates) -> Self {
		Self(c)
	}

	#[must_use]
	pub fn x(&self) -> f64 {
		self.0.x()
	}

	#[must_use]
	pub fn y(&self) -> f64 {
		self.0.y()
	}
}

impl GeometryTrait for PointGeometry {
	fn for_each_coordinate(&self, f: &mut impl FnMut(&Coordinates)) {
		f(&self.0);
	}

	fn project(&mut self, projection: &impl Fn(Coordinates) -> Coordinates) {
		self.0 = projection(self.0);
	}
}

impl Debug for PointGeometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		self.0.fmt(f)
	}
}

impl<'a, T> From<&'a [T; 2]> for PointGeometry
where
	T: Copy + Into<f64>,
{
	fn from(value: &'a [T; 2]) -> Self {
		Self(Coordinates::from(value))
	}
}

impl From<[f64; 2]> for PointGeometry {
	fn from(value: [f64; 2]) -> Self {
		Self(Coordinates::from(value))
	}
}

impl From<Coordinates> for PointGeometry {
	fn from(value: Coordinates) -> Self {
		Self(value)
	}
}

impl From<&Coordinates> for PointGeometry {
	fn from(value: &Coordinates) -> Self {
		Self(*value)
	}
}

#[derive(Clone, PartialEq, Default)]
pub struct MultiPointGeometry(pub Vec<PointGeometry>);

impl GeometryTrait for MultiPointGeometry {
	fn for_each_coordinate(&self, f: &mut impl FnMut(&Coordinates)) {
		self.0.iter().for_each(|p| f(&p.0));
	}

	fn project(&mut self, projection: &impl Fn(Coordinates) -> Coordinates) {
		self.0.iter_mut().for_each(|p| p.project(projection));
	}
}

impl Debug for MultiPointGeometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(&self.0).finish()
	}
}

crate::impl_from_array!(MultiPointGeometry, PointGeometry);
crate::impl_composite_geometry!(MultiPointGeometry, PointGeometry);

#[cfg(test)]
mod tests {
	use super::*;
	use crate::CompositeGeometryTrait;

	#[test]
	fn test_point() {
		let mut point = PointGeometry::from(&[2, 3]);
		assert_eq!((point.x(), point.y()), (2.0, 3.0));
		point.project(&|c| Coordinates::new(c.x() * 2.0, c.y() + 1.0));
		assert_eq!(point, PointGeometry::from([4.0, 4.0]));
		assert_eq!(format!("{point:?}"), "[4.0, 4.0]");
	}

	#[test]
	fn test_multi_point() {
		let mp = MultiPointGeometry::from(&[[0, 0], [5, -1]]);
		assert_eq!(mp.len(), 2);
		assert_eq!(mp.coordinate_count(), 2);
		let bound = mp.compute_bounds().unwrap();
		assert_eq!(bound.min, Coordinates::new(0.0, -1.0));
		assert_eq!(bound.max, Coordinates::new(5.0, 0.0));
		assert_eq!(format!("{mp:?}"), "[[0.0, 0.0], [5.0, -1.0]]");
		assert!(MultiPointGeometry::new().compute_bounds().is_none());
	}
}
