use crate::geo::{Coordinates, Geometry};
use geo::{Relate, Triangle as GeoTriangle};
use std::fmt::Debug;

/// Three corners in the plane. The winding is not significant.
#[derive(Clone, Copy, PartialEq)]
pub struct Triangle(pub [Coordinates; 3]);

impl Triangle {
	#[must_use]
	pub fn new(a: impl Into<Coordinates>, b: impl Into<Coordinates>, c: impl Into<Coordinates>) -> Self {
		Self([a.into(), b.into(), c.into()])
	}

	/// Builds a triangle from the first three coordinates of any geometry.
	#[must_use]
	pub fn from_geometry(geometry: &Geometry) -> Option<Self> {
		match geometry.first_coordinates(3).as_slice() {
			[a, b, c] => Some(Self([*a, *b, *c])),
			_ => None,
		}
	}

	fn to_geo(self) -> GeoTriangle<f64> {
		let [a, b, c] = self.0;
		GeoTriangle::new(a.into(), b.into(), c.into())
	}
}

impl Debug for Triangle {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(self.0.iter()).finish()
	}
}

/// Decides whether two triangles share interior area.
pub trait TriangleOverlap {
	fn overlaps(&self, a: &Triangle, b: &Triangle) -> bool;
}

/// Overlap through the DE-9IM matrix: the shapes intersect and do not merely touch.
#[derive(Clone, Copy, Debug, Default)]
pub struct RelateOverlap;

impl TriangleOverlap for RelateOverlap {
	fn overlaps(&self, a: &Triangle, b: &Triangle) -> bool {
		let matrix = a.to_geo().to_polygon().relate(&b.to_geo().to_polygon());
		matrix.is_intersects() && !matrix.is_touches()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn t(c: [[f64; 2]; 3]) -> Triangle {
		Triangle::new(c[0], c[1], c[2])
	}

	#[rstest]
	#[case::identical([[0.0, 0.0], [4.0, 0.0], [0.0, 4.0]], true)]
	#[case::partial([[1.0, 1.0], [5.0, 1.0], [1.0, 5.0]], true)]
	#[case::contained([[0.5, 0.5], [1.0, 0.5], [0.5, 1.0]], true)]
	#[case::shared_edge([[4.0, 0.0], [0.0, 4.0], [4.0, 4.0]], false)]
	#[case::shared_vertex([[4.0, 0.0], [8.0, 0.0], [8.0, 4.0]], false)]
	#[case::disjoint([[10.0, 10.0], [14.0, 10.0], [10.0, 14.0]], false)]
	fn test_overlaps(#[case] other: [[f64; 2]; 3], #[case] expected: bool) {
		let base = t([[0.0, 0.0], [4.0, 0.0], [0.0, 4.0]]);
		let other = t(other);
		assert_eq!(RelateOverlap.overlaps(&base, &other), expected);
		assert_eq!(RelateOverlap.overlaps(&other, &base), expected);
	}

	#[test]
	fn test_winding_is_ignored() {
		let ccw = t([[0.0, 0.0], [4.0, 0.0], [0.0, 4.0]]);
		let cw = t([[0.0, 0.0], [0.0, 4.0], [4.0, 0.0]]);
		let other = t([[1.0, 1.0], [1.0, 5.0], [5.0, 1.0]]);
		assert!(RelateOverlap.overlaps(&ccw, &other));
		assert!(RelateOverlap.overlaps(&cw, &other));
		assert!(RelateOverlap.overlaps(&ccw, &cw));
	}

	#[test]
	fn test_from_geometry() {
		let polygon = Geometry::new_polygon(&[vec![[0, 0], [4, 0], [0, 4], [0, 0]]]);
		assert_eq!(
			Triangle::from_geometry(&polygon),
			Some(Triangle::new([0.0, 0.0], [4.0, 0.0], [0.0, 4.0]))
		);
		assert_eq!(Triangle::from_geometry(&Geometry::new_line_string(&[[0, 0], [1, 1]])), None);
		assert_eq!(Triangle::from_geometry(&Geometry::new_point([0, 0])), None);
	}
}
