use super::{Coordinates, GeometryTrait};
use std::fmt::Debug;

/// A ring is a line string that is meant to enclose an area.
///
/// Rings may or may not repeat their first coordinate at the end. When they do,
/// they are "explicitly closed" and algorithms keep that closure intact.
#[derive(Clone, PartialEq, Default)]
pub struct RingGeometry(pub Vec<Coordinates>);

impl RingGeometry {
	/// True if the ring has more than one coordinate and the last one repeats the first.
	#[must_use]
	pub fn is_closed(&self) -> bool {
		self.0.len() > 1 && self.0.first() == self.0.last()
	}

	/// Appends a copy of the first coordinate unless the ring is already closed.
	pub fn close(&mut self) {
		if let Some(first) = self.0.first().copied() {
			if !self.is_closed() {
				self.0.push(first);
			}
		}
	}

	/// Signed shoelace area. Coordinates are shifted so the first vertex is the
	/// origin, which keeps the products small for rings far from (0, 0).
	///
	/// Positive means counter-clockwise in a y-up frame, which is clockwise on
	/// screen in y-down tile coordinates.
	#[must_use]
	pub fn signed_area(&self) -> f64 {
		let Some(origin) = self.0.first() else {
			return 0.0;
		};
		let (ox, oy) = (origin.x(), origin.y());
		let sum: f64 = self
			.0
			.windows(2)
			.skip(1)
			.map(|w| (w[0].x() - ox) * (w[1].y() - oy) - (w[1].x() - ox) * (w[0].y() - oy))
			.sum();
		sum / 2.0
	}

	#[must_use]
	pub fn into_coordinates(self) -> Vec<Coordinates> {
		self.0
	}
}

impl GeometryTrait for RingGeometry {
	fn for_each_coordinate(&self, f: &mut impl FnMut(&Coordinates)) {
		self.0.iter().for_each(f);
	}

	fn project(&mut self, projection: &impl Fn(Coordinates) -> Coordinates) {
		self.0.iter_mut().for_each(|c| *c = projection(*c));
	}
}

impl Debug for RingGeometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(&self.0).finish()
	}
}

crate::impl_from_array!(RingGeometry, Coordinates);
crate::impl_composite_geometry!(RingGeometry, Coordinates);

#[cfg(test)]
mod tests {
	use super::*;
	use crate::CompositeGeometryTrait;
	use approx::assert_abs_diff_eq;
	use rstest::rstest;

	#[test]
	fn test_close() {
		let mut ring = RingGeometry::from(&[[0, 0], [1, 0], [1, 1]]);
		assert!(!ring.is_closed());
		ring.close();
		assert!(ring.is_closed());
		assert_eq!(ring.len(), 4);
		ring.close();
		assert_eq!(ring.len(), 4);

		let mut empty = RingGeometry::new();
		empty.close();
		assert!(empty.is_empty());
		assert!(!RingGeometry::from(&[[3, 3]]).is_closed());
	}

	#[rstest]
	#[case(&[[0, 0], [4, 0], [4, 4], [0, 4], [0, 0]], 16.0)]
	#[case(&[[0, 0], [0, 4], [4, 4], [4, 0], [0, 0]], -16.0)]
	#[case(&[[0, 0], [4, 0], [4, 4], [0, 4]], 16.0)]
	#[case(&[[0, 0], [2, 0], [4, 0], [0, 0]], 0.0)]
	fn test_signed_area(#[case] coords: &[[i32; 2]], #[case] expected: f64) {
		assert_abs_diff_eq!(RingGeometry::from(coords).signed_area(), expected);
	}

	#[test]
	fn test_signed_area_far_from_origin() {
		let ring = RingGeometry::from(&[[1e9, 1e9], [1e9 + 1.0, 1e9], [1e9 + 1.0, 1e9 + 1.0], [1e9, 1e9]]);
		assert_abs_diff_eq!(ring.signed_area(), 0.5);
	}
}
