use super::Coordinates;
use std::fmt::Debug;

/// An axis-aligned box `{min, max}`.
///
/// Consumers assume `min.x <= max.x` and `min.y <= max.y`. A degenerate bound
/// with `min == max` is legal and clips everything down to a single point.
#[derive(Clone, Copy, PartialEq)]
pub struct Bound {
	pub min: Coordinates,
	pub max: Coordinates,
}

impl Bound {
	#[must_use]
	pub fn new(min: impl Into<Coordinates>, max: impl Into<Coordinates>) -> Self {
		Self {
			min: min.into(),
			max: max.into(),
		}
	}

	/// Returns the smallest bound covering all `coordinates`, or `None` if there are none.
	pub fn from_coordinates<'a>(coordinates: impl IntoIterator<Item = &'a Coordinates>) -> Option<Self> {
		let mut iter = coordinates.into_iter();
		let first = *iter.next()?;
		let mut bound = Bound::new(first, first);
		for c in iter {
			bound.extend(c);
		}
		Some(bound)
	}

	/// True iff both axes of `c` lie within `[min, max]`, boundaries included.
	#[must_use]
	pub fn contains(&self, c: &Coordinates) -> bool {
		c.x() >= self.min.x() && c.x() <= self.max.x() && c.y() >= self.min.y() && c.y() <= self.max.y()
	}

	/// Grows the bound to include `c`.
	pub fn extend(&mut self, c: &Coordinates) {
		self.min = Coordinates::new(self.min.x().min(c.x()), self.min.y().min(c.y()));
		self.max = Coordinates::new(self.max.x().max(c.x()), self.max.y().max(c.y()));
	}

	/// Grows the bound to include `other`.
	pub fn union(&mut self, other: &Bound) {
		self.extend(&other.min);
		self.extend(&other.max);
	}

	/// Returns a copy grown by `by` on every side.
	#[must_use]
	pub fn buffered(&self, by: f64) -> Bound {
		Bound::new(
			(self.min.x() - by, self.min.y() - by),
			(self.max.x() + by, self.max.y() + by),
		)
	}

	/// True if the boxes share at least one point.
	#[must_use]
	pub fn intersects(&self, other: &Bound) -> bool {
		self.min.x() <= other.max.x()
			&& other.min.x() <= self.max.x()
			&& self.min.y() <= other.max.y()
			&& other.min.y() <= self.max.y()
	}

	/// True if the box has zero area.
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.min.x() >= self.max.x() || self.min.y() >= self.max.y()
	}

	#[must_use]
	pub fn width(&self) -> f64 {
		self.max.x() - self.min.x()
	}

	#[must_use]
	pub fn height(&self) -> f64 {
		self.max.y() - self.min.y()
	}
}

impl Debug for Bound {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "Bound({:?}, {:?})", self.min, self.max)
	}
}
