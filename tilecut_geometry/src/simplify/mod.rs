//! Line simplification.
//!
//! A [`Simplifier`] only has to reduce a single point sequence. The provided
//! [`Simplifier::simplify`] walks the geometry tree and decides which shapes
//! survive the reduction.

mod douglas_peucker;

pub use douglas_peucker::*;

use crate::{
	Coordinates, Geometry, LineStringGeometry, MultiLineStringGeometry, MultiPolygonGeometry, PolygonGeometry,
	RingGeometry,
};

pub trait Simplifier {
	/// Reduces an open point sequence. First and last point must be kept.
	fn simplify_coordinates(&mut self, coordinates: Vec<Coordinates>) -> Vec<Coordinates>;

	/// Simplifies any geometry.
	///
	/// Sequences of two points or fewer are left alone. Points pass through.
	/// Holes that shrink to two points or fewer are removed, and a polygon whose
	/// exterior does so is removed entirely. Returns `None` if nothing is left.
	fn simplify(&mut self, geometry: Geometry) -> Option<Geometry> {
		match geometry {
			Geometry::Point(_) | Geometry::MultiPoint(_) => Some(geometry),
			Geometry::LineString(line) => {
				let line = self.simplify_line(line);
				(!line.0.is_empty()).then_some(Geometry::LineString(line))
			}
			Geometry::MultiLineString(lines) => {
				let lines = MultiLineStringGeometry(lines.0.into_iter().map(|l| self.simplify_line(l)).collect());
				(!lines.0.iter().all(|l| l.0.is_empty())).then_some(Geometry::MultiLineString(lines))
			}
			Geometry::Ring(ring) => {
				let ring = self.simplify_ring(ring);
				(!ring.0.is_empty()).then_some(Geometry::Ring(ring))
			}
			Geometry::Polygon(polygon) => self.simplify_polygon(polygon).map(Geometry::Polygon),
			Geometry::MultiPolygon(polygons) => {
				let polygons: Vec<PolygonGeometry> = polygons
					.0
					.into_iter()
					.filter_map(|p| self.simplify_polygon(p))
					.collect();
				(!polygons.is_empty()).then_some(Geometry::MultiPolygon(MultiPolygonGeometry(polygons)))
			}
			Geometry::Collection(members) => {
				let members: Vec<Geometry> = members.into_iter().filter_map(|g| self.simplify(g)).collect();
				(!members.is_empty()).then_some(Geometry::Collection(members))
			}
		}
	}

	fn simplify_line(&mut self, line: LineStringGeometry) -> LineStringGeometry {
		if line.0.len() <= 2 {
			return line;
		}
		LineStringGeometry(self.simplify_coordinates(line.0))
	}

	/// Rings are reduced like open lines, then closed again if they were closed.
	fn simplify_ring(&mut self, ring: RingGeometry) -> RingGeometry {
		if ring.0.len() <= 2 {
			return ring;
		}
		let closed = ring.is_closed();
		let mut result = RingGeometry(self.simplify_coordinates(ring.0));
		if closed {
			result.close();
		}
		result
	}

	fn simplify_polygon(&mut self, polygon: PolygonGeometry) -> Option<PolygonGeometry> {
		let mut rings = polygon.0.into_iter();
		let exterior = self.simplify_ring(rings.next()?);
		if exterior.0.len() <= 2 {
			return None;
		}
		let mut result = vec![exterior];
		for ring in rings {
			let ring = self.simplify_ring(ring);
			if ring.0.len() > 2 {
				result.push(ring);
			}
		}
		Some(PolygonGeometry(result))
	}
}

/// Squared distance from `point` to the segment `a`-`b`, clamped at the segment's ends.
#[must_use]
pub fn distance_from_segment_squared(a: &Coordinates, b: &Coordinates, point: &Coordinates) -> f64 {
	let (mut x, mut y) = (a.x(), a.y());
	let dx = b.x() - x;
	let dy = b.y() - y;

	if dx != 0.0 || dy != 0.0 {
		let t = ((point.x() - x) * dx + (point.y() - y) * dy) / (dx * dx + dy * dy);
		if t > 1.0 {
			x = b.x();
			y = b.y();
		} else if t > 0.0 {
			x += dx * t;
			y += dy * t;
		}
	}

	let dx = point.x() - x;
	let dy = point.y() - y;
	dx * dx + dy * dy
}
