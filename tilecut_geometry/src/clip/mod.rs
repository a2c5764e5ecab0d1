//! Clipping geometry to an axis-aligned [`Bound`].
//!
//! Lines are cut with Cohen-Sutherland region codes and rings with
//! Sutherland-Hodgman, one half-plane at a time. Nothing here fails: a geometry
//! without any part inside the bound comes back as `None`.
//!
//! The functions take their input by value and reuse its buffers, so callers that
//! still need the original have to clone it first.

mod line;
mod ring;

pub use line::*;
pub use ring::*;

use crate::{Bound, Coordinates, Geometry, MultiPointGeometry, MultiPolygonGeometry};

const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const BOTTOM: u8 = 4;
const TOP: u8 = 8;

/// Region code of `c`. Points on the boundary count as inside.
fn bit_code(bound: &Bound, c: &Coordinates) -> u8 {
	let mut code = 0;
	if c.x() < bound.min.x() {
		code |= LEFT;
	} else if c.x() > bound.max.x() {
		code |= RIGHT;
	}
	if c.y() < bound.min.y() {
		code |= BOTTOM;
	} else if c.y() > bound.max.y() {
		code |= TOP;
	}
	code
}

/// Region code of `c`. Points on the boundary count as outside.
fn bit_code_open(bound: &Bound, c: &Coordinates) -> u8 {
	let mut code = 0;
	if c.x() <= bound.min.x() {
		code |= LEFT;
	} else if c.x() >= bound.max.x() {
		code |= RIGHT;
	}
	if c.y() <= bound.min.y() {
		code |= BOTTOM;
	} else if c.y() >= bound.max.y() {
		code |= TOP;
	}
	code
}

/// Intersects segment `a`-`b` with the bound edge selected by `edge`.
/// With several bits set, top wins over bottom over right over left.
fn intersect(bound: &Bound, edge: u8, a: &Coordinates, b: &Coordinates) -> Coordinates {
	if edge & TOP != 0 {
		let y = bound.max.y();
		Coordinates::new(a.x() + (b.x() - a.x()) * (y - a.y()) / (b.y() - a.y()), y)
	} else if edge & BOTTOM != 0 {
		let y = bound.min.y();
		Coordinates::new(a.x() + (b.x() - a.x()) * (y - a.y()) / (b.y() - a.y()), y)
	} else if edge & RIGHT != 0 {
		let x = bound.max.x();
		Coordinates::new(x, a.y() + (b.y() - a.y()) * (x - a.x()) / (b.x() - a.x()))
	} else {
		let x = bound.min.x();
		Coordinates::new(x, a.y() + (b.y() - a.y()) * (x - a.x()) / (b.x() - a.x()))
	}
}

/// Clips any geometry against the closed `bound`.
///
/// Multi geometries keep only their surviving members. A single survivor is
/// returned bare (a `MultiPoint` with one point left becomes a `Point`, and so on),
/// and no survivors at all give `None`.
#[must_use]
pub fn clip_geometry(bound: &Bound, geometry: Geometry) -> Option<Geometry> {
	match geometry {
		Geometry::Point(point) => bound.contains(&point.0).then_some(Geometry::Point(point)),
		Geometry::MultiPoint(mut points) => {
			points.0.retain(|p| bound.contains(&p.0));
			match points.0.len() {
				0 => None,
				1 => points.0.pop().map(Geometry::Point),
				_ => Some(Geometry::MultiPoint(points)),
			}
		}
		Geometry::LineString(line) => unwrap_lines(clip_line(bound, &line, false)?),
		Geometry::MultiLineString(lines) => unwrap_lines(clip_multi_line(bound, &lines, false)?),
		Geometry::Ring(ring) => clip_ring(bound, ring).map(Geometry::Ring),
		Geometry::Polygon(polygon) => clip_polygon(bound, polygon).map(Geometry::Polygon),
		Geometry::MultiPolygon(polygons) => {
			let mut survivors: Vec<_> = polygons
				.0
				.into_iter()
				.filter_map(|polygon| clip_polygon(bound, polygon))
				.collect();
			match survivors.len() {
				0 => None,
				1 => survivors.pop().map(Geometry::Polygon),
				_ => Some(Geometry::MultiPolygon(MultiPolygonGeometry(survivors))),
			}
		}
		Geometry::Collection(members) => {
			let mut survivors: Vec<Geometry> = members
				.into_iter()
				.filter_map(|member| clip_geometry(bound, member))
				.collect();
			match survivors.len() {
				0 => None,
				1 => survivors.pop(),
				_ => Some(Geometry::Collection(survivors)),
			}
		}
	}
}

fn unwrap_lines(mut lines: crate::MultiLineStringGeometry) -> Option<Geometry> {
	match lines.0.len() {
		0 => None,
		1 => lines.0.pop().map(Geometry::LineString),
		_ => Some(Geometry::MultiLineString(lines)),
	}
}

/// Keeps the points that lie inside `bound`.
#[must_use]
pub fn clip_multi_point(bound: &Bound, mut points: MultiPointGeometry) -> Option<MultiPointGeometry> {
	points.0.retain(|p| bound.contains(&p.0));
	(!points.0.is_empty()).then_some(points)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::GeometryTrait;
	use pretty_assertions::assert_eq;

	fn unit() -> Bound {
		Bound::new((-1.0, -1.0), (1.0, 1.0))
	}

	#[test]
	fn test_bit_codes() {
		let bound = Bound::new((0.0, 0.0), (2.0, 2.0));
		assert_eq!(bit_code(&bound, &Coordinates::new(1.0, 1.0)), 0);
		assert_eq!(bit_code(&bound, &Coordinates::new(0.0, 2.0)), 0);
		assert_eq!(bit_code_open(&bound, &Coordinates::new(0.0, 2.0)), LEFT | TOP);
		assert_eq!(bit_code(&bound, &Coordinates::new(-1.0, -1.0)), LEFT | BOTTOM);
		assert_eq!(bit_code(&bound, &Coordinates::new(3.0, 3.0)), RIGHT | TOP);
	}

	#[test]
	fn test_point() {
		assert_eq!(
			clip_geometry(&unit(), Geometry::new_point([1, 0])),
			Some(Geometry::new_point([1, 0]))
		);
		assert_eq!(clip_geometry(&unit(), Geometry::new_point([2, 0])), None);
	}

	#[test]
	fn test_only_one_multipoint_in_bound() {
		assert_eq!(
			clip_geometry(&unit(), Geometry::new_multi_point(&[[0, 0], [5, 5]])),
			Some(Geometry::new_point([0, 0]))
		);
		assert_eq!(clip_geometry(&unit(), Geometry::new_multi_point(&[[3, 0], [5, 5]])), None);
		assert_eq!(
			clip_multi_point(&unit(), MultiPointGeometry::from(&[[0, 0], [1, 1], [4, 4]])),
			Some(MultiPointGeometry::from(&[[0, 0], [1, 1]]))
		);
	}

	#[test]
	fn test_only_one_multilinestring_in_bound() {
		let input = Geometry::new_multi_line_string(&[vec![[0, 0], [5, 5]], vec![[6, 6], [7, 7]]]);
		assert_eq!(
			clip_geometry(&unit(), input),
			Some(Geometry::new_line_string(&[[0, 0], [1, 1]]))
		);
	}

	#[test]
	fn test_only_one_multipolygon_in_bound() {
		let input = Geometry::new_multi_polygon(&[
			vec![vec![[0, 0], [1, 0], [1, 1], [0, 1], [0, 0]]],
			vec![vec![[2, 2], [3, 2], [3, 3], [2, 3], [2, 2]]],
		]);
		assert_eq!(
			clip_geometry(&unit(), input),
			Some(Geometry::new_polygon(&[vec![[0, 0], [1, 0], [1, 1], [0, 1], [0, 0]]]))
		);
	}

	#[test]
	fn test_empty_multi_geometries_vanish() {
		let far = Geometry::new_multi_line_string(&[vec![[5, 5], [6, 6]]]);
		assert_eq!(clip_geometry(&unit(), far), None);
		assert_eq!(clip_geometry(&unit(), Geometry::Collection(vec![])), None);
		let polygons = Geometry::new_multi_polygon(&[vec![vec![[4, 4], [5, 4], [5, 5], [4, 4]]]]);
		assert_eq!(clip_geometry(&unit(), polygons), None);
	}

	#[test]
	fn test_multipolygon_with_empty_member() {
		let input = Geometry::new_multi_polygon(&[vec![vec![]], vec![vec![[0, 0], [1, 0], [0, 1], [0, 0]]]]);
		assert_eq!(
			clip_geometry(&unit(), input),
			Some(Geometry::new_polygon(&[vec![[0, 0], [1, 0], [0, 1], [0, 0]]]))
		);
	}

	#[test]
	fn test_collection() {
		let collection = Geometry::Collection(vec![
			Geometry::new_point([0, 0]),
			Geometry::new_point([9, 9]),
			Geometry::new_line_string(&[[-2, 0], [2, 0]]),
		]);
		assert_eq!(
			clip_geometry(&unit(), collection),
			Some(Geometry::Collection(vec![
				Geometry::new_point([0, 0]),
				Geometry::new_line_string(&[[-1, 0], [1, 0]]),
			]))
		);

		let single = Geometry::Collection(vec![Geometry::new_point([9, 9]), Geometry::new_point([0, 1])]);
		assert_eq!(clip_geometry(&unit(), single), Some(Geometry::new_point([0, 1])));
	}

	#[test]
	fn test_containment_and_idempotence() {
		let bound = Bound::new((0.0, 0.0), (20.0, 20.0));
		let inputs = [
			Geometry::new_line_string(&[[10, -10], [10, 30], [20, 30], [20, -10]]),
			Geometry::new_polygon(&[
				vec![[-5, -5], [25, -5], [25, 25], [-5, 25], [-5, -5]],
				vec![[5, 5], [5, 30], [15, 30], [15, 5], [5, 5]],
			]),
			Geometry::new_multi_point(&[[0, 0], [21, 3], [20, 20]]),
			Geometry::new_ring(&[[-10, 10], [10, -10], [30, 10], [10, 30], [-10, 10]]),
		];
		for input in inputs {
			let once = clip_geometry(&bound, input).unwrap();
			once.for_each_coordinate(&mut |c| {
				assert!(bound.buffered(1e-9).contains(c), "{c:?} escaped the bound");
			});
			let twice = clip_geometry(&bound, once.clone()).unwrap();
			assert_eq!(twice, once);
		}
	}
}
