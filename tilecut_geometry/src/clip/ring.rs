use super::{BOTTOM, LEFT, RIGHT, TOP, bit_code, intersect};
use crate::{Bound, PolygonGeometry, RingGeometry};

/// Clips a ring to `bound` with Sutherland-Hodgman, cutting against the left,
/// right, bottom and top edge in that order.
///
/// An explicitly closed input produces an explicitly closed output. Points where
/// the ring runs along the boundary may be duplicated. Returns `None` if the ring
/// and the bound do not overlap, or if the ring is empty.
#[must_use]
pub fn clip_ring(bound: &Bound, ring: RingGeometry) -> Option<RingGeometry> {
	let closed = ring.is_closed();

	let mut input = ring.into_coordinates();
	let mut output = Vec::with_capacity(input.len());

	for edge in [LEFT, RIGHT, BOTTOM, TOP] {
		output.clear();

		// an open ring is not implicitly closed
		let start = if closed { input.last() } else { input.first() };
		let mut prev = *start?;
		let mut prev_inside = bit_code(bound, &prev) & edge == 0;

		for &c in &input {
			let inside = bit_code(bound, &c) & edge == 0;
			if inside != prev_inside {
				output.push(intersect(bound, edge, &prev, &c));
			}
			if inside {
				output.push(c);
			}
			prev = c;
			prev_inside = inside;
		}

		if output.is_empty() {
			return None;
		}
		std::mem::swap(&mut input, &mut output);
	}

	let mut result = RingGeometry(input);
	if closed {
		result.close();
	}
	Some(result)
}

/// Clips the exterior and every hole. The polygon is dropped if its exterior
/// vanishes. Holes that vanish are dropped without further checks.
#[must_use]
pub fn clip_polygon(bound: &Bound, polygon: PolygonGeometry) -> Option<PolygonGeometry> {
	let mut rings = polygon.0.into_iter();
	let exterior = clip_ring(bound, rings.next()?)?;
	let mut result = vec![exterior];
	result.extend(rings.filter_map(|ring| clip_ring(bound, ring)));
	Some(PolygonGeometry(result))
}
