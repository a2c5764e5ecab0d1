use super::{bit_code, bit_code_open, intersect};
use crate::{Bound, Coordinates, LineStringGeometry, MultiLineStringGeometry};

/// Clips a line string to `bound`, splitting it wherever it leaves and re-enters.
///
/// With `open_bound` the boundary itself counts as outside, so a line running
/// along an edge is cut there. Returns `None` if nothing is left.
#[must_use]
pub fn clip_line(bound: &Bound, line: &LineStringGeometry, open_bound: bool) -> Option<MultiLineStringGeometry> {
	let coordinates = &line.0;
	let code = |c: &Coordinates| {
		if open_bound {
			bit_code_open(bound, c)
		} else {
			bit_code(bound, c)
		}
	};

	let mut code_a = code(coordinates.first()?);
	let last = coordinates.len() - 1;
	let mut lines: Vec<LineStringGeometry> = Vec::new();
	let mut index = 0;

	for (i, segment) in coordinates.windows(2).enumerate() {
		let i = i + 1;
		let (mut a, mut b) = (segment[0], segment[1]);
		let mut code_b = code(&b);
		let end_code = code_b;

		// a segment crossing a corner needs up to two cuts
		loop {
			if code_a | code_b == 0 {
				push(&mut lines, index, a);
				if code_b != end_code {
					push(&mut lines, index, b);
					if i < last {
						index += 1;
					}
				} else if i == last {
					push(&mut lines, index, b);
				}
				break;
			} else if code_a & code_b != 0 {
				break;
			} else if code_a != 0 {
				a = intersect(bound, code_a, &a, &b);
				code_a = bit_code(bound, &a);
			} else {
				b = intersect(bound, code_b, &a, &b);
				code_b = bit_code(bound, &b);
			}
		}

		code_a = end_code;
	}

	if lines.is_empty() {
		None
	} else {
		Some(MultiLineStringGeometry(lines))
	}
}

fn push(lines: &mut Vec<LineStringGeometry>, index: usize, c: Coordinates) {
	if index >= lines.len() {
		lines.push(LineStringGeometry::default());
	}
	if let Some(line) = lines.get_mut(index) {
		line.0.push(c);
	}
}

/// Clips every member and concatenates the pieces. Returns `None` if nothing is left.
#[must_use]
pub fn clip_multi_line(
	bound: &Bound,
	lines: &MultiLineStringGeometry,
	open_bound: bool,
) -> Option<MultiLineStringGeometry> {
	let pieces: Vec<LineStringGeometry> = lines
		.0
		.iter()
		.filter_map(|line| clip_line(bound, line, open_bound))
		.flat_map(|clipped| clipped.0)
		.collect();
	if pieces.is_empty() {
		None
	} else {
		Some(MultiLineStringGeometry(pieces))
	}
}
