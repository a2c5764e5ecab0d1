use super::{Simplifier, distance_from_segment_squared};
use crate::Coordinates;

/// Douglas-Peucker reduction with an explicit work stack.
///
/// The stack and the keep-mask are kept between calls, so a single instance can
/// simplify a whole layer without allocating per line.
#[derive(Clone, Debug, Default)]
pub struct DouglasPeucker {
	threshold: f64,
	stack: Vec<(usize, usize)>,
	mask: Vec<bool>,
}

impl DouglasPeucker {
	/// `threshold` is a linear distance; points closer than that to the simplified
	/// line are removed.
	#[must_use]
	pub fn new(threshold: f64) -> Self {
		Self {
			threshold,
			stack: Vec::new(),
			mask: Vec::new(),
		}
	}

	#[must_use]
	pub fn threshold(&self) -> f64 {
		self.threshold
	}

	/// Fills `self.mask` for `coordinates` and returns the number of kept points.
	fn mark(&mut self, coordinates: &[Coordinates]) -> usize {
		let n = coordinates.len();
		self.mask.clear();
		self.mask.resize(n, false);
		if n == 0 {
			return 0;
		}
		self.mask[0] = true;
		self.mask[n - 1] = true;
		if n <= 2 {
			return n;
		}

		let threshold_squared = self.threshold * self.threshold;
		let mut found = 2;
		self.stack.clear();
		self.stack.push((0, n - 1));

		while let Some(&(start, end)) = self.stack.last() {
			let mut max_distance = 0.0;
			let mut max_index = 0;
			for i in start + 1..end {
				let distance = distance_from_segment_squared(&coordinates[start], &coordinates[end], &coordinates[i]);
				if distance > max_distance {
					max_distance = distance;
					max_index = i;
				}
			}

			if max_distance > threshold_squared {
				found += 1;
				self.mask[max_index] = true;
				if let Some(top) = self.stack.last_mut() {
					top.1 = max_index;
				}
				self.stack.push((max_index, end));
			} else {
				self.stack.pop();
			}
		}
		found
	}

	/// Simplifies `coordinates` and also returns the original index of every kept point.
	pub fn simplify_with_index_map(&mut self, coordinates: Vec<Coordinates>) -> (Vec<Coordinates>, Vec<usize>) {
		let found = self.mark(&coordinates);
		let mut kept = Vec::with_capacity(found);
		let mut index_map = Vec::with_capacity(found);
		for (i, c) in coordinates.into_iter().enumerate() {
			if self.mask[i] {
				kept.push(c);
				index_map.push(i);
			}
		}
		(kept, index_map)
	}
}

impl Simplifier for DouglasPeucker {
	fn simplify_coordinates(&mut self, mut coordinates: Vec<Coordinates>) -> Vec<Coordinates> {
		self.mark(&coordinates);
		let mut i = 0;
		coordinates.retain(|_| {
			let keep = self.mask[i];
			i += 1;
			keep
		});
		coordinates
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{Geometry, LineStringGeometry};
	use pretty_assertions::assert_eq;
	use rstest::rstest;

	fn coords(c: &[[f64; 2]]) -> Vec<Coordinates> {
		c.iter().map(Coordinates::from).collect()
	}

	#[rstest]
	#[case::no_reduction(0.1, &[[0.0, 0.0], [0.5, 0.2], [1.0, 0.0]], &[[0.0, 0.0], [0.5, 0.2], [1.0, 0.0]], &[0, 1, 2])]
	#[case::reduction(1.1, &[[0.0, 0.0], [0.5, 0.2], [1.0, 0.0]], &[[0.0, 0.0], [1.0, 0.0]], &[0, 2])]
	#[case::removes_collinear_points(0.0, &[[0.0, 0.0], [0.0, 1.0], [0.0, 2.0]], &[[0.0, 0.0], [0.0, 2.0]], &[0, 2])]
	#[case::short_sequence(5.0, &[[0.0, 0.0], [9.0, 9.0]], &[[0.0, 0.0], [9.0, 9.0]], &[0, 1])]
	fn test_douglas_peucker(
		#[case] threshold: f64,
		#[case] input: &[[f64; 2]],
		#[case] expected: &[[f64; 2]],
		#[case] index_map: &[usize],
	) {
		let mut dp = DouglasPeucker::new(threshold);
		let (kept, map) = dp.simplify_with_index_map(coords(input));
		assert_eq!(kept, coords(expected));
		assert_eq!(map, index_map);
		assert_eq!(dp.simplify_coordinates(coords(input)), coords(expected));
	}

	#[test]
	fn test_empty() {
		let (kept, map) = DouglasPeucker::new(1.0).simplify_with_index_map(Vec::new());
		assert!(kept.is_empty());
		assert!(map.is_empty());
	}

	#[test]
	fn test_buffers_are_reused_across_lengths() {
		let mut dp = DouglasPeucker::new(0.5);
		let long: Vec<[f64; 2]> = (0..50).map(|i| [f64::from(i), f64::from(i % 2) * 3.0]).collect();
		assert_eq!(dp.simplify_coordinates(coords(&long)).len(), 50);
		let short = coords(&[[0.0, 0.0], [1.0, 0.1], [2.0, 0.0]]);
		assert_eq!(dp.simplify_coordinates(short), coords(&[[0.0, 0.0], [2.0, 0.0]]));
	}

	#[test]
	fn test_monotonic_in_threshold() {
		let line: Vec<[f64; 2]> = (0..200)
			.map(|i| {
				let x = f64::from(i);
				[x, (x * 0.37).sin() * 10.0 + (x * 0.05).cos() * 30.0]
			})
			.collect();
		let line = LineStringGeometry::from(line.as_slice());

		let mut previous = usize::MAX;
		for threshold in [0.0, 0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 50.0, 500.0] {
			let Some(Geometry::LineString(result)) =
				DouglasPeucker::new(threshold).simplify(Geometry::LineString(line.clone()))
			else {
				panic!("line vanished at {threshold}");
			};
			assert!(result.0.len() <= previous);
			assert_eq!(result.0.first(), line.0.first());
			assert_eq!(result.0.last(), line.0.last());
			previous = result.0.len();
		}
		assert_eq!(previous, 2);
	}
}
