use super::{Bound, Coordinates};
use std::fmt::Debug;

/// Behaviour shared by every geometry shape. The coordinate walk is the single
/// primitive; bounds, counts and projection are all built on it.
pub trait GeometryTrait: Debug + Clone {
	/// Calls `f` for every coordinate in storage order.
	fn for_each_coordinate(&self, f: &mut impl FnMut(&Coordinates));

	/// Replaces every coordinate `c` with `projection(c)`.
	fn project(&mut self, projection: &impl Fn(Coordinates) -> Coordinates);

	/// Returns the bounding box of all coordinates, or `None` for an empty geometry.
	fn compute_bounds(&self) -> Option<Bound> {
		let mut bound: Option<Bound> = None;
		self.for_each_coordinate(&mut |c| {
			bound = Some(match bound {
				Some(mut b) => {
					b.extend(c);
					b
				}
				None => Bound::new(*c, *c),
			});
		});
		bound
	}

	fn coordinate_count(&self) -> usize {
		let mut count = 0;
		self.for_each_coordinate(&mut |_| count += 1);
		count
	}
}

/// Composite geometries are thin wrappers around a `Vec` of simpler elements:
/// a line is made of coordinates, a polygon of rings, a multi-polygon of polygons.
pub trait CompositeGeometryTrait<Item>: Debug + Clone {
	fn new() -> Self;

	fn as_vec(&self) -> &Vec<Item>;

	fn as_mut_vec(&mut self) -> &mut Vec<Item>;

	fn into_inner(self) -> Vec<Item>;

	fn into_iter(self) -> impl Iterator<Item = Item> {
		self.into_inner().into_iter()
	}

	/// Splits into the first element and the rest, if there is a first element.
	fn into_first_and_rest(self) -> Option<(Item, Vec<Item>)> {
		let mut iter = self.into_iter();
		iter.next().map(|first| (first, iter.collect()))
	}

	fn is_empty(&self) -> bool {
		self.as_vec().is_empty()
	}

	fn len(&self) -> usize {
		self.as_vec().len()
	}

	fn push(&mut self, item: Item) {
		self.as_mut_vec().push(item);
	}

	fn first(&self) -> Option<&Item> {
		self.as_vec().first()
	}

	fn last(&self) -> Option<&Item> {
		self.as_vec().last()
	}
}
