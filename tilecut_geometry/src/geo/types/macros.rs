/// Implements `From` for vectors, slices and arrays of anything the element type
/// can be built from, so tests can write `LineStringGeometry::from(&[[0, 0], [1, 1]])`.
#[macro_export]
macro_rules! impl_from_array {
	($($t:ty,$i:ty),*) => {$(
		impl<T> From<Vec<T>> for $t
		where
			$i: From<T>,
		{
			fn from(value: Vec<T>) -> Self {
				Self(value.into_iter().map(<$i>::from).collect())
			}
		}

		impl<'a, T> From<&'a [T]> for $t
		where
			$i: From<&'a T>,
		{
			fn from(value: &'a [T]) -> Self {
				Self(value.iter().map(<$i>::from).collect())
			}
		}

		impl<'a, T, const N: usize> From<&'a [T; N]> for $t
		where
			$i: From<&'a T>,
		{
			fn from(value: &'a [T; N]) -> Self {
				Self(value.iter().map(|v| <$i>::from(v)).collect())
			}
		}
	)*}
}

/// Implements `CompositeGeometryTrait<Item>` for a tuple struct wrapping `Vec<Item>`.
#[macro_export]
macro_rules! impl_composite_geometry {
	($($t:ty,$i:ty),*) => {$(
		impl $crate::CompositeGeometryTrait<$i> for $t {
			fn new() -> Self {
				Self(Vec::new())
			}

			fn as_vec(&self) -> &Vec<$i> {
				&self.0
			}

			fn as_mut_vec(&mut self) -> &mut Vec<$i> {
				&mut self.0
			}

			fn into_inner(self) -> Vec<$i> {
				self.0
			}
		}
	)*}
}
