use super::{CodecError, value::ValueKey};
use crate::geo::{GeoProperties, GeoValue};
use anyhow::{Context, Result, anyhow, ensure};
use std::{collections::HashMap, fmt::Debug, hash::Hash};

/// An interning table: a list of unique entries plus the reverse index.
#[derive(Clone, PartialEq)]
pub struct VTLPMap<T>
where
	T: Clone + Eq + Hash,
{
	pub list: Vec<T>,
	pub map: HashMap<T, u32>,
}

impl<T> VTLPMap<T>
where
	T: Clone + Debug + Eq + Hash,
{
	pub fn new(list: Vec<T>) -> VTLPMap<T> {
		let map = list.iter().enumerate().map(|(i, e)| (e.clone(), i as u32)).collect();
		VTLPMap { list, map }
	}

	/// Returns the index of `entry`, appending it first if it is new.
	pub fn add(&mut self, entry: T) -> u32 {
		if let Some(index) = self.map.get(&entry) {
			return *index;
		}
		let index = self.list.len() as u32;
		self.map.insert(entry.clone(), index);
		self.list.push(entry);
		index
	}

	pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
		self.list.iter()
	}

	pub fn len(&self) -> usize {
		self.list.len()
	}

	pub fn is_empty(&self) -> bool {
		self.list.is_empty()
	}

	pub fn find(&self, entry: &T) -> Result<u32> {
		self
			.map
			.get(entry)
			.ok_or_else(|| anyhow!("entry '{entry:?}' not found"))
			.copied()
	}

	pub fn get(&self, id: u32) -> Result<&T> {
		self
			.list
			.get(id as usize)
			.ok_or_else(|| anyhow!("id '{id:?}' not found"))
	}
}

impl<T: Clone + Debug + Eq + Hash> Default for VTLPMap<T> {
	fn default() -> VTLPMap<T> {
		VTLPMap::new(vec![])
	}
}

impl<T> Debug for VTLPMap<T>
where
	T: Clone + Debug + Eq + Hash,
{
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(&self.list).finish()
	}
}

/// The `keys` and `values` tables of one layer.
///
/// Entries are numbered in the order they are first seen, so encoding the same
/// features twice yields the same tables.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertyManager {
	pub keys: VTLPMap<String>,
	pub values: VTLPMap<ValueKey>,
}

impl PropertyManager {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn add_key(&mut self, key: String) -> u32 {
		self.keys.add(key)
	}

	pub fn add_value(&mut self, value: ValueKey) -> u32 {
		self.values.add(value)
	}

	/// Interns `value` and returns its index.
	pub fn value_index(&mut self, value: &GeoValue) -> Result<u32, CodecError> {
		Ok(self.values.add(ValueKey::try_from(value)?))
	}

	/// Turns properties into alternating key and value indices.
	pub fn encode_tag_ids(&mut self, properties: &GeoProperties) -> Result<Vec<u32>, CodecError> {
		let mut tag_ids = Vec::with_capacity(properties.len() * 2);
		for (key, value) in properties {
			let value_id = self.value_index(value)?;
			tag_ids.push(self.keys.add(key.clone()));
			tag_ids.push(value_id);
		}
		Ok(tag_ids)
	}

	pub fn decode_tag_ids(&self, tag_ids: &[u32]) -> Result<GeoProperties> {
		ensure!(tag_ids.len().is_multiple_of(2), "Tag IDs must be even");
		let mut properties = GeoProperties::new();

		for pair in tag_ids.chunks_exact(2) {
			properties.insert(
				self.keys.get(pair[0]).context("Failed to get property key")?.to_owned(),
				self.values.get(pair[1]).context("Failed to get property value")?.to_geo_value(),
			);
		}
		Ok(properties)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn test_vtlp_map_dedups() -> Result<()> {
		let mut map = VTLPMap::default();
		assert_eq!(map.add(String::from("a")), 0);
		assert_eq!(map.add(String::from("b")), 1);
		assert_eq!(map.add(String::from("a")), 0);
		assert_eq!(map.len(), 2);
		assert_eq!(map.find(&String::from("b"))?, 1);
		assert_eq!(map.get(1)?, "b");
		assert!(map.get(2).is_err());
		assert!(map.find(&String::from("c")).is_err());
		assert_eq!(format!("{map:?}"), "[\"a\", \"b\"]");
		Ok(())
	}

	#[test]
	fn test_encode_and_decode_tag_ids() -> Result<()> {
		let mut manager = PropertyManager::new();
		let first = GeoProperties::from(vec![("name", GeoValue::from("Nice")), ("rank", GeoValue::from(3))]);
		let second = GeoProperties::from(vec![("rank", GeoValue::from(3)), ("tag", GeoValue::from("Nice"))]);

		// keys are visited in sorted order
		assert_eq!(manager.encode_tag_ids(&first)?, vec![0, 0, 1, 1]);
		assert_eq!(manager.encode_tag_ids(&second)?, vec![1, 1, 2, 0]);
		assert_eq!(manager.keys.len(), 3);
		assert_eq!(manager.values.len(), 2);

		assert_eq!(manager.decode_tag_ids(&[0, 0, 1, 1])?, first);
		Ok(())
	}

	#[test]
	fn test_encode_rejects_null() {
		let mut manager = PropertyManager::new();
		let properties = GeoProperties::from(vec![("missing", GeoValue::Null)]);
		assert_eq!(
			manager.encode_tag_ids(&properties),
			Err(CodecError::UnencodableValueType(String::from("null")))
		);
		assert!(manager.keys.is_empty());
	}

	#[test]
	fn test_decode_errors() {
		let mut manager = PropertyManager::new();
		manager.add_key(String::from("k"));
		manager.add_value(ValueKey::Bool(true));
		assert!(manager.decode_tag_ids(&[0]).is_err());
		assert!(manager.decode_tag_ids(&[1, 0]).is_err());
		assert!(manager.decode_tag_ids(&[0, 1]).is_err());
		assert!(manager.decode_tag_ids(&[0, 0]).is_ok());
	}
}
