use super::GeoValue;
use std::{
	collections::{BTreeMap, btree_map},
	fmt::Debug,
};

/// Feature attributes, kept sorted by key so encoders see a stable order.
#[derive(Clone, PartialEq, Default)]
pub struct GeoProperties {
	properties: BTreeMap<String, GeoValue>,
}

impl GeoProperties {
	#[must_use]
	pub fn new() -> GeoProperties {
		GeoProperties {
			properties: BTreeMap::new(),
		}
	}

	pub fn insert(&mut self, key: String, value: GeoValue) {
		self.properties.insert(key, value);
	}

	pub fn remove(&mut self, key: &str) -> Option<GeoValue> {
		self.properties.remove(key)
	}

	#[must_use]
	pub fn get(&self, key: &str) -> Option<&GeoValue> {
		self.properties.get(key)
	}

	pub fn iter(&self) -> btree_map::Iter<'_, String, GeoValue> {
		self.properties.iter()
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.properties.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.properties.is_empty()
	}
}

impl IntoIterator for GeoProperties {
	type Item = (String, GeoValue);
	type IntoIter = btree_map::IntoIter<String, GeoValue>;
	fn into_iter(self) -> Self::IntoIter {
		self.properties.into_iter()
	}
}

impl<'a> IntoIterator for &'a GeoProperties {
	type Item = (&'a String, &'a GeoValue);
	type IntoIter = btree_map::Iter<'a, String, GeoValue>;
	fn into_iter(self) -> Self::IntoIter {
		self.properties.iter()
	}
}

impl From<Vec<(&str, GeoValue)>> for GeoProperties {
	fn from(value: Vec<(&str, GeoValue)>) -> Self {
		GeoProperties {
			properties: value.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
		}
	}
}

impl FromIterator<(String, GeoValue)> for GeoProperties {
	fn from_iter<T: IntoIterator<Item = (String, GeoValue)>>(iter: T) -> Self {
		GeoProperties {
			properties: BTreeMap::from_iter(iter),
		}
	}
}

impl Debug for GeoProperties {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_map().entries(&self.properties).finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_sorted_iteration() {
		let mut properties = GeoProperties::from(vec![("name", GeoValue::from("Nice")), ("an", GeoValue::from(1))]);
		properties.insert(String::from("b"), GeoValue::from(true));
		let keys: Vec<&String> = properties.iter().map(|(k, _)| k).collect();
		assert_eq!(keys, ["an", "b", "name"]);
		assert_eq!(properties.len(), 3);
		assert_eq!(
			format!("{properties:?}"),
			"{\"an\": UInt(1), \"b\": Bool(true), \"name\": String(\"Nice\")}"
		);
	}

	#[test]
	fn test_get_and_remove() {
		let mut properties: GeoProperties = vec![(String::from("k"), GeoValue::from(2.5))].into_iter().collect();
		assert_eq!(properties.get("k"), Some(&GeoValue::Double(2.5)));
		assert_eq!(properties.remove("k"), Some(GeoValue::Double(2.5)));
		assert!(properties.is_empty());
		assert!(properties.get("k").is_none());
	}
}
