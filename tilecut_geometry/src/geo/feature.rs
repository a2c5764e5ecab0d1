use super::*;
use serde_json::{Number, Value};

/// A geometry with an optional numeric id and attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct GeoFeature {
	pub id: Option<u64>,
	pub geometry: Geometry,
	pub properties: GeoProperties,
}

impl GeoFeature {
	#[must_use]
	pub fn new(geometry: Geometry) -> Self {
		Self {
			id: None,
			geometry,
			properties: GeoProperties::new(),
		}
	}

	pub fn set_id(&mut self, id: u64) {
		self.id = Some(id);
	}

	pub fn set_properties(&mut self, properties: GeoProperties) {
		self.properties = properties;
	}

	pub fn set_property<T>(&mut self, key: &str, value: T)
	where
		GeoValue: From<T>,
	{
		self.properties.insert(key.to_string(), GeoValue::from(value));
	}

	/// Ids cross the wire as integers but are handed back as JSON floats, matching
	/// how every decoded number is widened to `f64`.
	#[must_use]
	pub fn id_as_json(&self) -> Option<Value> {
		self.id.and_then(|id| Number::from_f64(id as f64)).map(Value::Number)
	}

	#[cfg(test)]
	pub fn new_example() -> Self {
		Self {
			id: Some(13),
			geometry: Geometry::new_multi_polygon(&[
				vec![
					vec![[0.0, 0.0], [6.0, 0.0], [3.0, 4.0], [0.0, 0.0]],
					vec![[2.0, 1.0], [3.0, 2.0], [4.0, 1.0], [2.0, 1.0]],
				],
				vec![vec![[7.0, 0.0], [9.0, 0.0], [9.0, 4.0], [7.0, 4.0], [7.0, 0.0]]],
			]),
			properties: GeoProperties::from(vec![
				("name", GeoValue::from("Nice")),
				("population", GeoValue::from(348_085)),
				("is_nice", GeoValue::from(true)),
			]),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_id_as_json() {
		let mut feature = GeoFeature::new(Geometry::new_point([0, 0]));
		assert_eq!(feature.id_as_json(), None);
		feature.set_id(42);
		assert_eq!(feature.id_as_json().map(|v| v.to_string()), Some(String::from("42.0")));
	}

	#[test]
	fn test_set_property() {
		let mut feature = GeoFeature::new(Geometry::new_point([0, 0]));
		feature.set_property("a", 1.5);
		feature.set_property("b", "x");
		assert_eq!(feature.properties.get("a"), Some(&GeoValue::Double(1.5)));
		assert_eq!(feature.properties.len(), 2);
		feature.set_properties(GeoProperties::new());
		assert!(feature.properties.is_empty());
	}
}
