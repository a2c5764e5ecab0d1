use crate::geo::*;
use serde_json::{Map, Number, Value, json};

/// Writes a collection as a GeoJSON FeatureCollection.
#[must_use]
pub fn to_geojson(collection: &GeoCollection) -> Value {
	json!({
		"type": "FeatureCollection",
		"features": collection.features.iter().map(feature_to_geojson).collect::<Vec<_>>(),
	})
}

#[must_use]
pub fn feature_to_geojson(feature: &GeoFeature) -> Value {
	let mut object = Map::new();
	object.insert("type".to_string(), Value::from("Feature"));
	if let Some(id) = feature.id_as_json() {
		object.insert("id".to_string(), id);
	}
	object.insert("geometry".to_string(), geometry_to_geojson(&feature.geometry));
	object.insert(
		"properties".to_string(),
		Value::Object(
			feature
				.properties
				.iter()
				.map(|(k, v)| (k.clone(), v.to_json()))
				.collect(),
		),
	);
	Value::Object(object)
}

/// A bare ring has no GeoJSON type of its own and is written as a Polygon.
#[must_use]
pub fn geometry_to_geojson(geometry: &Geometry) -> Value {
	let (type_name, coordinates) = match geometry {
		Geometry::Point(g) => ("Point", position(&g.0)),
		Geometry::MultiPoint(g) => ("MultiPoint", Value::Array(g.0.iter().map(|p| position(&p.0)).collect())),
		Geometry::LineString(g) => ("LineString", positions(&g.0)),
		Geometry::MultiLineString(g) => (
			"MultiLineString",
			Value::Array(g.0.iter().map(|l| positions(&l.0)).collect()),
		),
		Geometry::Ring(g) => ("Polygon", Value::Array(vec![positions(&g.0)])),
		Geometry::Polygon(g) => ("Polygon", polygon(g)),
		Geometry::MultiPolygon(g) => ("MultiPolygon", Value::Array(g.0.iter().map(polygon).collect())),
		Geometry::Collection(members) => {
			return json!({
				"type": "GeometryCollection",
				"geometries": members.iter().map(geometry_to_geojson).collect::<Vec<_>>(),
			});
		}
	};
	json!({ "type": type_name, "coordinates": coordinates })
}

fn polygon(polygon: &PolygonGeometry) -> Value {
	Value::Array(polygon.0.iter().map(|r| positions(&r.0)).collect())
}

fn positions(coordinates: &[Coordinates]) -> Value {
	Value::Array(coordinates.iter().map(position).collect())
}

fn position(c: &Coordinates) -> Value {
	let number = |v: f64| Number::from_f64(v).map_or(Value::Null, Value::Number);
	Value::Array(vec![number(c.x()), number(c.y())])
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::geojson::parse_geojson_value;
	use anyhow::Result;
	use pretty_assertions::assert_eq;

	#[test]
	fn test_feature_to_geojson() {
		let mut feature = GeoFeature::new(Geometry::new_point([1, 2]));
		feature.set_id(5);
		feature.set_property("name", "a");
		assert_eq!(
			feature_to_geojson(&feature),
			json!({
				"type": "Feature",
				"id": 5.0,
				"geometry": {"type": "Point", "coordinates": [1.0, 2.0]},
				"properties": {"name": "a"}
			})
		);
	}

	#[test]
	fn test_feature_without_id() {
		let value = feature_to_geojson(&GeoFeature::new(Geometry::new_point([0, 0])));
		assert!(value.get("id").is_none());
		assert_eq!(value["properties"], json!({}));
	}

	#[test]
	fn test_ring_and_collection() {
		assert_eq!(
			geometry_to_geojson(&Geometry::new_ring(&[[0, 0], [1, 0], [1, 1], [0, 0]])),
			json!({"type": "Polygon", "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]})
		);
		assert_eq!(
			geometry_to_geojson(&Geometry::Collection(vec![Geometry::new_line_string(&[[0, 0], [1, 1]])])),
			json!({"type": "GeometryCollection", "geometries": [
				{"type": "LineString", "coordinates": [[0.0, 0.0], [1.0, 1.0]]}
			]})
		);
	}

	#[test]
	fn test_write_then_parse() -> Result<()> {
		let collection = GeoCollection::from(vec![GeoFeature::new_example()]);
		let parsed = parse_geojson_value(to_geojson(&collection))?;
		assert_eq!(parsed, collection);
		Ok(())
	}
}
