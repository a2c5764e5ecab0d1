use crate::{geo::*, vector_tile::CodecError};
use anyhow::{Context, Result, anyhow, bail};
use serde_json::{Map, Value};

/// Parses a FeatureCollection. A bare Feature is accepted as a collection of one.
pub fn parse_geojson(json: &str) -> Result<GeoCollection> {
	let value: Value = serde_json::from_str(json).context("invalid JSON")?;
	parse_geojson_value(value)
}

pub fn parse_geojson_value(value: Value) -> Result<GeoCollection> {
	let mut object = into_object(value, "GeoJSON")?;
	match object_type(&object)?.as_str() {
		"FeatureCollection" => {
			let features = match object.remove("features") {
				Some(Value::Array(features)) => features,
				Some(_) => bail!("'features' must be an array"),
				None => bail!("FeatureCollection is missing 'features'"),
			};
			let features = features
				.into_iter()
				.enumerate()
				.map(|(index, f)| parse_geojson_feature(f).with_context(|| format!("feature {index}")))
				.collect::<Result<Vec<_>>>()?;
			Ok(GeoCollection::from(features))
		}
		"Feature" => Ok(GeoCollection::from(vec![parse_geojson_feature(Value::Object(object))?])),
		other => Err(CodecError::UnsupportedType(other.to_string()).into()),
	}
}

pub fn parse_geojson_feature(value: Value) -> Result<GeoFeature> {
	let mut object = into_object(value, "feature")?;
	let t = object_type(&object)?;
	if t != "Feature" {
		return Err(CodecError::UnsupportedType(t).into());
	}

	let geometry = parse_geojson_geometry(object.remove("geometry").ok_or(anyhow!("feature is missing 'geometry'"))?)?;
	let mut feature = GeoFeature::new(geometry);
	feature.id = object.remove("id").and_then(|id| parse_geojson_id(&id));

	match object.remove("properties") {
		None | Some(Value::Null) => {}
		Some(Value::Object(properties)) => {
			feature.properties = properties
				.into_iter()
				.map(|(k, v)| (k, GeoValue::from_json(v)))
				.collect();
		}
		Some(_) => bail!("'properties' must be an object"),
	}

	Ok(feature)
}

/// Feature ids must be non-negative integers on the wire. Numbers are truncated,
/// numeric strings are parsed, anything else means "no id".
pub fn parse_geojson_id(value: &Value) -> Option<u64> {
	match value {
		Value::Number(n) => n.as_u64().or_else(|| {
			n.as_f64()
				.filter(|f| f.is_finite() && *f >= 0.0)
				.map(|f| f as u64)
		}),
		Value::String(s) => s.trim().parse::<u64>().ok().or_else(|| {
			s.trim()
				.parse::<f64>()
				.ok()
				.filter(|f| f.is_finite() && *f >= 0.0)
				.map(|f| f as u64)
		}),
		_ => None,
	}
}

pub fn parse_geojson_geometry(value: Value) -> Result<Geometry> {
	let mut object = into_object(value, "geometry")?;
	let geometry_type = object_type(&object)?;

	if geometry_type == "GeometryCollection" {
		let Some(Value::Array(geometries)) = object.remove("geometries") else {
			bail!("GeometryCollection must have a 'geometries' array");
		};
		return Ok(Geometry::Collection(
			geometries
				.into_iter()
				.map(parse_geojson_geometry)
				.collect::<Result<Vec<_>>>()?,
		));
	}

	let coordinates = object
		.remove("coordinates")
		.ok_or(anyhow!("geometry must have coordinates"))?;

	Ok(match geometry_type.as_str() {
		"Point" => Geometry::Point(PointGeometry(parse_position(&coordinates)?)),
		"MultiPoint" => Geometry::MultiPoint(MultiPointGeometry(
			parse_positions(&coordinates)?.into_iter().map(PointGeometry).collect(),
		)),
		"LineString" => Geometry::LineString(LineStringGeometry(parse_positions(&coordinates)?)),
		"MultiLineString" => Geometry::MultiLineString(MultiLineStringGeometry(
			as_array(&coordinates)?
				.iter()
				.map(|l| parse_positions(l).map(LineStringGeometry))
				.collect::<Result<Vec<_>>>()?,
		)),
		"Polygon" => Geometry::Polygon(parse_polygon(&coordinates)?),
		"MultiPolygon" => Geometry::MultiPolygon(MultiPolygonGeometry(
			as_array(&coordinates)?
				.iter()
				.map(parse_polygon)
				.collect::<Result<Vec<_>>>()?,
		)),
		_ => return Err(CodecError::UnsupportedType(geometry_type).into()),
	})
}

fn parse_polygon(value: &Value) -> Result<PolygonGeometry> {
	Ok(PolygonGeometry(
		as_array(value)?
			.iter()
			.map(|r| parse_positions(r).map(RingGeometry))
			.collect::<Result<Vec<_>>>()?,
	))
}

fn parse_positions(value: &Value) -> Result<Vec<Coordinates>> {
	as_array(value)?.iter().map(parse_position).collect()
}

/// Reads `[x, y, ...]`. Extra dimensions are ignored.
fn parse_position(value: &Value) -> Result<Coordinates> {
	let array = as_array(value)?;
	if array.len() < 2 {
		return Err(CodecError::DimensionalityTooLow(array.len()).into());
	}
	let number = |v: &Value| v.as_f64().ok_or_else(|| anyhow!("coordinate must be a number, found {v}"));
	Ok(Coordinates::new(number(&array[0])?, number(&array[1])?))
}

fn as_array(value: &Value) -> Result<&Vec<Value>> {
	value.as_array().ok_or_else(|| anyhow!("expected an array, found {value}"))
}

fn into_object(value: Value, what: &str) -> Result<Map<String, Value>> {
	match value {
		Value::Object(object) => Ok(object),
		other => bail!("{what} must be an object, found {other}"),
	}
}

fn object_type(object: &Map<String, Value>) -> Result<String> {
	match object.get("type") {
		Some(Value::String(t)) => Ok(t.clone()),
		Some(_) => bail!("'type' must be a string"),
		None => bail!("object must have a type"),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;
	use rstest::rstest;
	use serde_json::json;

	fn codec_error(err: &anyhow::Error) -> Option<&CodecError> {
		err.chain().find_map(|e| e.downcast_ref::<CodecError>())
	}

	#[test]
	fn test_parse_feature_collection() -> Result<()> {
		let json = r#"{
			"type": "FeatureCollection",
			"features": [
				{"type": "Feature", "id": 7, "geometry": {"type": "Point", "coordinates": [1.5, 2.5, 99]}, "properties": {"name": "a", "n": -3, "big": 4.5}},
				{"type": "Feature", "geometry": {"type": "LineString", "coordinates": [[0, 0], [1, 1]]}, "properties": null}
			]
		}"#;
		let collection = parse_geojson(json)?;
		assert_eq!(collection.len(), 2);

		let first = &collection.features[0];
		assert_eq!(first.id, Some(7));
		assert_eq!(first.geometry, Geometry::new_point([1.5, 2.5]));
		assert_eq!(
			first.properties,
			GeoProperties::from(vec![
				("name", GeoValue::from("a")),
				("n", GeoValue::Int(-3)),
				("big", GeoValue::Double(4.5)),
			])
		);

		let second = &collection.features[1];
		assert_eq!(second.id, None);
		assert_eq!(second.geometry, Geometry::new_line_string(&[[0, 0], [1, 1]]));
		assert!(second.properties.is_empty());
		Ok(())
	}

	#[test]
	fn test_parse_bare_feature() -> Result<()> {
		let json = r#"{"type":"Feature","geometry":{"type":"Point","coordinates":[1,2]},"properties":{}}"#;
		assert_eq!(parse_geojson(json)?.features[0].geometry, Geometry::new_point([1, 2]));
		Ok(())
	}

	#[test]
	fn test_parse_all_geometry_types() -> Result<()> {
		let parse = parse_geojson_geometry;
		assert_eq!(
			parse(json!({"type": "MultiPoint", "coordinates": [[1, 2], [3, 4]]}))?,
			Geometry::new_multi_point(&[[1, 2], [3, 4]])
		);
		assert_eq!(
			parse(json!({"type": "MultiLineString", "coordinates": [[[1, 2], [3, 4]], [[5, 6], [7, 8]]]}))?,
			Geometry::new_multi_line_string(&[vec![[1, 2], [3, 4]], vec![[5, 6], [7, 8]]])
		);
		assert_eq!(
			parse(json!({"type": "Polygon", "coordinates": [[[0, 0], [4, 0], [4, 4], [0, 0]]]}))?,
			Geometry::new_polygon(&[vec![[0, 0], [4, 0], [4, 4], [0, 0]]])
		);
		assert_eq!(
			parse(json!({"type": "MultiPolygon", "coordinates": [[[[0, 0], [4, 0], [4, 4], [0, 0]]]]}))?,
			Geometry::new_multi_polygon(&[vec![vec![[0, 0], [4, 0], [4, 4], [0, 0]]]])
		);
		assert_eq!(
			parse(json!({"type": "GeometryCollection", "geometries": [{"type": "Point", "coordinates": [1, 2]}]}))?,
			Geometry::Collection(vec![Geometry::new_point([1, 2])])
		);
		Ok(())
	}

	#[test]
	fn test_dimensionality_too_low() {
		let err = parse_geojson_geometry(json!({"type": "LineString", "coordinates": [[0, 0], [1]]})).unwrap_err();
		assert_eq!(codec_error(&err), Some(&CodecError::DimensionalityTooLow(1)));
	}

	#[test]
	fn test_unsupported_type() {
		let err = parse_geojson_geometry(json!({"type": "Curve", "coordinates": [0, 0]})).unwrap_err();
		assert_eq!(codec_error(&err), Some(&CodecError::UnsupportedType("Curve".to_string())));

		let err = parse_geojson(r#"{"type": "Topology", "objects": {}}"#).unwrap_err();
		assert_eq!(codec_error(&err), Some(&CodecError::UnsupportedType("Topology".to_string())));
	}

	#[rstest]
	#[case(json!(12), Some(12))]
	#[case(json!(12.9), Some(12))]
	#[case(json!(0), Some(0))]
	#[case(json!(-1), None)]
	#[case(json!(-1.5), None)]
	#[case(json!("42"), Some(42))]
	#[case(json!("42.7"), Some(42))]
	#[case(json!("abc"), None)]
	#[case(json!(true), None)]
	#[case(json!(null), None)]
	fn test_parse_id(#[case] value: Value, #[case] expected: Option<u64>) {
		assert_eq!(parse_geojson_id(&value), expected);
	}

	#[test]
	fn test_structural_errors() {
		assert!(parse_geojson("not json").is_err());
		assert!(parse_geojson(r#"{"type":"FeatureCollection"}"#).is_err());
		assert!(parse_geojson(r#"{"features":[]}"#).is_err());
		assert!(parse_geojson(r#"{"type":"Feature","properties":{}}"#).is_err());
		assert!(parse_geojson(r#"{"type":"Feature","geometry":{"type":"Point","coordinates":[0,0]},"properties":[]}"#).is_err());
		assert!(parse_geojson_geometry(json!({"type": "Point", "coordinates": ["a", 0]})).is_err());
	}
}
