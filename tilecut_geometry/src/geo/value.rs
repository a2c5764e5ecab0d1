use serde_json::{Number, Value};
use std::fmt::{Debug, Display};

/// A feature attribute value.
///
/// The scalar variants map onto the vector tile value kinds. `Json` holds arrays
/// and objects read from GeoJSON, which are carried as their JSON text on the wire.
#[derive(Clone, PartialEq)]
pub enum GeoValue {
	Bool(bool),
	Double(f64),
	Float(f32),
	Int(i64),
	Null,
	String(String),
	UInt(u64),
	Json(Value),
}

impl GeoValue {
	/// Converts a JSON value the way GeoJSON properties are read: integers that fit
	/// `u64` become `UInt`, other integers `Int`, everything else numeric `Double`.
	#[must_use]
	pub fn from_json(value: Value) -> Self {
		match value {
			Value::Null => GeoValue::Null,
			Value::Bool(b) => GeoValue::Bool(b),
			Value::Number(n) => {
				if let Some(v) = n.as_u64() {
					GeoValue::UInt(v)
				} else if let Some(v) = n.as_i64() {
					GeoValue::Int(v)
				} else {
					GeoValue::Double(n.as_f64().unwrap_or(f64::NAN))
				}
			}
			Value::String(s) => GeoValue::String(s),
			v @ (Value::Array(_) | Value::Object(_)) => GeoValue::Json(v),
		}
	}

	/// Converts to JSON. Non-finite floats have no JSON form and become `null`.
	#[must_use]
	pub fn to_json(&self) -> Value {
		match self {
			GeoValue::Bool(v) => Value::Bool(*v),
			GeoValue::Double(v) => Number::from_f64(*v).map_or(Value::Null, Value::Number),
			GeoValue::Float(v) => Number::from_f64(f64::from(*v)).map_or(Value::Null, Value::Number),
			GeoValue::Int(v) => Value::from(*v),
			GeoValue::Null => Value::Null,
			GeoValue::String(v) => Value::String(v.clone()),
			GeoValue::UInt(v) => Value::from(*v),
			GeoValue::Json(v) => v.clone(),
		}
	}

	/// Returns the numeric value as `f64`, if there is one.
	#[must_use]
	pub fn as_f64(&self) -> Option<f64> {
		match self {
			GeoValue::Double(v) => Some(*v),
			GeoValue::Float(v) => Some(f64::from(*v)),
			GeoValue::Int(v) => Some(*v as f64),
			GeoValue::UInt(v) => Some(*v as f64),
			_ => None,
		}
	}
}

impl Debug for GeoValue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::String(v) => f.debug_tuple("String").field(v).finish(),
			Self::Float(v) => f.debug_tuple("Float").field(v).finish(),
			Self::Double(v) => f.debug_tuple("Double").field(v).finish(),
			Self::Int(v) => f.debug_tuple("Int").field(v).finish(),
			Self::UInt(v) => f.debug_tuple("UInt").field(v).finish(),
			Self::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
			Self::Null => f.debug_tuple("Null").finish(),
			Self::Json(v) => f.debug_tuple("Json").field(&v.to_string()).finish(),
		}
	}
}

impl Display for GeoValue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			GeoValue::Bool(v) => write!(f, "{v}"),
			GeoValue::Double(v) => write!(f, "{v}"),
			GeoValue::Float(v) => write!(f, "{v}"),
			GeoValue::Int(v) => write!(f, "{v}"),
			GeoValue::Null => write!(f, "null"),
			GeoValue::String(v) => write!(f, "{v}"),
			GeoValue::UInt(v) => write!(f, "{v}"),
			GeoValue::Json(v) => write!(f, "{v}"),
		}
	}
}

impl From<&str> for GeoValue {
	fn from(value: &str) -> Self {
		GeoValue::String(value.to_string())
	}
}

impl From<String> for GeoValue {
	fn from(value: String) -> Self {
		GeoValue::String(value)
	}
}

impl From<i32> for GeoValue {
	fn from(value: i32) -> Self {
		if value < 0 {
			GeoValue::Int(i64::from(value))
		} else {
			GeoValue::UInt(value as u64)
		}
	}
}

impl From<u32> for GeoValue {
	fn from(value: u32) -> Self {
		GeoValue::UInt(u64::from(value))
	}
}

impl From<i64> for GeoValue {
	fn from(value: i64) -> Self {
		GeoValue::Int(value)
	}
}

impl From<u64> for GeoValue {
	fn from(value: u64) -> Self {
		GeoValue::UInt(value)
	}
}

impl From<f32> for GeoValue {
	fn from(value: f32) -> Self {
		GeoValue::Float(value)
	}
}

impl From<f64> for GeoValue {
	fn from(value: f64) -> Self {
		GeoValue::Double(value)
	}
}

impl From<bool> for GeoValue {
	fn from(value: bool) -> Self {
		GeoValue::Bool(value)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case(json!(null), GeoValue::Null)]
	#[case(json!(true), GeoValue::Bool(true))]
	#[case(json!(7), GeoValue::UInt(7))]
	#[case(json!(-7), GeoValue::Int(-7))]
	#[case(json!(2.5), GeoValue::Double(2.5))]
	#[case(json!("a"), GeoValue::from("a"))]
	#[case(json!([1, 2]), GeoValue::Json(json!([1, 2])))]
	fn test_from_json(#[case] input: Value, #[case] expected: GeoValue) {
		assert_eq!(GeoValue::from_json(input), expected);
	}

	#[test]
	fn test_to_json() {
		assert_eq!(GeoValue::from(-3).to_json(), json!(-3));
		assert_eq!(GeoValue::from(1.5f32).to_json(), json!(1.5));
		assert_eq!(GeoValue::Double(f64::NAN).to_json(), Value::Null);
		assert_eq!(GeoValue::Json(json!({"a": 1})).to_json(), json!({"a": 1}));
	}

	#[test]
	fn test_from_i32_splits_sign() {
		assert_eq!(GeoValue::from(5), GeoValue::UInt(5));
		assert_eq!(GeoValue::from(-5), GeoValue::Int(-5));
	}

	#[test]
	fn test_display_and_as_f64() {
		assert_eq!(GeoValue::from("x").to_string(), "x");
		assert_eq!(GeoValue::Json(json!([1])).to_string(), "[1]");
		assert_eq!(GeoValue::Null.to_string(), "null");
		assert_eq!(GeoValue::from(4u64).as_f64(), Some(4.0));
		assert_eq!(GeoValue::from(true).as_f64(), None);
	}
}
