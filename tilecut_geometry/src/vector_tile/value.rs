use super::CodecError;
use crate::geo::GeoValue;
use anyhow::{Context, Result};
use byteorder::LE;
use tilecut_core::{
	Blob,
	io::{ValueReader, ValueWriter, ValueWriterBlob},
};

/// A layer value as it is interned and written to the wire.
///
/// Floats are stored by their bit pattern so that the key can be hashed. `Other`
/// holds the JSON text of arrays and objects. It only serves as an interning key,
/// the wire has no kind for it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ValueKey {
	String(String),
	Int(i64),
	UInt(u64),
	Float(u32),
	Double(u64),
	Bool(bool),
	Other(String),
}

impl ValueKey {
	/// Reads one `Tile.Value` message.
	///
	/// Every numeric kind is widened to `Double`: an integer that goes through a
	/// tile comes back as a float of the same value.
	pub fn read(reader: &mut dyn ValueReader<'_, LE>) -> Result<ValueKey> {
		let mut value: Option<ValueKey> = None;

		while reader.has_remaining() {
			value = Some(match reader.read_pbf_key().context("Failed to read PBF key")? {
				(1, 2) => ValueKey::String(reader.read_pbf_string().context("Failed to read string value")?),
				(2, 5) => ValueKey::from_f64(f64::from(reader.read_f32().context("Failed to read f32 value")?)),
				(3, 1) => ValueKey::from_f64(reader.read_f64().context("Failed to read f64 value")?),
				(4, 0) => ValueKey::from_f64(reader.read_varint().context("Failed to read int value")? as i64 as f64),
				(5, 0) => ValueKey::from_f64(reader.read_varint().context("Failed to read uint value")? as f64),
				(6, 0) => ValueKey::from_f64(reader.read_svarint().context("Failed to read sint value")? as f64),
				(7, 0) => ValueKey::Bool(reader.read_varint().context("Failed to read bool value")? != 0),
				(f, w) => {
					return Err(CodecError::ProtocolViolation(format!(
						"Unexpected combination of field number ({f}) and wire type ({w}) in value"
					))
					.into());
				}
			});
		}

		value.ok_or_else(|| CodecError::ProtocolViolation(String::from("value message is empty")).into())
	}

	#[must_use]
	pub fn from_f64(value: f64) -> Self {
		ValueKey::Double(value.to_bits())
	}

	pub fn to_blob(&self) -> Result<Blob> {
		let mut writer = ValueWriterBlob::new_le();

		match self {
			ValueKey::String(s) => {
				writer.write_pbf_key(1, 2)?;
				writer.write_pbf_string(s).context("Failed to write string value")?;
			}
			ValueKey::Other(json) => {
				return Err(CodecError::UnencodableValueType(json.clone()).into());
			}
			ValueKey::Float(bits) => {
				writer.write_pbf_key(2, 5)?;
				writer.write_f32(f32::from_bits(*bits)).context("Failed to write float value")?;
			}
			ValueKey::Double(bits) => {
				writer.write_pbf_key(3, 1)?;
				writer.write_f64(f64::from_bits(*bits)).context("Failed to write double value")?;
			}
			ValueKey::UInt(u) => {
				writer.write_pbf_key(5, 0)?;
				writer.write_varint(*u).context("Failed to write uint value")?;
			}
			ValueKey::Int(i) => {
				writer.write_pbf_key(6, 0)?;
				writer.write_svarint(*i).context("Failed to write sint value")?;
			}
			ValueKey::Bool(b) => {
				writer.write_pbf_key(7, 0)?;
				writer.write_varint(u64::from(*b)).context("Failed to write bool value")?;
			}
		}

		Ok(writer.into_blob())
	}

	#[must_use]
	pub fn to_geo_value(&self) -> GeoValue {
		match self {
			ValueKey::String(s) | ValueKey::Other(s) => GeoValue::String(s.clone()),
			ValueKey::Int(i) => GeoValue::Int(*i),
			ValueKey::UInt(u) => GeoValue::UInt(*u),
			ValueKey::Float(bits) => GeoValue::Float(f32::from_bits(*bits)),
			ValueKey::Double(bits) => GeoValue::Double(f64::from_bits(*bits)),
			ValueKey::Bool(b) => GeoValue::Bool(*b),
		}
	}
}

impl TryFrom<&GeoValue> for ValueKey {
	type Error = CodecError;

	fn try_from(value: &GeoValue) -> Result<Self, CodecError> {
		Ok(match value {
			GeoValue::String(s) => ValueKey::String(s.clone()),
			GeoValue::Int(i) => ValueKey::Int(*i),
			GeoValue::UInt(u) => ValueKey::UInt(*u),
			GeoValue::Float(f) => ValueKey::Float(f.to_bits()),
			GeoValue::Double(f) => ValueKey::Double(f.to_bits()),
			GeoValue::Bool(b) => ValueKey::Bool(*b),
			GeoValue::Json(v) => ValueKey::Other(
				serde_json::to_string(v).map_err(|e| CodecError::UnencodableValueType(format!("uncomparable: {e}")))?,
			),
			GeoValue::Null => return Err(CodecError::UnencodableValueType(String::from("null"))),
		})
	}
}
