use super::{
	CodecError,
	commands::{decode_geometry, encode_geometry},
	geometry_type::GeomType,
};
use crate::geo::Geometry;
use anyhow::{Context, Result};
use byteorder::LE;
use log::trace;
use tilecut_core::{
	Blob,
	io::{ValueReader, ValueWriter, ValueWriterBlob},
};

/// A feature in wire form: tag indices into the layer tables plus the raw
/// geometry command stream.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VectorTileFeature {
	pub id: Option<u64>,
	pub tag_ids: Vec<u32>,
	pub geom_type: GeomType,
	pub geometry: Vec<u32>,
}

impl VectorTileFeature {
	/// Decodes a `Tile.Feature` message. Unknown fields are skipped.
	pub fn read(reader: &mut dyn ValueReader<'_, LE>) -> Result<VectorTileFeature> {
		let mut f = VectorTileFeature::default();

		while reader.has_remaining() {
			match reader.read_pbf_key().context("Failed to read PBF key")? {
				(1, 0) => f.id = Some(reader.read_varint().context("Failed to read feature ID")?),
				(2, 2) => f.tag_ids = reader.read_pbf_packed_uint32().context("Failed to read tag IDs")?,
				(3, 0) => f.geom_type = GeomType::from(reader.read_varint().context("Failed to read geometry type")?),
				(4, 2) => {
					f.geometry = reader
						.read_pbf_packed_uint32()
						.context("Failed to read geometry data")?
				}
				(field, wire_type) => {
					trace!("skipping feature field {field} with wire type {wire_type}");
					reader.skip_pbf_field(wire_type)?;
				}
			}
		}

		Ok(f)
	}

	pub fn to_blob(&self) -> Result<Blob> {
		let mut writer = ValueWriterBlob::new_le();

		if let Some(id) = self.id {
			writer.write_pbf_key(1, 0).context("Failed to write PBF key for feature ID")?;
			writer.write_varint(id).context("Failed to write feature ID")?;
		}

		if !self.tag_ids.is_empty() {
			writer.write_pbf_key(2, 2).context("Failed to write PBF key for tag IDs")?;
			writer
				.write_pbf_packed_uint32(&self.tag_ids)
				.context("Failed to write tag IDs")?;
		}

		writer
			.write_pbf_key(3, 0)
			.context("Failed to write PBF key for geometry type")?;
		writer
			.write_varint(self.geom_type.as_u64())
			.context("Failed to write geometry type")?;

		if !self.geometry.is_empty() {
			writer
				.write_pbf_key(4, 2)
				.context("Failed to write PBF key for geometry data")?;
			writer
				.write_pbf_packed_uint32(&self.geometry)
				.context("Failed to write geometry data")?;
		}

		Ok(writer.into_blob())
	}

	pub fn from_geometry(id: Option<u64>, tag_ids: Vec<u32>, geometry: &Geometry) -> Result<Self, CodecError> {
		let (geom_type, data) = encode_geometry(geometry)?;
		Ok(VectorTileFeature {
			id,
			tag_ids,
			geom_type,
			geometry: data,
		})
	}

	pub fn to_geometry(&self) -> Result<Geometry, CodecError> {
		decode_geometry(self.geom_type, &self.geometry)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;
	use tilecut_core::io::ValueReaderSlice;

	#[test]
	fn test_wire_round_trip() -> Result<()> {
		let feature = VectorTileFeature::from_geometry(Some(3), vec![0, 1], &Geometry::new_point([25, 17]))?;
		let blob = feature.to_blob()?;
		assert_eq!(
			blob.as_slice(),
			&[0x08, 0x03, 0x12, 0x02, 0x00, 0x01, 0x18, 0x01, 0x22, 0x03, 0x09, 0x32, 0x22]
		);

		let decoded = VectorTileFeature::read(&mut ValueReaderSlice::new_le(blob.as_slice()))?;
		assert_eq!(decoded, feature);
		assert_eq!(decoded.to_geometry()?, Geometry::new_point([25, 17]));
		Ok(())
	}

	#[test]
	fn test_without_id_and_tags() -> Result<()> {
		let feature = VectorTileFeature::from_geometry(None, vec![], &Geometry::new_line_string(&[[0, 1], [0, 3]]))?;
		let decoded = VectorTileFeature::read(&mut ValueReaderSlice::new_le(feature.to_blob()?.as_slice()))?;
		assert_eq!(decoded.id, None);
		assert!(decoded.tag_ids.is_empty());
		assert_eq!(decoded.geom_type, GeomType::LineString);
		assert_eq!(decoded.to_geometry()?, Geometry::new_line_string(&[[0, 1], [0, 3]]));
		Ok(())
	}

	#[test]
	fn test_unknown_fields_are_skipped() -> Result<()> {
		// field 9 (varint) and field 10 (length delimited) ahead of the id
		let data = [0x48, 0x05, 0x52, 0x01, 0xFF, 0x08, 0x07];
		let feature = VectorTileFeature::read(&mut ValueReaderSlice::new_le(&data))?;
		assert_eq!(feature.id, Some(7));
		Ok(())
	}

	#[test]
	fn test_unknown_geom_type_fails_to_decode() {
		let feature = VectorTileFeature {
			geometry: vec![9, 50, 34],
			..Default::default()
		};
		assert_eq!(
			feature.to_geometry(),
			Err(CodecError::UnsupportedGeometryType(String::from("Unknown")))
		);
	}
}
