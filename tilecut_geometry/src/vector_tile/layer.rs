//! Vector Tile **Layer** utilities.
//!
//! [`VectorTileLayer`] is one `Tile.Layer` message: a name, the key and value
//! tables shared by its features, and the features in wire form. It converts
//! between that form and plain [`GeoFeature`]s.
//!
//! The encoding follows the MVT 2.1 schema:
//!  * field 1: `name` (string)
//!  * field 2: repeated `feature` (embedded message)
//!  * field 3: repeated `keys` (string)
//!  * field 4: repeated `values` (embedded message)
//!  * field 5: `extent` (varint, default 4096)
//!  * field 15: `version` (varint, default 1)

use super::{feature::VectorTileFeature, property_manager::PropertyManager, value::ValueKey};
use crate::geo::GeoFeature;
use anyhow::{Context, Result, anyhow};
use byteorder::LE;
use log::{trace, warn};
use tilecut_core::{
	Blob,
	io::{ValueReader, ValueWriter, ValueWriterBlob},
};

pub const DEFAULT_EXTENT: u32 = 4096;
pub const DEFAULT_VERSION: u32 = 2;

#[derive(Clone, Debug, PartialEq)]
pub struct VectorTileLayer {
	pub name: String,
	pub version: u32,
	/// Tile coordinate extent used to quantize geometry.
	pub extent: u32,
	pub features: Vec<VectorTileFeature>,
	pub property_manager: PropertyManager,
}

impl VectorTileLayer {
	#[must_use]
	pub fn new(name: String, extent: u32, version: u32) -> VectorTileLayer {
		VectorTileLayer {
			name,
			version,
			extent,
			features: vec![],
			property_manager: PropertyManager::default(),
		}
	}

	/// A new, empty layer with version 2 and extent 4096.
	#[must_use]
	pub fn new_standard(name: &str) -> VectorTileLayer {
		VectorTileLayer::new(name.to_string(), DEFAULT_EXTENT, DEFAULT_VERSION)
	}

	/// Reads a layer message. Missing `extent` and `version` fall back to the
	/// protobuf defaults 4096 and 1.
	pub fn read(reader: &mut dyn ValueReader<'_, LE>) -> Result<VectorTileLayer> {
		let mut extent = DEFAULT_EXTENT;
		let mut features: Vec<VectorTileFeature> = Vec::new();
		let mut name = None;
		let mut property_manager = PropertyManager::new();
		let mut version = 1;

		while reader.has_remaining() {
			match reader.read_pbf_key().context("Failed to read PBF key")? {
				(1, 2) => name = Some(reader.read_pbf_string().context("Failed to read layer name")?),
				(2, 2) => features.push(
					VectorTileFeature::read(
						reader
							.get_pbf_sub_reader()
							.context("Failed to get PBF sub-reader for feature")?
							.as_mut(),
					)
					.context("Failed to read VectorTileFeature")?,
				),
				(3, 2) => {
					property_manager.add_key(reader.read_pbf_string().context("Failed to read property key")?);
				}
				(4, 2) => {
					property_manager.add_value(
						ValueKey::read(
							reader
								.get_pbf_sub_reader()
								.context("Failed to get PBF sub-reader for property value")?
								.as_mut(),
						)
						.context("Failed to read property value")?,
					);
				}
				(5, 0) => extent = u32::try_from(reader.read_varint().context("Failed to read extent")?)?,
				(15, 0) => version = u32::try_from(reader.read_varint().context("Failed to read version")?)?,
				(field, wire_type) => {
					trace!("skipping layer field {field} with wire type {wire_type}");
					reader.skip_pbf_field(wire_type)?;
				}
			}
		}

		Ok(VectorTileLayer {
			name: name.ok_or(anyhow!("Layer name is required"))?,
			version,
			extent,
			features,
			property_manager,
		})
	}

	/// Serializes the layer. `extent` and `version` are always written.
	pub fn to_blob(&self) -> Result<Blob> {
		let mut writer = ValueWriterBlob::new_le();

		writer
			.write_pbf_key(1, 2)
			.context("Failed to write PBF key for layer name")?;
		writer.write_pbf_string(&self.name).context("Failed to write layer name")?;

		for feature in &self.features {
			writer
				.write_pbf_key(2, 2)
				.context("Failed to write PBF key for feature")?;
			writer
				.write_pbf_blob(&feature.to_blob().context("Failed to convert feature to blob")?)
				.context("Failed to write feature blob")?;
		}

		for key in self.property_manager.keys.iter() {
			writer
				.write_pbf_key(3, 2)
				.context("Failed to write PBF key for property key")?;
			writer.write_pbf_string(key).context("Failed to write property key")?;
		}

		for value in self.property_manager.values.iter() {
			writer
				.write_pbf_key(4, 2)
				.context("Failed to write PBF key for property value")?;
			writer
				.write_pbf_blob(&value.to_blob().context("Failed to convert property value to blob")?)
				.context("Failed to write property value blob")?;
		}

		writer
			.write_pbf_key(5, 0)
			.context("Failed to write PBF key for extent")?;
		writer
			.write_varint(u64::from(self.extent))
			.context("Failed to write extent")?;

		writer
			.write_pbf_key(15, 0)
			.context("Failed to write PBF key for version")?;
		writer
			.write_varint(u64::from(self.version))
			.context("Failed to write version")?;

		Ok(writer.into_blob())
	}

	/// Builds a layer from features, interning their properties into the key and
	/// value tables in first-seen order.
	pub fn from_features(name: String, features: &[GeoFeature], extent: u32, version: u32) -> Result<VectorTileLayer> {
		let mut layer = VectorTileLayer::new(name, extent, version);
		for feature in features {
			layer.add_feature(feature)?;
		}
		Ok(layer)
	}

	pub fn add_feature(&mut self, feature: &GeoFeature) -> Result<()> {
		let tag_ids = self
			.property_manager
			.encode_tag_ids(&feature.properties)
			.with_context(|| format!("Failed to encode properties in layer '{}'", self.name))?;
		let vt_feature = VectorTileFeature::from_geometry(feature.id, tag_ids, &feature.geometry)
			.with_context(|| format!("Failed to encode geometry in layer '{}'", self.name))?;
		self.features.push(vt_feature);
		Ok(())
	}

	/// Converts every feature back into a [`GeoFeature`].
	///
	/// A feature that cannot be decoded is logged and left out; the rest of the
	/// layer is still returned.
	pub fn to_features(&self) -> Vec<GeoFeature> {
		let mut features = Vec::with_capacity(self.features.len());
		for (index, feature) in self.features.iter().enumerate() {
			match self.to_feature(feature) {
				Ok(f) => features.push(f),
				Err(err) => warn!("skipping feature {index} of layer '{}': {err:#}", self.name),
			}
		}
		features
	}

	fn to_feature(&self, feature: &VectorTileFeature) -> Result<GeoFeature> {
		let mut geo_feature = GeoFeature::new(feature.to_geometry()?);
		geo_feature.id = feature.id;
		geo_feature.properties = self.property_manager.decode_tag_ids(&feature.tag_ids)?;
		Ok(geo_feature)
	}

	#[cfg(test)]
	pub fn new_example() -> Self {
		VectorTileLayer::from_features(String::from("layer1"), &[GeoFeature::new_example()], 4096, 2).unwrap()
	}
}
