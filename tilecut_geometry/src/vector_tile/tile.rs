use super::layer::VectorTileLayer;
use anyhow::{Context, Result};
use log::trace;
use tilecut_core::{
	Blob,
	compression::{decompress_gzip, is_gzip},
	io::*,
};

/// A whole vector tile: a list of layers (field 3 of the `Tile` message).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VectorTile {
	pub layers: Vec<VectorTileLayer>,
}

impl VectorTile {
	#[must_use]
	pub fn new(layers: Vec<VectorTileLayer>) -> VectorTile {
		VectorTile { layers }
	}

	/// Decodes an uncompressed tile.
	pub fn from_blob(blob: &Blob) -> Result<VectorTile> {
		let mut reader = ValueReaderSlice::new_le(blob.as_slice());

		let mut tile = VectorTile::default();
		while reader.has_remaining() {
			match reader.read_pbf_key().context("Failed to read PBF key")? {
				(3, 2) => {
					tile.layers.push(
						VectorTileLayer::read(
							reader
								.get_pbf_sub_reader()
								.context("Failed to get PBF sub-reader")?
								.as_mut(),
						)
						.context("Failed to read VectorTileLayer")?,
					);
				}
				(field, wire_type) => {
					trace!("skipping tile field {field} with wire type {wire_type}");
					reader.skip_pbf_field(wire_type)?;
				}
			}
		}

		Ok(tile)
	}

	/// Decodes a tile that may or may not be gzip-compressed.
	pub fn from_blob_auto(blob: &Blob) -> Result<VectorTile> {
		if is_gzip(blob) {
			let raw = decompress_gzip(blob).context("Failed to decompress tile")?;
			VectorTile::from_blob(&raw)
		} else {
			VectorTile::from_blob(blob)
		}
	}

	pub fn to_blob(&self) -> Result<Blob> {
		let mut writer = ValueWriterBlob::new_le();

		for layer in self.layers.iter() {
			writer.write_pbf_key(3, 2).context("Failed to write PBF key")?;
			writer
				.write_pbf_blob(&layer.to_blob().context("Failed to convert VectorTileLayer to blob")?)
				.context("Failed to write PBF blob")?;
		}

		Ok(writer.into_blob())
	}

	pub fn find_layer(&self, name: &str) -> Option<&VectorTileLayer> {
		self.layers.iter().find(|layer| layer.name == name)
	}
}
