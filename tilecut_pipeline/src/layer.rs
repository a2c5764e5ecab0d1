use crate::dedup;
use anyhow::{Context, Result};
use log::{debug, info};
use std::{collections::BTreeMap, time::Instant};
use tilecut_core::{
	Blob, TileCoord,
	compression::{compress_gzip, decompress_gzip},
};
use tilecut_geometry::{
	Bound, GeoCollection, GeoFeature, GeometryTrait,
	clip::clip_geometry,
	math::TriangleOverlap,
	projection::TileProjection,
	simplify::Simplifier,
	vector_tile::{DEFAULT_EXTENT, VectorTile, VectorTileLayer},
};

/// Default lowest zoom level for the triangle overlap pass.
pub const TRIANGLE_OVERLAP_ZOOM: u8 = 14;

/// One named layer of features on its way into or out of a tile.
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
	pub name: String,
	pub version: u32,
	pub extent: u32,
	pub features: Vec<GeoFeature>,
}

impl Layer {
	/// Creates a version 2 layer with the default extent.
	#[must_use]
	pub fn new(name: impl Into<String>, collection: GeoCollection) -> Layer {
		Layer {
			name: name.into(),
			version: 2,
			extent: DEFAULT_EXTENT,
			features: collection.features,
		}
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.features.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.features.is_empty()
	}

	/// Projects every geometry from WGS84 degrees into the units of this layer's extent.
	pub fn project_to_tile(&mut self, coord: &TileCoord) -> Result<()> {
		let projection = TileProjection::new(coord, self.extent)?;
		for feature in &mut self.features {
			feature.geometry.project(&|c| projection.to_tile(c));
		}
		Ok(())
	}

	pub fn project_to_wgs84(&mut self, coord: &TileCoord) -> Result<()> {
		let projection = TileProjection::new(coord, self.extent)?;
		for feature in &mut self.features {
			feature.geometry.project(&|c| projection.to_wgs84(c));
		}
		Ok(())
	}

	/// Drops features whose bounds lie entirely outside `buffered`, the tile grown by its buffer.
	///
	/// Anything touching the box is kept for the clipper to cut down.
	pub fn remove_data_outside_buffer(&mut self, buffered: &Bound) {
		let before = self.features.len();
		self.features.retain(|feature| {
			feature
				.geometry
				.compute_bounds()
				.is_some_and(|bounds| buffered.intersects(&bounds))
		});
		debug!(
			"layer '{}': culled outside buffer, {before} -> {} features",
			self.name,
			self.features.len()
		);
	}

	/// Replaces every geometry by its part inside `bound`. Features with nothing left are dropped.
	pub fn clip(&mut self, bound: &Bound) {
		let before = self.features.len();
		self.features = std::mem::take(&mut self.features)
			.into_iter()
			.filter_map(|mut feature| {
				feature.geometry = clip_geometry(bound, feature.geometry)?;
				(!feature.geometry.is_empty()).then_some(feature)
			})
			.collect();
		debug!("layer '{}': clipped, {before} -> {} features", self.name, self.features.len());
	}

	pub fn simplify(&mut self, simplifier: &mut impl Simplifier) {
		let before = self.features.len();
		self.features = std::mem::take(&mut self.features)
			.into_iter()
			.filter_map(|mut feature| {
				feature.geometry = simplifier.simplify(feature.geometry)?;
				Some(feature)
			})
			.collect();
		debug!("layer '{}': simplified, {before} -> {} features", self.name, self.features.len());
	}

	pub fn remove_overlap_triangles(&mut self, predicate: &impl TriangleOverlap) {
		let start = Instant::now();
		let before = self.features.len();
		self.features = dedup::remove_overlap_triangles(std::mem::take(&mut self.features), predicate);
		info!(
			"layer '{}': removing overlapping triangles took {:?}, before {before}, after {}",
			self.name,
			start.elapsed(),
			self.features.len()
		);
	}

	pub fn to_vector_tile_layer(&self) -> Result<VectorTileLayer> {
		VectorTileLayer::from_features(self.name.clone(), &self.features, self.extent, self.version)
			.with_context(|| format!("Failed to encode layer '{}'", self.name))
	}

	/// Decodes the features of a wire layer. Features that fail to decode are skipped.
	#[must_use]
	pub fn from_vector_tile_layer(layer: &VectorTileLayer) -> Layer {
		Layer {
			name: layer.name.clone(),
			version: layer.version,
			extent: layer.extent,
			features: layer.to_features(),
		}
	}
}

/// All layers of one tile, ordered by name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Layers(pub Vec<Layer>);

impl Layers {
	#[must_use]
	pub fn from_feature_collections(collections: BTreeMap<String, GeoCollection>) -> Layers {
		Layers(
			collections
				.into_iter()
				.map(|(name, collection)| Layer::new(name, collection))
				.collect(),
		)
	}

	#[must_use]
	#[allow(clippy::wrong_self_convention)]
	pub fn to_feature_collections(self) -> BTreeMap<String, GeoCollection> {
		self
			.0
			.into_iter()
			.map(|layer| (layer.name, GeoCollection::from(layer.features)))
			.collect()
	}

	pub fn iter(&self) -> impl Iterator<Item = &Layer> {
		self.0.iter()
	}

	pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Layer> {
		self.0.iter_mut()
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// True iff no layer holds any feature.
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.iter().all(Layer::is_empty)
	}

	pub fn set_extent(&mut self, extent: u32) {
		self.iter_mut().for_each(|layer| layer.extent = extent);
	}

	pub fn project_to_tile(&mut self, coord: &TileCoord) -> Result<()> {
		self.iter_mut().try_for_each(|layer| layer.project_to_tile(coord))
	}

	pub fn project_to_wgs84(&mut self, coord: &TileCoord) -> Result<()> {
		self.iter_mut().try_for_each(|layer| layer.project_to_wgs84(coord))
	}

	pub fn remove_data_outside_buffer(&mut self, buffered: &Bound) {
		self.iter_mut().for_each(|layer| layer.remove_data_outside_buffer(buffered));
	}

	pub fn clip(&mut self, bound: &Bound) {
		self.iter_mut().for_each(|layer| layer.clip(bound));
	}

	pub fn simplify(&mut self, simplifier: &mut impl Simplifier) {
		for layer in self.iter_mut() {
			layer.simplify(simplifier);
		}
	}

	/// Runs the overlap pass on the layer called `layer_name`, and only from `min_zoom` upwards.
	pub fn remove_overlap_triangles(
		&mut self,
		layer_name: &str,
		zoom: u8,
		min_zoom: u8,
		predicate: &impl TriangleOverlap,
	) {
		if zoom < min_zoom {
			return;
		}
		self
			.iter_mut()
			.filter(|layer| layer.name == layer_name)
			.for_each(|layer| layer.remove_overlap_triangles(predicate));
	}

	pub fn to_vector_tile(&self) -> Result<VectorTile> {
		Ok(VectorTile::new(
			self.iter().map(Layer::to_vector_tile_layer).collect::<Result<Vec<_>>>()?,
		))
	}

	#[must_use]
	pub fn from_vector_tile(tile: &VectorTile) -> Layers {
		Layers(tile.layers.iter().map(Layer::from_vector_tile_layer).collect())
	}

	pub fn marshal(&self) -> Result<Blob> {
		self.to_vector_tile()?.to_blob().context("Failed to encode tile")
	}

	pub fn marshal_gzipped(&self) -> Result<Blob> {
		compress_gzip(&self.marshal()?)
	}

	pub fn unmarshal(blob: &Blob) -> Result<Layers> {
		Ok(Layers::from_vector_tile(
			&VectorTile::from_blob(blob).context("Failed to decode tile")?,
		))
	}

	pub fn unmarshal_gzipped(blob: &Blob) -> Result<Layers> {
		Layers::unmarshal(&decompress_gzip(blob).context("Failed to decompress tile")?)
	}
}
