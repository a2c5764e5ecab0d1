use crate::{Layers, PipelineConfig, TileSpec};
use anyhow::{Context, Result, anyhow};
use futures::{StreamExt, stream};
use itertools::Itertools;
use log::debug;
use std::{collections::BTreeMap, sync::Arc};
use tilecut_core::{Blob, ConcurrencyLimits, TileCoord};
use tilecut_geometry::{GeoCollection, math::RelateOverlap, simplify::DouglasPeucker, vector_tile::VectorTile};

/// Renders feature collections into vector tiles.
#[derive(Clone, Debug)]
pub struct TileRenderer {
	config: PipelineConfig,
	concurrency: usize,
}

impl TileRenderer {
	#[must_use]
	pub fn new(config: PipelineConfig) -> TileRenderer {
		TileRenderer {
			config,
			concurrency: ConcurrencyLimits::default().cpu_bound,
		}
	}

	#[must_use]
	pub fn with_concurrency(mut self, concurrency: usize) -> TileRenderer {
		self.concurrency = concurrency.max(1);
		self
	}

	#[must_use]
	pub fn config(&self) -> &PipelineConfig {
		&self.config
	}

	/// Renders one tile: project, cull, clip, simplify, dedup, encode.
	///
	/// Every collection becomes a layer of the same name. Returns `None` if no
	/// layer has a feature left inside the tile.
	pub fn render(&self, coord: &TileCoord, collections: &BTreeMap<String, GeoCollection>) -> Result<Option<Blob>> {
		let tile = TileSpec::new(*coord, &self.config);

		let mut layers = Layers::from_feature_collections(collections.clone());
		layers.set_extent(tile.extent);
		layers
			.project_to_tile(coord)
			.with_context(|| format!("Failed to project tile {coord}"))?;
		layers.remove_data_outside_buffer(&tile.buffered_bound());
		layers.clip(&tile.bound());

		let threshold = tile.simplify_threshold();
		if threshold > 0.0 {
			layers.simplify(&mut DouglasPeucker::new(threshold));
		}

		if let Some(dedup) = &self.config.dedup {
			layers.remove_overlap_triangles(&dedup.layer, coord.level, dedup.min_zoom, &RelateOverlap);
		}

		if layers.is_empty() {
			debug!("tile {coord} is empty");
			return Ok(None);
		}

		let blob = if self.config.gzip {
			layers.marshal_gzipped()
		} else {
			layers.marshal()
		}
		.with_context(|| format!("Failed to encode tile {coord}"))?;
		debug!(
			"tile {coord}: {} bytes, {}",
			blob.len(),
			layers.iter().map(|l| format!("{}: {}", l.name, l.len())).join(", ")
		);
		Ok(Some(blob))
	}

	/// Renders many tiles in parallel on the blocking thread pool.
	///
	/// Empty tiles are left out. The result is sorted by tile coordinate.
	pub async fn render_many(
		&self,
		coords: Vec<TileCoord>,
		collections: Arc<BTreeMap<String, GeoCollection>>,
	) -> Result<Vec<(TileCoord, Blob)>> {
		let results: Vec<Result<Option<(TileCoord, Blob)>>> = stream::iter(coords)
			.map(|coord| {
				let renderer = self.clone();
				let collections = Arc::clone(&collections);
				tokio::task::spawn_blocking(move || {
					renderer
						.render(&coord, &collections)
						.map(|blob| blob.map(|blob| (coord, blob)))
				})
			})
			.buffer_unordered(self.concurrency)
			.map(|joined| match joined {
				Ok(result) => result,
				Err(e) => Err(anyhow!("spawn_blocking failed: {e}")),
			})
			.collect()
			.await;

		let mut tiles = results
			.into_iter()
			.filter_map(Result::transpose)
			.collect::<Result<Vec<_>>>()?;
		tiles.sort_by_key(|(coord, _)| *coord);
		Ok(tiles)
	}

	/// Decodes a tile, gzipped or not, and projects it back to WGS84.
	pub fn inspect(&self, coord: &TileCoord, blob: &Blob) -> Result<BTreeMap<String, GeoCollection>> {
		let tile = VectorTile::from_blob_auto(blob).with_context(|| format!("Failed to decode tile {coord}"))?;
		let mut layers = Layers::from_vector_tile(&tile);
		layers.project_to_wgs84(coord)?;
		Ok(layers.to_feature_collections())
	}
}

impl Default for TileRenderer {
	fn default() -> Self {
		TileRenderer::new(PipelineConfig::default())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::DedupConfig;
	use approx::assert_abs_diff_eq;
	use tilecut_core::compression::is_gzip;
	use tilecut_geometry::{GeoFeature, Geometry, GeometryTrait};

	/// A line across tile 1/0/0, a point in tile 1/1/1 and nothing in 1/0/1 or 1/1/0.
	fn collections() -> BTreeMap<String, GeoCollection> {
		let mut line = GeoFeature::new(Geometry::new_line_string(&[[-170.0, 60.0], [-10.0, 20.0]]));
		line.set_id(1);
		line.set_property("kind", "road");
		let mut point = GeoFeature::new(Geometry::new_point([90.0, -45.0]));
		point.set_id(2);

		BTreeMap::from([
			("roads".to_string(), GeoCollection::from(vec![line])),
			("pois".to_string(), GeoCollection::from(vec![point])),
		])
	}

	fn coord(level: u8, x: u32, y: u32) -> TileCoord {
		TileCoord::new(level, x, y).unwrap()
	}

	fn config() -> PipelineConfig {
		PipelineConfig {
			buffer: 0.0,
			..PipelineConfig::default()
		}
	}

	#[test]
	fn render_and_inspect() -> Result<()> {
		let renderer = TileRenderer::new(config());
		let c = coord(1, 0, 0);
		let blob = renderer.render(&c, &collections())?.expect("tile must not be empty");
		assert!(is_gzip(&blob));

		let decoded = renderer.inspect(&c, &blob)?;
		assert_eq!(decoded.len(), 2);
		assert!(decoded["pois"].is_empty());
		let roads = &decoded["roads"];
		assert_eq!(roads.len(), 1);
		assert_eq!(roads.features[0].id, Some(1));

		let bound = roads.features[0].geometry.compute_bounds().unwrap();
		assert_abs_diff_eq!(bound.min.x(), -170.0, epsilon = 0.1);
		assert_abs_diff_eq!(bound.max.x(), -10.0, epsilon = 0.1);
		assert_abs_diff_eq!(bound.max.y(), 60.0, epsilon = 0.1);
		Ok(())
	}

	#[test]
	fn render_empty_tile() -> Result<()> {
		let renderer = TileRenderer::new(config());
		assert!(renderer.render(&coord(1, 0, 1), &collections())?.is_none());
		assert!(renderer.render(&coord(1, 1, 1), &BTreeMap::new())?.is_none());
		Ok(())
	}

	#[test]
	fn render_keeps_line_reaching_far_beyond_tile() -> Result<()> {
		let line = GeoFeature::new(Geometry::new_line_string(&[[-170.0, 45.0], [170.0, 45.0]]));
		let collections = BTreeMap::from([("lines".to_string(), GeoCollection::from(vec![line]))]);
		let renderer = TileRenderer::default();
		let c = coord(4, 8, 5);

		let blob = renderer.render(&c, &collections)?.expect("tile must not be empty");
		let lines = &renderer.inspect(&c, &blob)?["lines"];
		assert_eq!(lines.len(), 1);
		let bound = lines.features[0].geometry.compute_bounds().unwrap();
		assert_abs_diff_eq!(bound.min.x(), 0.0, epsilon = 0.1);
		assert_abs_diff_eq!(bound.max.x(), 22.5, epsilon = 0.1);
		assert_abs_diff_eq!(bound.min.y(), 45.0, epsilon = 0.1);
		Ok(())
	}

	#[test]
	fn render_without_gzip() -> Result<()> {
		let renderer = TileRenderer::new(PipelineConfig {
			gzip: false,
			..config()
		});
		let blob = renderer.render(&coord(1, 1, 1), &collections())?.expect("tile must not be empty");
		assert!(!is_gzip(&blob));
		let tile = Layers::unmarshal(&blob)?;
		let pois = tile.iter().find(|l| l.name == "pois").expect("layer pois");
		assert_eq!(pois.len(), 1);
		assert_eq!(pois.extent, 4096);
		Ok(())
	}

	#[test]
	fn render_with_small_extent() -> Result<()> {
		let renderer = TileRenderer::new(PipelineConfig {
			extent: 256,
			gzip: false,
			..config()
		});
		let blob = renderer.render(&coord(1, 1, 1), &collections())?.expect("tile must not be empty");
		let pois = Layers::unmarshal(&blob)?;
		let layer = pois.iter().find(|l| l.name == "pois").expect("layer pois");
		assert_eq!(layer.extent, 256);
		let Geometry::Point(p) = &layer.features[0].geometry else {
			panic!("expected a point");
		};
		assert!(p.x() >= 0.0 && p.x() <= 256.0);
		assert!(p.y() >= 0.0 && p.y() <= 256.0);
		Ok(())
	}

	#[test]
	fn render_with_dedup() -> Result<()> {
		let triangle = |id: u64, c: [[f64; 2]; 3]| {
			let mut f = GeoFeature::new(Geometry::new_polygon(&[vec![c[0], c[1], c[2], c[0]]]));
			f.set_id(id);
			f
		};
		let mesh = GeoCollection::from(vec![
			triangle(1, [[0.001, 0.001], [0.004, 0.001], [0.001, 0.004]]),
			triangle(2, [[0.002, 0.002], [0.003, 0.0015], [0.0015, 0.003]]),
		]);
		let collections = BTreeMap::from([("mesh".to_string(), mesh)]);
		let c = coord(14, 8192, 8191);

		let without = TileRenderer::new(PipelineConfig {
			tolerance: 0.0,
			..config()
		});
		let with = TileRenderer::new(PipelineConfig {
			tolerance: 0.0,
			dedup: Some(DedupConfig {
				layer: "mesh".to_string(),
				min_zoom: 14,
			}),
			..config()
		});

		let count = |renderer: &TileRenderer| -> Result<usize> {
			let blob = renderer.render(&c, &collections)?.expect("tile must not be empty");
			Ok(renderer.inspect(&c, &blob)?["mesh"].len())
		};
		assert_eq!(count(&without)?, 2);
		assert_eq!(count(&with)?, 1);
		Ok(())
	}

	#[tokio::test(flavor = "multi_thread")]
	async fn render_many_skips_empty_tiles() -> Result<()> {
		let renderer = TileRenderer::new(config()).with_concurrency(2);
		let coords = vec![coord(1, 1, 1), coord(1, 0, 1), coord(1, 0, 0), coord(1, 1, 0)];
		let tiles = renderer.render_many(coords, Arc::new(collections())).await?;
		let rendered: Vec<TileCoord> = tiles.iter().map(|(c, _)| *c).collect();
		assert_eq!(rendered, vec![coord(1, 0, 0), coord(1, 1, 1)]);
		for (c, blob) in &tiles {
			assert_eq!(blob, &renderer.render(c, &collections())?.unwrap());
		}
		Ok(())
	}

	#[test]
	fn inspect_rejects_garbage() {
		let renderer = TileRenderer::default();
		assert!(renderer.inspect(&coord(0, 0, 0), &Blob::from(&[0x1A, 0x10, 0x0A])).is_err());
	}
}
