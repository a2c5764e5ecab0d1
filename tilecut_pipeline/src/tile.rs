use crate::PipelineConfig;
use anyhow::Result;
use tilecut_core::TileCoord;
use tilecut_geometry::{
	Bound,
	projection::{TileProjection, mercator::to_geo},
};

/// Zoom level at which simplification is switched off.
const MAX_ZOOM: u8 = 22;

/// One tile to render: its address plus the grid it is rendered on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileSpec {
	pub coord: TileCoord,
	pub extent: u32,
	pub buffer: f64,
	pub tolerance: f64,
}

impl TileSpec {
	#[must_use]
	pub fn new(coord: TileCoord, config: &PipelineConfig) -> TileSpec {
		TileSpec {
			coord,
			extent: config.extent,
			buffer: config.buffer,
			tolerance: config.tolerance,
		}
	}

	/// The tile itself in tile units: `(0,0)-(extent,extent)`.
	#[must_use]
	pub fn bound(&self) -> Bound {
		let e = f64::from(self.extent);
		Bound::new([0.0, 0.0], [e, e])
	}

	#[must_use]
	pub fn buffered_bound(&self) -> Bound {
		self.bound().buffered(self.buffer)
	}

	/// Geographic box of the tile, grown by `tile_buffer` whole tiles on every side.
	///
	/// Rows are clamped to the grid, columns are not, so a buffered box may reach
	/// past ±180° longitude.
	#[must_use]
	pub fn geo_bound(&self, tile_buffer: f64) -> Bound {
		let zoom = u32::from(self.coord.level);
		let x = f64::from(self.coord.x);
		let y = f64::from(self.coord.y);
		let rows = self.coord.grid_size() as f64;

		let (lon1, lat1) = to_geo(x - tile_buffer, (y - tile_buffer).max(0.0), zoom);
		let (lon2, lat2) = to_geo(x + 1.0 + tile_buffer, (y + 1.0 + tile_buffer).min(rows), zoom);
		Bound::new([lon1, lat2], [lon2, lat1])
	}

	pub fn projection(&self) -> Result<TileProjection> {
		TileProjection::new(&self.coord, self.extent)
	}

	/// Douglas-Peucker threshold for this tile. 0 means "do not simplify".
	#[must_use]
	pub fn simplify_threshold(&self) -> f64 {
		if self.coord.level >= MAX_ZOOM || self.tolerance <= 0.0 {
			0.0
		} else {
			self.tolerance
		}
	}
}
