use super::mercator::{to_geo, to_planar};
use crate::Coordinates;
use anyhow::{Result, ensure};
use tilecut_core::TileCoord;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Grid {
	/// The extent is `2^shift`: project at zoom `level + shift` and subtract the tile origin.
	PowerOfTwo { zoom: u32, min_x: f64, min_y: f64 },
	/// Any other extent: project at the tile's zoom and scale by the extent.
	Scaled { zoom: u32, min_x: f64, min_y: f64, extent: f64 },
}

/// The two projectors of one tile: geographic → tile units and back.
///
/// Tile units run from 0 to `extent` across the tile, y pointing south.
/// `to_tile` floors to whole units. The power-of-two path adds half a unit in
/// `to_wgs84` so that a round trip lands on the centre of the same unit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileProjection {
	grid: Grid,
}

impl TileProjection {
	/// # Errors
	/// Returns an error if `extent` is 0.
	pub fn new(coord: &TileCoord, extent: u32) -> Result<TileProjection> {
		ensure!(extent > 0, "extent must be greater than 0");
		let grid = if extent.is_power_of_two() {
			let shift = extent.trailing_zeros();
			Grid::PowerOfTwo {
				zoom: u32::from(coord.level) + shift,
				min_x: (u64::from(coord.x) << shift) as f64,
				min_y: (u64::from(coord.y) << shift) as f64,
			}
		} else {
			Self::scaled_grid(coord, extent)
		};
		Ok(TileProjection { grid })
	}

	/// Builds the projection that always takes the float-scaling path, whatever the extent.
	///
	/// # Errors
	/// Returns an error if `extent` is 0.
	pub fn new_scaled(coord: &TileCoord, extent: u32) -> Result<TileProjection> {
		ensure!(extent > 0, "extent must be greater than 0");
		Ok(TileProjection {
			grid: Self::scaled_grid(coord, extent),
		})
	}

	fn scaled_grid(coord: &TileCoord, extent: u32) -> Grid {
		Grid::Scaled {
			zoom: u32::from(coord.level),
			min_x: f64::from(coord.x),
			min_y: f64::from(coord.y),
			extent: f64::from(extent),
		}
	}

	/// Longitude/latitude in degrees → tile units.
	#[must_use]
	pub fn to_tile(&self, c: Coordinates) -> Coordinates {
		match self.grid {
			Grid::PowerOfTwo { zoom, min_x, min_y } => {
				let (x, y) = to_planar(c.x(), c.y(), zoom);
				Coordinates::new((x - min_x).floor(), (y - min_y).floor())
			}
			Grid::Scaled {
				zoom,
				min_x,
				min_y,
				extent,
			} => {
				let (x, y) = to_planar(c.x(), c.y(), zoom);
				Coordinates::new(((x - min_x) * extent).floor(), ((y - min_y) * extent).floor())
			}
		}
	}

	/// Tile units → longitude/latitude in degrees.
	#[must_use]
	pub fn to_wgs84(&self, c: Coordinates) -> Coordinates {
		let (lon, lat) = match self.grid {
			Grid::PowerOfTwo { zoom, min_x, min_y } => to_geo(c.x() + min_x + 0.5, c.y() + min_y + 0.5, zoom),
			Grid::Scaled {
				zoom,
				min_x,
				min_y,
				extent,
			} => to_geo(c.x() / extent + min_x, c.y() / extent + min_y, zoom),
		};
		Coordinates::new(lon, lat)
	}
}
