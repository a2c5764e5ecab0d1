//! Tile addresses in the web mercator quadtree.
//!
//! A [`TileCoord`] names one tile by zoom level and column/row index. Besides
//! validation it offers the tile-edge helpers used to derive geographic bounds.
//!
//! # Examples
//!
//! ```
//! use tilecut_core::TileCoord;
//!
//! let coord: TileCoord = "15/8956/12223".parse().unwrap();
//! assert_eq!(coord.level, 15);
//! assert_eq!(coord.to_string(), "15/8956/12223");
//! ```

use anyhow::{Context, Result, ensure};
use std::{
	f64::consts::PI,
	fmt::{self, Debug, Display},
	str::FromStr,
};

/// A tile address: zoom `level` plus `x` (column) and `y` (row, counted from the north).
#[derive(Eq, PartialEq, Clone, Hash, Copy, PartialOrd, Ord)]
pub struct TileCoord {
	pub level: u8,
	pub x: u32,
	pub y: u32,
}

impl TileCoord {
	/// Creates a new `TileCoord`.
	///
	/// # Errors
	/// Returns an error if `level` > 31 or if `x`/`y` are outside `0..2^level`.
	pub fn new(level: u8, x: u32, y: u32) -> Result<TileCoord> {
		ensure!(level <= 31, "level ({level}) must be <= 31");
		let max = 2u64.pow(u32::from(level));
		ensure!(u64::from(x) < max, "x ({x}) out of bounds for level {level}");
		ensure!(u64::from(y) < max, "y ({y}) out of bounds for level {level}");
		Ok(TileCoord { level, x, y })
	}

	/// Longitude of the western edge of column `x` at zoom `level`.
	pub fn west_longitude(x: u32, level: u8) -> f64 {
		f64::from(x) / 2f64.powi(i32::from(level)) * 360.0 - 180.0
	}

	/// Latitude of the northern edge of row `y` at zoom `level`.
	pub fn north_latitude(y: u32, level: u8) -> f64 {
		let n = PI - 2.0 * PI * f64::from(y) / 2f64.powi(i32::from(level));
		(0.5 * (n.exp() - (-n).exp())).atan().to_degrees()
	}

	/// Returns the north-west corner of the tile as `[lon, lat]`.
	#[must_use]
	pub fn as_geo(&self) -> [f64; 2] {
		[
			TileCoord::west_longitude(self.x, self.level),
			TileCoord::north_latitude(self.y, self.level),
		]
	}

	/// Returns the geographic extent of the tile as `[west, south, east, north]`.
	#[must_use]
	pub fn geo_bounds(&self) -> [f64; 4] {
		[
			TileCoord::west_longitude(self.x, self.level),
			TileCoord::north_latitude(self.y + 1, self.level),
			TileCoord::west_longitude(self.x + 1, self.level),
			TileCoord::north_latitude(self.y, self.level),
		]
	}

	/// Number of tiles along one axis at this level.
	#[must_use]
	pub fn grid_size(&self) -> u64 {
		1u64 << self.level
	}
}

impl Debug for TileCoord {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "TileCoord({}, [{}, {}])", self.level, self.x, self.y)
	}
}

impl Display for TileCoord {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}/{}/{}", self.level, self.x, self.y)
	}
}

impl FromStr for TileCoord {
	type Err = anyhow::Error;

	/// Parses the `z/x/y` notation.
	fn from_str(s: &str) -> Result<Self> {
		let parts: Vec<&str> = s.trim().split('/').collect();
		ensure!(parts.len() == 3, "tile '{s}' must have the form z/x/y");
		let level = parts[0].parse::<u8>().with_context(|| format!("invalid zoom in tile '{s}'"))?;
		let x = parts[1].parse::<u32>().with_context(|| format!("invalid x in tile '{s}'"))?;
		let y = parts[2].parse::<u32>().with_context(|| format!("invalid y in tile '{s}'"))?;
		TileCoord::new(level, x, y)
	}
}
