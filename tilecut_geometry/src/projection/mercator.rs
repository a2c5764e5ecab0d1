use crate::Coordinates;
use anyhow::{Result, ensure};
use std::f64::consts::PI;

/// WGS84 semi-major axis in metres, the sphere radius of web mercator (EPSG:3857).
pub const EARTH_RADIUS: f64 = 6_378_137.0;

const EARTH_RADIUS_PI: f64 = EARTH_RADIUS * PI;

/// Projects longitude/latitude in degrees onto the planar grid of zoom `z`, where
/// the world spans `2^z` units on both axes and y grows towards the south.
#[must_use]
pub fn to_planar(lon: f64, lat: f64, z: u32) -> (f64, f64) {
	let scale = 2f64.powi(z as i32);
	let x = (lon + 180.0) / 360.0 * scale;
	let lat = lat.to_radians();
	let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0 * scale;
	(x, y)
}

/// Inverse of [`to_planar`].
#[must_use]
pub fn to_geo(x: f64, y: f64, z: u32) -> (f64, f64) {
	let scale = 2f64.powi(z as i32);
	let lon = x / scale * 360.0 - 180.0;
	let n = PI * (1.0 - 2.0 * y / scale);
	let lat = n.sinh().atan().to_degrees();
	(lon, lat)
}

/// Projects WGS84 degrees to web mercator metres. Latitudes beyond the mercator
/// limit are clamped to `±πR`.
#[must_use]
pub fn wgs84_to_mercator(c: Coordinates) -> Coordinates {
	let y = ((90.0 + c.y()) * PI / 360.0).tan().ln() * EARTH_RADIUS;
	Coordinates::new(
		EARTH_RADIUS_PI / 180.0 * c.x(),
		y.clamp(-EARTH_RADIUS_PI, EARTH_RADIUS_PI),
	)
}

#[must_use]
pub fn mercator_to_wgs84(c: Coordinates) -> Coordinates {
	Coordinates::new(
		180.0 * c.x() / EARTH_RADIUS_PI,
		(2.0 * (c.y() / EARTH_RADIUS).exp().atan() - PI / 2.0).to_degrees(),
	)
}

/// Returns the mercator scale factor at latitude `lat` (degrees).
///
/// # Errors
/// Returns an error if `lat` is outside `[-90, 90]`.
pub fn mercator_scale_factor(lat: f64) -> Result<f64> {
	ensure!((-90.0..=90.0).contains(&lat), "latitude out of range, given {lat}");
	Ok(1.0 / lat.to_radians().cos())
}

#[cfg(test)]
mod tests {
	use super::*;
	use approx::assert_abs_diff_eq;
	use rstest::rstest;

	#[rstest]
	#[case(0.0, 0.0, 0, 0.5, 0.5)]
	#[case(-180.0, 85.051_128_779_806_59, 0, 0.0, 0.0)]
	#[case(180.0, -85.051_128_779_806_59, 1, 2.0, 2.0)]
	#[case(90.0, 0.0, 2, 3.0, 2.0)]
	fn test_to_planar(#[case] lon: f64, #[case] lat: f64, #[case] z: u32, #[case] x: f64, #[case] y: f64) {
		let (px, py) = to_planar(lon, lat, z);
		assert_abs_diff_eq!(px, x, epsilon = 1e-9);
		assert_abs_diff_eq!(py, y, epsilon = 1e-9);
	}

	#[test]
	fn test_planar_round_trip() {
		for (lon, lat) in [(13.4, 52.5), (-122.4, 37.8), (151.2, -33.9)] {
			let (x, y) = to_planar(lon, lat, 14);
			let (lon2, lat2) = to_geo(x, y, 14);
			assert_abs_diff_eq!(lon, lon2, epsilon = 1e-9);
			assert_abs_diff_eq!(lat, lat2, epsilon = 1e-9);
		}
	}

	#[test]
	fn test_mercator_round_trip() {
		let c = Coordinates::new(-71.1, 42.3);
		let m = wgs84_to_mercator(c);
		assert_abs_diff_eq!(m.x(), -7_914_815.795, epsilon = 0.01);
		let back = mercator_to_wgs84(m);
		assert_abs_diff_eq!(back.x(), c.x(), epsilon = 1e-9);
		assert_abs_diff_eq!(back.y(), c.y(), epsilon = 1e-9);
	}

	#[test]
	fn test_mercator_clamps_poles() {
		assert_abs_diff_eq!(wgs84_to_mercator(Coordinates::new(0.0, 90.0)).y(), EARTH_RADIUS_PI);
		assert_abs_diff_eq!(wgs84_to_mercator(Coordinates::new(0.0, -90.0)).y(), -EARTH_RADIUS_PI);
	}

	#[test]
	fn test_mercator_scale_factor() -> Result<()> {
		assert_abs_diff_eq!(mercator_scale_factor(0.0)?, 1.0);
		assert_abs_diff_eq!(mercator_scale_factor(60.0)?, 2.0, epsilon = 1e-12);
		assert!(mercator_scale_factor(90.5).is_err());
		assert!(mercator_scale_factor(-91.0).is_err());
		Ok(())
	}
}
