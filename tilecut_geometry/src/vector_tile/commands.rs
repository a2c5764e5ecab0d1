//! The geometry command stream of a vector tile feature.
//!
//! A stream is a flat list of `u32` words. Command words pack a command id and a
//! repeat count as `count << 3 | id`; each coordinate that follows is a pair of
//! zigzag-encoded deltas against the previous point of the same feature.
//!
//! See <https://github.com/mapbox/vector-tile-spec/blob/master/2.1/README.md#43-geometry-encoding>.

use super::{CodecError, GeomType};
use crate::geo::*;
use log::trace;
use std::mem::take;

const MOVE_TO: u32 = 1;
const LINE_TO: u32 = 2;
const CLOSE_PATH: u32 = 7;

#[must_use]
pub fn zigzag_encode(n: i32) -> u32 {
	((n << 1) ^ (n >> 31)) as u32
}

#[must_use]
pub fn zigzag_decode(v: u32) -> i32 {
	((v >> 1) as i32) ^ -((v & 1) as i32)
}

#[must_use]
pub fn command_word(id: u32, count: usize) -> u32 {
	((count as u32) << 3) | id
}

/// Encodes a geometry into its wire type and command stream.
///
/// Coordinates are truncated to integers; callers that need exact positions
/// must round to tile units first.
pub fn encode_geometry(geometry: &Geometry) -> Result<(GeomType, Vec<u32>), CodecError> {
	let geom_type = GeomType::try_from(geometry)?;
	let mut encoder = GeometryEncoder::default();

	match geometry {
		Geometry::Point(g) => encoder.move_to(&[g.0]),
		Geometry::MultiPoint(g) => {
			if !g.is_empty() {
				let points: Vec<Coordinates> = g.0.iter().map(|p| p.0).collect();
				encoder.move_to(&points);
			}
		}
		Geometry::LineString(g) => encoder.line(&g.0),
		Geometry::MultiLineString(g) => g.0.iter().for_each(|l| encoder.line(&l.0)),
		Geometry::Ring(g) => encoder.ring(g),
		Geometry::Polygon(g) => g.0.iter().for_each(|r| encoder.ring(r)),
		Geometry::MultiPolygon(g) => g.0.iter().flat_map(|p| p.0.iter()).for_each(|r| encoder.ring(r)),
		Geometry::Collection(_) => {
			return Err(CodecError::UnsupportedGeometryType(geometry.type_name().to_string()));
		}
	}

	trace!("encoded {} into {} words", geometry.type_name(), encoder.data.len());
	Ok((geom_type, encoder.data))
}

/// Decodes a command stream of the given wire type.
pub fn decode_geometry(geom_type: GeomType, data: &[u32]) -> Result<Geometry, CodecError> {
	if data.len() < 2 {
		return Err(CodecError::TruncatedData {
			needed: 2,
			available: data.len(),
		});
	}

	let mut decoder = GeometryDecoder::new(data);
	match geom_type {
		GeomType::Point => decoder.decode_point(),
		GeomType::LineString => decoder.decode_line_string(),
		GeomType::Polygon => decoder.decode_polygon(),
		GeomType::Unknown => Err(CodecError::UnsupportedGeometryType(String::from("Unknown"))),
	}
}

/// Appends commands for one feature. The delta cursor is shared by every part
/// of the feature and never reset between rings.
#[derive(Default)]
struct GeometryEncoder {
	prev_x: i32,
	prev_y: i32,
	data: Vec<u32>,
}

impl GeometryEncoder {
	fn move_to(&mut self, points: &[Coordinates]) {
		self.data.push(command_word(MOVE_TO, points.len()));
		self.add_points(points);
	}

	fn line_to(&mut self, points: &[Coordinates]) {
		self.data.push(command_word(LINE_TO, points.len()));
		self.add_points(points);
	}

	fn close_path(&mut self) {
		self.data.push(command_word(CLOSE_PATH, 1));
	}

	fn add_points(&mut self, points: &[Coordinates]) {
		for point in points {
			let x = point.x() as i32;
			let y = point.y() as i32;
			self.data.push(zigzag_encode(x.wrapping_sub(self.prev_x)));
			self.data.push(zigzag_encode(y.wrapping_sub(self.prev_y)));
			self.prev_x = x;
			self.prev_y = y;
		}
	}

	fn line(&mut self, coordinates: &[Coordinates]) {
		let Some((first, rest)) = coordinates.split_first() else {
			return;
		};
		self.move_to(std::slice::from_ref(first));
		self.line_to(rest);
	}

	fn ring(&mut self, ring: &RingGeometry) {
		let Some((first, rest)) = ring.0.split_first() else {
			return;
		};
		let rest = if ring.is_closed() {
			&rest[..rest.len() - 1]
		} else {
			rest
		};
		self.move_to(std::slice::from_ref(first));
		self.line_to(rest);
		self.close_path();
	}
}

struct GeometryDecoder<'a> {
	data: &'a [u32],
	index: usize,
	x: i32,
	y: i32,
}

impl<'a> GeometryDecoder<'a> {
	fn new(data: &'a [u32]) -> Self {
		Self {
			data,
			index: 0,
			x: 0,
			y: 0,
		}
	}

	fn done(&self) -> bool {
		self.index >= self.data.len()
	}

	fn remaining(&self) -> usize {
		self.data.len().saturating_sub(self.index)
	}

	/// Reads a command word and checks that the coordinates it announces are present.
	fn next_command(&mut self) -> Result<(u32, usize), CodecError> {
		let Some(&word) = self.data.get(self.index) else {
			return Err(CodecError::TruncatedData {
				needed: 1,
				available: 0,
			});
		};
		self.index += 1;

		let id = word & 0x7;
		let count = (word >> 3) as usize;
		if id != CLOSE_PATH && 2 * count > self.remaining() {
			return Err(CodecError::TruncatedData {
				needed: 2 * count,
				available: self.remaining(),
			});
		}
		Ok((id, count))
	}

	fn next_point(&mut self) -> Result<Coordinates, CodecError> {
		let (Some(&dx), Some(&dy)) = (self.data.get(self.index), self.data.get(self.index + 1)) else {
			return Err(CodecError::TruncatedData {
				needed: 2,
				available: self.remaining(),
			});
		};
		self.index += 2;
		self.x = self.x.wrapping_add(zigzag_decode(dx));
		self.y = self.y.wrapping_add(zigzag_decode(dy));
		Ok(Coordinates::new(f64::from(self.x), f64::from(self.y)))
	}

	fn next_points(&mut self, count: usize) -> Result<Vec<Coordinates>, CodecError> {
		(0..count).map(|_| self.next_point()).collect()
	}

	fn decode_point(&mut self) -> Result<Geometry, CodecError> {
		let (id, count) = self.next_command()?;
		if id != MOVE_TO {
			return Err(CodecError::ProtocolViolation(format!(
				"point geometry must start with moveTo, found command {id}"
			)));
		}

		let mut points = self.next_points(count)?;
		if points.len() == 1 {
			if let Some(point) = points.pop() {
				return Ok(Geometry::Point(PointGeometry(point)));
			}
		}
		Ok(Geometry::MultiPoint(MultiPointGeometry(
			points.into_iter().map(PointGeometry).collect(),
		)))
	}

	/// Reads one `MoveTo(1)` followed by one `LineTo(n)`.
	fn decode_line(&mut self) -> Result<Vec<Coordinates>, CodecError> {
		let (id, count) = self.next_command()?;
		if id != MOVE_TO || count != 1 {
			return Err(CodecError::ProtocolViolation(String::from("first command not one moveTo")));
		}
		let first = self.next_point()?;

		let (id, count) = self.next_command()?;
		if id != LINE_TO {
			return Err(CodecError::ProtocolViolation(String::from("second command not a lineTo")));
		}

		let mut line = Vec::with_capacity(count + 1);
		line.push(first);
		line.extend(self.next_points(count)?);
		Ok(line)
	}

	fn decode_line_string(&mut self) -> Result<Geometry, CodecError> {
		let mut lines = Vec::new();
		while !self.done() {
			let line = self.decode_line()?;
			if self.done() && lines.is_empty() {
				return Ok(Geometry::LineString(LineStringGeometry(line)));
			}
			lines.push(LineStringGeometry(line));
		}
		Ok(Geometry::MultiLineString(MultiLineStringGeometry(lines)))
	}

	/// Rings with a positive signed area open a new polygon, all others are holes
	/// of the current one. The very first ring always opens a polygon.
	fn decode_polygon(&mut self) -> Result<Geometry, CodecError> {
		let mut polygons: Vec<PolygonGeometry> = Vec::new();
		let mut current: Vec<RingGeometry> = Vec::new();

		while !self.done() {
			let mut ring = RingGeometry(self.decode_line()?);
			if self.data.get(self.index).is_some_and(|w| w & 0x7 == CLOSE_PATH) {
				self.index += 1;
				ring.close();
			}

			if polygons.is_empty() && current.is_empty() {
				current.push(ring);
				continue;
			}

			let area = ring.signed_area();
			if area > 0.0 {
				polygons.push(PolygonGeometry(take(&mut current)));
				current.push(ring);
			} else {
				if area == 0.0 {
					trace!("ring without area treated as a hole");
				}
				current.push(ring);
			}
		}

		if polygons.is_empty() {
			return Ok(Geometry::Polygon(PolygonGeometry(current)));
		}
		polygons.push(PolygonGeometry(current));
		Ok(Geometry::MultiPolygon(MultiPolygonGeometry(polygons)))
	}
}
