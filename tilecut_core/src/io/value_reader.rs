// The `ValueReader` trait reads the primitive encodings a vector tile is built from:
// varints, zigzag varints, little-endian fixed-width floats and length-delimited
// protobuf fields. Implementations only provide the cursor plumbing; every decoder
// lives in the provided methods.
//
// # Examples
//
// ```rust
// use tilecut_core::io::{ValueReader, ValueReaderSlice};
//
// let mut reader = ValueReaderSlice::new_le(&[0x0a, 0x02, 0x68, 0x69]);
// assert_eq!(reader.read_pbf_key()?, (1, 2));
// assert_eq!(reader.read_pbf_string()?, "hi");
// ```

use crate::Blob;
use anyhow::{Context, Result, bail};
use byteorder::{ByteOrder, ReadBytesExt};
use std::io::{Read, Seek};

/// Alias for readers that can seek, used as the trait object behind every `ValueReader`.
pub trait SeekRead: Seek + Read {}

/// A trait for reading values from a byte source with a fixed byte order.
pub trait ValueReader<'a, E: ByteOrder + 'a> {
	/// Returns the underlying reader to access raw bytes.
	fn get_reader(&mut self) -> &mut dyn SeekRead;

	/// Returns the total length of the readable data.
	fn len(&self) -> u64;

	/// Returns the current position within the readable data.
	fn position(&mut self) -> u64;

	/// Sets the current position within the readable data.
	///
	/// # Errors
	/// Returns an error if the position lies outside the data.
	fn set_position(&mut self, position: u64) -> Result<()>;

	fn is_empty(&self) -> bool {
		self.len() == 0
	}

	fn remaining(&mut self) -> u64 {
		self.len().saturating_sub(self.position())
	}

	fn has_remaining(&mut self) -> bool {
		self.remaining() > 0
	}

	/// Reads a variable-length unsigned integer (varint).
	///
	/// # Errors
	/// Returns an error if the data ends early or the varint is longer than 10 bytes.
	fn read_varint(&mut self) -> Result<u64> {
		let mut value = 0;
		let mut shift = 0;
		loop {
			let byte = self.get_reader().read_u8()?;
			value |= (u64::from(byte) & 0x7F) << shift;
			if byte & 0x80 == 0 {
				break;
			}
			shift += 7;
			if shift >= 70 {
				bail!("Varint too long");
			}
		}
		Ok(value)
	}

	/// Reads a zigzag-encoded varint.
	fn read_svarint(&mut self) -> Result<i64> {
		let sint_value = self.read_varint()? as i64;
		Ok((sint_value >> 1) ^ -(sint_value & 1))
	}

	fn read_f32(&mut self) -> Result<f32> {
		Ok(self.get_reader().read_f32::<E>()?)
	}

	fn read_f64(&mut self) -> Result<f64> {
		Ok(self.get_reader().read_f64::<E>()?)
	}

	fn read_u8(&mut self) -> Result<u8> {
		Ok(self.get_reader().read_u8()?)
	}

	/// Reads `length` raw bytes.
	fn read_blob(&mut self, length: u64) -> Result<Blob> {
		if length > self.remaining() {
			bail!("Requested {length} bytes, but only {} remain", self.remaining());
		}
		let mut blob = Blob::new_sized(length as usize);
		self.get_reader().read_exact(blob.as_mut_slice())?;
		Ok(blob)
	}

	/// Reads `length` bytes as UTF-8.
	fn read_string(&mut self, length: u64) -> Result<String> {
		let blob = self.read_blob(length)?;
		Ok(String::from_utf8(blob.into_vec())?)
	}

	/// Reads a protobuf key and splits it into `(field_number, wire_type)`.
	fn read_pbf_key(&mut self) -> Result<(u32, u8)> {
		let value = self.read_varint().context("Failed to read varint for PBF key")?;
		Ok(((value >> 3) as u32, (value & 0x07) as u8))
	}

	/// Returns a sub-reader limited to the next `length` bytes and advances past them.
	fn get_sub_reader<'b>(&'b mut self, length: u64) -> Result<Box<dyn ValueReader<'b, E> + 'b>>
	where
		E: 'b;

	/// Reads a length prefix and returns a sub-reader over the embedded message.
	fn get_pbf_sub_reader<'b>(&'b mut self) -> Result<Box<dyn ValueReader<'b, E> + 'b>>
	where
		E: 'b,
	{
		let length = self
			.read_varint()
			.context("Failed to read varint for sub-reader length")?;
		self.get_sub_reader(length).context("Failed to get sub-reader")
	}

	/// Reads a packed repeated `uint32` field.
	fn read_pbf_packed_uint32(&mut self) -> Result<Vec<u32>> {
		let mut reader = self
			.get_pbf_sub_reader()
			.context("Failed to get PBF sub-reader for packed uint32")?;
		let mut values = Vec::new();
		while reader.has_remaining() {
			let value = reader
				.read_varint()
				.context("Failed to read varint for packed uint32")?;
			values.push(u32::try_from(value).context("packed uint32 value out of range")?);
		}
		drop(reader);
		Ok(values)
	}

	fn read_pbf_string(&mut self) -> Result<String> {
		let length = self.read_varint().context("Failed to read varint for string length")?;
		self.read_string(length).context("Failed to read PBF string")
	}

	fn read_pbf_blob(&mut self) -> Result<Blob> {
		let length = self.read_varint().context("Failed to read varint for blob length")?;
		self.read_blob(length).context("Failed to read PBF blob")
	}

	/// Skips the value of a field whose key has just been read.
	///
	/// # Errors
	/// Returns an error for the deprecated group wire types 3 and 4 or unknown wire types.
	fn skip_pbf_field(&mut self, wire_type: u8) -> Result<()> {
		let skip = match wire_type {
			0 => {
				self.read_varint()?;
				return Ok(());
			}
			1 => 8,
			2 => self.read_varint().context("Failed to read length of skipped field")?,
			5 => 4,
			_ => bail!("Unsupported wire type ({wire_type})"),
		};
		let target = self.position() + skip;
		if target > self.len() {
			bail!("Skipped field runs past the end of the data");
		}
		self.set_position(target)
	}
}
