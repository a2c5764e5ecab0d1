//! Gzip framing for encoded tiles.
//!
//! Vector tiles are commonly stored and served gzip-compressed, so the codec
//! accepts and produces both forms.

use crate::Blob;
use anyhow::{Context, Result};
use flate2::bufread::{GzDecoder, GzEncoder};
use std::io::Read;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Compresses data using Gzip with the highest compression level.
pub fn compress_gzip(blob: &Blob) -> Result<Blob> {
	let mut encoder = GzEncoder::new(blob.as_slice(), flate2::Compression::best());
	let mut compressed_data = Vec::new();
	encoder
		.read_to_end(&mut compressed_data)
		.with_context(|| format!("Failed to compress {} bytes using Gzip", blob.len()))?;
	Ok(Blob::from(compressed_data))
}

/// Decompresses Gzip data.
pub fn decompress_gzip(blob: &Blob) -> Result<Blob> {
	let mut decoder = GzDecoder::new(blob.as_slice());
	let mut decompressed_data = Vec::new();
	decoder
		.read_to_end(&mut decompressed_data)
		.with_context(|| format!("Failed to decompress {} bytes using Gzip", blob.len()))?;
	Ok(Blob::from(decompressed_data))
}

/// Returns true if the blob starts with the gzip magic bytes.
#[must_use]
pub fn is_gzip(blob: &Blob) -> bool {
	blob.as_slice().starts_with(&GZIP_MAGIC)
}
