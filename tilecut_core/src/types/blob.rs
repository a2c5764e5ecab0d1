//! [`Blob`] is the byte buffer that encoded tiles travel in.
//!
//! It wraps a `Vec<u8>` and adds the handful of helpers the codec and the file
//! handling in the CLI need.
//!
//! # Examples
//!
//! ```rust
//! use tilecut_core::Blob;
//!
//! let blob = Blob::from(vec![0x1a, 0x03, 0x0a, 0x01, 0x61]);
//! assert_eq!(blob.len(), 5);
//! assert_eq!(blob.as_hex(), "1a 03 0a 01 61");
//! ```

use anyhow::{Context, Result};
use std::fmt::Debug;
use std::path::Path;

/// An owned sequence of bytes, usually an encoded (and possibly gzipped) vector tile.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Blob(Vec<u8>);

impl Blob {
	/// Creates an empty `Blob`.
	#[must_use]
	pub fn new_empty() -> Blob {
		Blob(Vec::new())
	}

	/// Creates a zero-filled `Blob` of `length` bytes.
	#[must_use]
	pub fn new_sized(length: usize) -> Blob {
		Blob(vec![0u8; length])
	}

	#[must_use]
	pub fn as_slice(&self) -> &[u8] {
		&self.0
	}

	pub fn as_mut_slice(&mut self) -> &mut [u8] {
		&mut self.0
	}

	#[must_use]
	pub fn into_vec(self) -> Vec<u8> {
		self.0
	}

	/// Returns the bytes as space separated lower-case hex pairs.
	#[must_use]
	pub fn as_hex(&self) -> String {
		self.0.iter().map(|b| format!("{b:02x}")).collect::<Vec<_>>().join(" ")
	}

	#[must_use]
	pub fn len(&self) -> u64 {
		self.0.len() as u64
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Writes the bytes to `path`, replacing any existing file.
	pub fn save_to_file(&self, path: &Path) -> Result<()> {
		std::fs::write(path, &self.0).with_context(|| format!("Failed to write {path:?}"))
	}

	/// Reads the whole file at `path` into a new `Blob`.
	pub fn load_from_file(path: &Path) -> Result<Self> {
		Ok(Blob::from(
			std::fs::read(path).with_context(|| format!("Failed to read {path:?}"))?,
		))
	}
}

impl From<Vec<u8>> for Blob {
	fn from(item: Vec<u8>) -> Self {
		Blob(item)
	}
}

impl From<&[u8]> for Blob {
	fn from(item: &[u8]) -> Self {
		Blob(item.to_vec())
	}
}

impl<const N: usize> From<&[u8; N]> for Blob {
	fn from(item: &[u8; N]) -> Self {
		Blob(item.to_vec())
	}
}

impl From<&str> for Blob {
	fn from(item: &str) -> Self {
		Blob(item.as_bytes().to_vec())
	}
}

impl From<String> for Blob {
	fn from(item: String) -> Self {
		Blob(item.into_bytes())
	}
}

impl Debug for Blob {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "Blob({}): {}", self.0.len(), self.as_hex())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_new_empty_and_sized() {
		assert!(Blob::new_empty().is_empty());
		let blob = Blob::new_sized(3);
		assert_eq!(blob.len(), 3);
		assert_eq!(blob.as_slice(), &[0, 0, 0]);
	}

	#[test]
	fn test_conversions() {
		assert_eq!(Blob::from("ab").into_vec(), vec![0x61, 0x62]);
		assert_eq!(Blob::from(&[1u8, 2]).into_vec(), vec![1, 2]);
		assert_eq!(Blob::from(String::from("c")).as_slice(), b"c");
		assert_eq!(Blob::from(vec![9u8].as_slice()).len(), 1);
	}

	#[test]
	fn test_as_mut_slice() {
		let mut blob = Blob::new_sized(2);
		blob.as_mut_slice()[1] = 7;
		assert_eq!(blob.as_slice(), &[0, 7]);
	}

	#[test]
	fn test_debug() {
		assert_eq!(format!("{:?}", Blob::from(&[0x1f, 0x8b])), "Blob(2): 1f 8b");
	}

	#[test]
	fn test_file_round_trip() -> Result<()> {
		let dir = std::env::temp_dir().join(format!("tilecut_blob_{}", std::process::id()));
		std::fs::create_dir_all(&dir)?;
		let path = dir.join("tile.bin");
		Blob::from(&[1u8, 2, 3]).save_to_file(&path)?;
		assert_eq!(Blob::load_from_file(&path)?.as_slice(), &[1, 2, 3]);
		std::fs::remove_dir_all(&dir)?;
		Ok(())
	}

	#[test]
	fn test_load_missing_file() {
		let err = Blob::load_from_file(Path::new("/definitely/not/here.mvt")).unwrap_err();
		assert!(err.to_string().starts_with("Failed to read"));
	}
}
