use thiserror::Error;

/// Errors raised while encoding or decoding tile geometry and attributes.
///
/// Decoding reads bytes from outside, so every malformed input ends up here
/// instead of in a panic.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CodecError {
	/// A command announced more coordinates than the stream still holds.
	#[error("data cut short: needed {needed}, have {available}")]
	TruncatedData { needed: usize, available: usize },

	#[error("geometry type not supported: {0}")]
	UnsupportedGeometryType(String),

	#[error("protocol violation: {0}")]
	ProtocolViolation(String),

	#[error("unable to encode value: {0}")]
	UnencodableValueType(String),

	/// A GeoJSON position had fewer than two numbers.
	#[error("position has {0} dimensions, at least 2 are required")]
	DimensionalityTooLow(usize),

	#[error("unsupported type: {0}")]
	UnsupportedType(String),
}
