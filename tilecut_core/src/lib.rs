//! Leaf utilities shared by the tilecut crates: byte buffers, protobuf-style value
//! readers and writers, gzip compression, tile addressing and concurrency limits.

pub mod compression;
mod concurrency;
pub mod io;
pub mod types;

pub use concurrency::ConcurrencyLimits;
pub use types::*;
