mod gzip;

pub use gzip::*;
