use super::{parse_geojson, parse_geojson_feature};
use crate::{GeoCollection, GeoFeature};
use anyhow::{Context, Result, anyhow};
use serde_json::Value;
use std::io::{BufRead, Read};

pub fn read_geojson(mut reader: impl Read) -> Result<GeoCollection> {
	let mut buffer = String::new();
	reader.read_to_string(&mut buffer).context("Failed to read GeoJSON")?;
	parse_geojson(&buffer)
}

fn process_line(line: std::io::Result<String>, index: usize) -> Result<Option<GeoFeature>> {
	match line {
		Ok(line) if line.trim().is_empty() => Ok(None),
		Ok(line) => serde_json::from_str::<Value>(&line)
			.map_err(anyhow::Error::from)
			.and_then(parse_geojson_feature)
			.map(Some)
			.map_err(|e| anyhow!("line {}: {}", index + 1, e)),
		Err(e) => Err(anyhow!("line {}: {}", index + 1, e)),
	}
}

/// Reads newline-delimited GeoJSON, one Feature per line. Blank lines are skipped.
pub fn read_ndgeojson_iter(reader: impl BufRead) -> impl Iterator<Item = Result<GeoFeature>> {
	reader
		.lines()
		.enumerate()
		.filter_map(|(index, line)| process_line(line, index).transpose())
}
