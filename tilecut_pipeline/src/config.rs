use anyhow::{Context, Result, ensure};
use serde::Deserialize;
use std::{
	fs::File,
	io::{BufReader, Read},
	path::Path,
};

/// Rendering settings, read from YAML. Every field may be left out.
///
/// ```yaml
/// extent: 4096
/// buffer: 64
/// tolerance: 1.0
/// gzip: true
/// dedup:
///   layer: mesh
///   min_zoom: 14
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
	/// Size of the tile grid in tile units.
	#[serde(default = "default_extent")]
	pub extent: u32,

	/// Margin around the tile, in tile units. Features entirely outside of it are dropped before clipping.
	#[serde(default = "default_buffer")]
	pub buffer: f64,

	/// Douglas-Peucker tolerance in tile units. 0 disables simplification.
	#[serde(default = "default_tolerance")]
	pub tolerance: f64,

	/// Gzip the encoded tiles.
	#[serde(default = "default_gzip")]
	pub gzip: bool,

	/// Optional removal of overlapping triangles in one layer.
	#[serde(default)]
	pub dedup: Option<DedupConfig>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DedupConfig {
	/// Name of the triangle layer.
	pub layer: String,

	/// Lowest zoom level the pass runs at.
	#[serde(default = "default_min_zoom")]
	pub min_zoom: u8,
}

fn default_extent() -> u32 {
	4096
}

fn default_buffer() -> f64 {
	4096.0
}

fn default_tolerance() -> f64 {
	1.0
}

fn default_gzip() -> bool {
	true
}

fn default_min_zoom() -> u8 {
	14
}

impl Default for PipelineConfig {
	fn default() -> Self {
		PipelineConfig {
			extent: default_extent(),
			buffer: default_buffer(),
			tolerance: default_tolerance(),
			gzip: default_gzip(),
			dedup: None,
		}
	}
}

impl PipelineConfig {
	pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
		let config: PipelineConfig = serde_yaml_ng::from_reader(reader).context("Failed to parse pipeline config")?;
		config.validate()?;
		Ok(config)
	}

	pub fn from_string(text: &str) -> Result<Self> {
		if text.trim().is_empty() {
			return Ok(PipelineConfig::default());
		}
		let config: PipelineConfig = serde_yaml_ng::from_str(text).context("Failed to parse pipeline config")?;
		config.validate()?;
		Ok(config)
	}

	pub fn from_path(path: &Path) -> Result<Self> {
		let file = File::open(path).with_context(|| format!("Failed to open config file {path:?}"))?;
		PipelineConfig::from_reader(BufReader::new(file)).with_context(|| format!("in config file {path:?}"))
	}

	pub fn validate(&self) -> Result<()> {
		ensure!(self.extent > 0, "extent must be greater than 0");
		ensure!(self.buffer >= 0.0, "buffer must not be negative, found {}", self.buffer);
		ensure!(
			self.tolerance >= 0.0,
			"tolerance must not be negative, found {}",
			self.tolerance
		);
		if let Some(dedup) = &self.dedup {
			ensure!(!dedup.layer.is_empty(), "dedup.layer must not be empty");
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use assert_fs::{NamedTempFile, prelude::*};
	use pretty_assertions::assert_eq;

	#[test]
	fn parse_empty_config() -> Result<()> {
		assert_eq!(PipelineConfig::from_string("")?, PipelineConfig::default());
		Ok(())
	}

	#[test]
	fn parse_full_config() -> Result<()> {
		let config = PipelineConfig::from_string(
			"extent: 512\nbuffer: 16\ntolerance: 0.5\ngzip: false\ndedup:\n  layer: mesh\n  min_zoom: 12\n",
		)?;
		assert_eq!(
			config,
			PipelineConfig {
				extent: 512,
				buffer: 16.0,
				tolerance: 0.5,
				gzip: false,
				dedup: Some(DedupConfig {
					layer: "mesh".to_string(),
					min_zoom: 12,
				}),
			}
		);
		Ok(())
	}

	#[test]
	fn parse_partial_config() -> Result<()> {
		let config = PipelineConfig::from_string("tolerance: 0\ndedup:\n  layer: mesh\n")?;
		assert_eq!(config.extent, 4096);
		assert_eq!(config.tolerance, 0.0);
		assert_eq!(config.dedup.map(|d| d.min_zoom), Some(14));
		Ok(())
	}

	#[test]
	fn parse_invalid_config() {
		assert!(PipelineConfig::from_string("extnet: 4096").is_err());
		assert!(PipelineConfig::from_string("extent: 0").is_err());
		assert!(PipelineConfig::from_string("buffer: -1").is_err());
		assert!(PipelineConfig::from_string("tolerance: -0.5").is_err());
		assert!(PipelineConfig::from_string("dedup:\n  layer: ''\n").is_err());
		assert!(PipelineConfig::from_string("dedup:\n  min_zoom: 3\n").is_err());
	}

	#[test]
	fn parse_config_file() -> Result<()> {
		let file = NamedTempFile::new("config.yml")?;
		file.write_str("extent: 1024\ngzip: false\n")?;
		let config = PipelineConfig::from_path(file.path())?;
		assert_eq!(config.extent, 1024);
		assert!(!config.gzip);
		assert_eq!(config.buffer, 4096.0);
		Ok(())
	}

	#[test]
	fn missing_config_file() {
		assert!(PipelineConfig::from_path(Path::new("/does/not/exist.yml")).is_err());
	}
}
