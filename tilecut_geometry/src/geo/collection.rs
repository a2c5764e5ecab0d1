use super::GeoFeature;
use crate::geojson::{parse_geojson, to_geojson};
use anyhow::Result;
use serde_json::Value;

/// An ordered batch of features, the in-memory form of a GeoJSON FeatureCollection.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GeoCollection {
	pub features: Vec<GeoFeature>,
}

impl GeoCollection {
	#[must_use]
	pub fn from(features: Vec<GeoFeature>) -> Self {
		Self { features }
	}

	pub fn from_json_str(json: &str) -> Result<Self> {
		parse_geojson(json)
	}

	#[must_use]
	pub fn to_json(&self) -> Value {
		to_geojson(self)
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.features.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.features.is_empty()
	}
}
