use log::trace;
use tilecut_geometry::{
	GeoFeature,
	math::{Triangle, TriangleOverlap},
};

/// Keeps a feature only if its triangle overlaps none of the features kept so far.
///
/// The first feature is always kept. A feature whose geometry has fewer than three
/// coordinates cannot form a triangle and is kept as well. This is quadratic in the
/// number of features.
pub fn remove_overlap_triangles(features: Vec<GeoFeature>, predicate: &impl TriangleOverlap) -> Vec<GeoFeature> {
	let mut kept: Vec<GeoFeature> = Vec::with_capacity(features.len());
	let mut kept_triangles: Vec<Triangle> = Vec::with_capacity(features.len());

	for feature in features {
		if let Some(candidate) = Triangle::from_geometry(&feature.geometry) {
			if let Some(other) = kept_triangles.iter().find(|t| predicate.overlaps(t, &candidate)) {
				trace!("found overlap {other:?} {candidate:?}");
				continue;
			}
			kept_triangles.push(candidate);
		}
		kept.push(feature);
	}

	kept
}
