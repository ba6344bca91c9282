//! Normalizes `GeoJSON` feature collections into district boundary records.
//!
//! Boundary payloads handed over by the data-loading layer are `GeoJSON`
//! `FeatureCollection`s. This module extracts the identifier, display name,
//! and polygon geometry from each feature, regardless of the layer-specific
//! property naming (`"NC_ID"`/`"council_name"` for the fine layer, `"name"`
//! for the coarse layer).

use geo::MultiPolygon;
use geojson::{Feature, FeatureCollection};
use request_map_district_models::{DistrictBoundary, DistrictId};

/// Extracts district boundaries from a `GeoJSON` feature collection.
///
/// `id_property` and `name_property` name the feature properties carrying
/// the district identifier and display name; the two may be the same
/// property. Features with a missing/empty id, missing geometry, or a
/// non-area geometry are skipped with a warning.
#[must_use]
pub fn boundaries_from_feature_collection(
    collection: &FeatureCollection,
    id_property: &str,
    name_property: &str,
) -> Vec<DistrictBoundary> {
    collection
        .features
        .iter()
        .filter_map(|feature| boundary_from_feature(feature, id_property, name_property))
        .collect()
}

/// Normalizes a single `GeoJSON` feature.
fn boundary_from_feature(
    feature: &Feature,
    id_property: &str,
    name_property: &str,
) -> Option<DistrictBoundary> {
    let Some(id) = extract_id(feature, id_property) else {
        log::warn!("Skipping district feature with missing or empty {id_property}");
        return None;
    };

    // Fall back to the id's display form when the name property is absent
    // (the coarse layer keys and labels districts by the same property).
    let name = feature
        .property(name_property)
        .and_then(serde_json::Value::as_str)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map_or_else(|| id.to_string(), ToString::to_string);

    let Some(boundary) = extract_boundary(feature) else {
        log::warn!("Skipping district {id}: geometry is missing or not an area");
        return None;
    };

    Some(DistrictBoundary { id, name, boundary })
}

/// Extracts the district identifier, numeric or string.
fn extract_id(feature: &Feature, id_property: &str) -> Option<DistrictId> {
    match feature.property(id_property) {
        Some(serde_json::Value::Number(id)) => id.as_i64().map(DistrictId::Numeric),
        Some(serde_json::Value::String(id)) => {
            let id = id.trim();
            (!id.is_empty()).then(|| DistrictId::Named(id.to_string()))
        }
        _ => None,
    }
}

/// Converts the feature geometry into a polygon union.
///
/// Handles both `Polygon` and `MultiPolygon` geometry types.
fn extract_boundary(feature: &Feature) -> Option<MultiPolygon<f64>> {
    let geometry = feature.geometry.clone()?;
    let geo_geometry: geo::Geometry<f64> = geometry.try_into().ok()?;
    match geo_geometry {
        geo::Geometry::MultiPolygon(multi_polygon) => Some(multi_polygon),
        geo::Geometry::Polygon(polygon) => Some(MultiPolygon(vec![polygon])),
        _ => None,
    }
}
