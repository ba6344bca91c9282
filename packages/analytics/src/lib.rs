#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Per-category count aggregation over request snapshots.
//!
//! Implements the counting behind the filter UI: a fast path that projects
//! precomputed per-district tables onto the active allow-list, and a
//! full-scan path for free-form boundaries and districts without a table.
//! The two paths are observably equivalent; the fast path exists purely
//! for performance.

pub mod precompute;

use request_map_analytics_models::{AllowList, CountTable, PrecomputedTables, Selector};
use request_map_districts::{DistrictError, DistrictIndex};
use request_map_filter::filter_within;
use request_map_geometry::Boundary;
use request_map_request_models::RequestFeature;
use thiserror::Error;

/// Errors that can occur during count aggregation.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// District lookup failed.
    #[error("District error: {0}")]
    District(#[from] DistrictError),
}

/// Counts requests per category under the active selector and allow-list.
///
/// A district selector with a precomputed table projects that table onto
/// the allow-list without touching the snapshot — O(|allow list|). Every
/// other selector is a single O(n) scan: allow-list filter, then the
/// containment filter when a boundary applies, then a tally. A district
/// selector whose layer is loaded but has no precomputed entry scans
/// against the district's own boundary.
///
/// Every allow-listed category is present in the result, zero when
/// unmatched; categories outside the allow-list never appear, so an
/// excluded category is distinguishable from a zero count.
///
/// # Errors
///
/// Returns [`AnalyticsError::District`] when a district selector names a
/// layer with no loaded index ([`DistrictError::LayerNotLoaded`]) or an id
/// the layer does not contain ([`DistrictError::UnknownDistrict`]); both
/// are usage errors, never treated as "no selector".
pub fn count_by_category(
    features: &[RequestFeature],
    selector: &Selector,
    allow_list: &AllowList,
    districts: &DistrictIndex,
    precomputed: &PrecomputedTables,
) -> Result<CountTable, AnalyticsError> {
    match selector {
        Selector::District { layer, id } => {
            if let Some(table) = precomputed.table(*layer, id) {
                return Ok(project(table, allow_list));
            }
            log::debug!("No precomputed table for district {id} in layer {layer}; scanning");
            let district = districts.district(*layer, id)?;
            Ok(scan(features, Some(district.boundary()), allow_list))
        }
        Selector::Polygon(boundary) => Ok(scan(features, Some(boundary), allow_list)),
        Selector::None => Ok(scan(features, None, allow_list)),
    }
}

/// Projects a full-category table onto the allow-list.
///
/// Categories absent from the table contribute an explicit zero.
fn project(table: &CountTable, allow_list: &AllowList) -> CountTable {
    allow_list
        .iter()
        .map(|category| (*category, table.get(category).copied().unwrap_or(0)))
        .collect()
}

/// Full-scan path: allow-list filter, optional containment, tally.
fn scan(
    features: &[RequestFeature],
    boundary: Option<&Boundary>,
    allow_list: &AllowList,
) -> CountTable {
    let by_type: Vec<RequestFeature> = features
        .iter()
        .filter(|feature| allow_list.contains(&feature.request_type))
        .cloned()
        .collect();

    let in_scope = match boundary {
        Some(boundary) => filter_within(&by_type, boundary),
        None => by_type,
    };

    let mut counts: CountTable = allow_list.iter().map(|category| (*category, 0)).collect();
    for feature in &in_scope {
        if let Some(count) = counts.get_mut(&feature.request_type) {
            *count += 1;
        }
    }
    counts
}
