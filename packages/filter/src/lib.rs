#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Geographic containment filtering for request feature collections.
//!
//! Reduces a request snapshot to the subset enclosed by a selector
//! boundary. The filter is pure and stable: the input is never mutated and
//! the output preserves the input's relative order.

use request_map_geometry::Boundary;
use request_map_request_models::RequestFeature;

/// Returns the subsequence of `features` enclosed by `boundary`.
///
/// Single pass, O(n); each feature goes through the boundary's
/// bounding-box short-circuit before the exact containment test, which
/// keeps a scan over tens of thousands of features well inside interactive
/// latency.
#[must_use]
pub fn filter_within(features: &[RequestFeature], boundary: &Boundary) -> Vec<RequestFeature> {
    features
        .iter()
        .filter(|feature| boundary.contains(feature.point()))
        .cloned()
        .collect()
}
