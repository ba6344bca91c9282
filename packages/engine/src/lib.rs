#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Engine facade for the interactive request map.
//!
//! Owns the district indexes and precomputed count tables and exposes the
//! value-passing API the map UI consumes: point resolution, containment
//! filtering, and per-category counting. Loads replace whole layers;
//! every query method takes `&self` over immutable state, so a shared
//! reference can serve concurrent callers without synchronization.

use geo::Point;
use request_map_analytics::AnalyticsError;
use request_map_analytics_models::{
    AllowList, CountTable, PrecomputedCounts, PrecomputedTables, Selector,
};
use request_map_district_models::{DistrictBoundary, DistrictId, DistrictRef, LayerId};
use request_map_districts::{District, DistrictError, DistrictIndex, LayerIndex};
use request_map_request_models::RequestFeature;
use thiserror::Error;

pub use request_map_filter::filter_within;

/// Errors surfaced by the engine facade.
#[derive(Debug, Error)]
pub enum EngineError {
    /// District index operation failed.
    #[error("District error: {0}")]
    District(#[from] DistrictError),

    /// Count aggregation failed.
    #[error("Analytics error: {0}")]
    Analytics(#[from] AnalyticsError),
}

/// The stateful core behind the interactive request map.
///
/// District layers and precomputed tables load independently and replace
/// (never merge) their predecessors; each replacement index is fully built
/// before publication, so no query observes a partially built layer.
#[derive(Default)]
pub struct RequestMap {
    districts: DistrictIndex,
    precomputed: PrecomputedTables,
}

impl RequestMap {
    /// Creates an engine with no loaded layers.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            districts: DistrictIndex::new(),
            precomputed: PrecomputedTables::new(),
        }
    }

    /// Builds and publishes the district index for a layer, replacing any
    /// prior index for that layer.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::District`] if a district polygon fails
    /// geometry validation; the prior index for the layer stays published.
    pub fn load_district_layer(
        &mut self,
        layer: LayerId,
        boundaries: Vec<DistrictBoundary>,
    ) -> Result<(), EngineError> {
        let index = LayerIndex::build(layer, boundaries)?;
        self.districts.load_layer(index);
        Ok(())
    }

    /// Replaces the precomputed count tables for a layer.
    pub fn load_precomputed_counts(&mut self, layer: LayerId, counts: PrecomputedCounts) {
        self.precomputed.load_layer(layer, counts);
    }

    /// Resolves a point to its enclosing district in a layer.
    ///
    /// `Ok(None)` is the normal outcome for points outside every district.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::District`] if the layer has no loaded index.
    pub fn resolve(
        &self,
        layer: LayerId,
        point: Point<f64>,
    ) -> Result<Option<DistrictRef>, EngineError> {
        Ok(self.districts.resolve(layer, point)?)
    }

    /// Looks up a district's record (identifier, display name, boundary)
    /// by id.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::District`] if the layer has no loaded index
    /// or the id is not in the layer.
    pub fn district(&self, layer: LayerId, id: &DistrictId) -> Result<&District, EngineError> {
        Ok(self.districts.district(layer, id)?)
    }

    /// Counts requests per category under a selector and allow-list.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Analytics`] if a district selector names an
    /// unloaded layer or an unknown district id.
    pub fn count_by_category(
        &self,
        features: &[RequestFeature],
        selector: &Selector,
        allow_list: &AllowList,
    ) -> Result<CountTable, EngineError> {
        Ok(request_map_analytics::count_by_category(
            features,
            selector,
            allow_list,
            &self.districts,
            &self.precomputed,
        )?)
    }
}
