#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Selector, allow-list, and count table types for request aggregation.
//!
//! These types form the per-query inputs and outputs of the counting
//! engine: the active geographic filter, the set of categories in scope,
//! and the per-category count tables — both the fresh per-query results
//! and the externally built per-district fast-path tables.

use std::collections::{BTreeMap, BTreeSet};

use request_map_district_models::{DistrictId, LayerId};
use request_map_geometry::Boundary;
use request_map_request_models::RequestType;

/// Mapping from request category to count.
///
/// Produced fresh per query and never mutated once returned. Serializes
/// as a category → integer object via the string form of [`RequestType`].
pub type CountTable = BTreeMap<RequestType, u64>;

/// The set of request categories included in a query.
///
/// Empty means "no categories"; the full set means "all categories".
pub type AllowList = BTreeSet<RequestType>;

/// The active geographic filter for a counting query.
///
/// Exactly one selector is active per query; it is supplied per call and
/// never stored by the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Selector {
    /// No geographic constraint; the whole snapshot is in scope.
    None,
    /// A specific district in one of the two layers.
    District {
        /// Layer the district belongs to.
        layer: LayerId,
        /// District identifier within the layer.
        id: DistrictId,
    },
    /// An arbitrary free-form boundary (e.g. an address-search region).
    Polygon(Boundary),
}

/// Per-district full-category count tables for one layer.
///
/// Built upstream from a request snapshot and treated as read-only here.
/// Tables cover every category present in the district — not any
/// particular allow-list — so a query can project any allow-list without
/// rescanning the snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrecomputedCounts {
    tables: BTreeMap<DistrictId, CountTable>,
}

impl PrecomputedCounts {
    /// Creates a table set from district-keyed category counts.
    #[must_use]
    pub const fn new(tables: BTreeMap<DistrictId, CountTable>) -> Self {
        Self { tables }
    }

    /// Returns the full-category table for a district, if present.
    #[must_use]
    pub fn district(&self, id: &DistrictId) -> Option<&CountTable> {
        self.tables.get(id)
    }

    /// Returns the number of districts with a table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Returns whether no district has a table.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// Per-layer registry of precomputed count tables.
///
/// Holds at most one [`PrecomputedCounts`] per layer; loading a layer
/// replaces (never merges) the previous tables for that layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrecomputedTables {
    layers: BTreeMap<LayerId, PrecomputedCounts>,
}

impl PrecomputedTables {
    /// Creates a registry with no loaded layers.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            layers: BTreeMap::new(),
        }
    }

    /// Replaces the tables for a layer.
    pub fn load_layer(&mut self, layer: LayerId, counts: PrecomputedCounts) {
        self.layers.insert(layer, counts);
    }

    /// Returns the precomputed table for a district, if its layer holds
    /// one.
    #[must_use]
    pub fn table(&self, layer: LayerId, id: &DistrictId) -> Option<&CountTable> {
        self.layers
            .get(&layer)
            .and_then(|counts| counts.district(id))
    }

    /// Returns whether a layer has loaded tables.
    #[must_use]
    pub fn has_layer(&self, layer: LayerId) -> bool {
        self.layers.contains_key(&layer)
    }
}
