#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! District layer, identifier, and boundary types.
//!
//! Administrative districts exist at two nested granularities: fine-grained
//! neighborhood councils (`NC`) and coarse-grained city councils (`CC`).
//! The two layers are independently loaded and queried, never merged.

use geo::MultiPolygon;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// The two district granularities.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum LayerId {
    /// Fine-grained neighborhood council districts.
    #[serde(rename = "NC")]
    #[strum(serialize = "NC")]
    NeighborhoodCouncil,
    /// Coarse-grained city council districts.
    #[serde(rename = "CC")]
    #[strum(serialize = "CC")]
    CityCouncil,
}

impl LayerId {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::NeighborhoodCouncil, Self::CityCouncil]
    }
}

/// A layer-specific district identifier.
///
/// The fine layer keys districts by numeric council id; the coarse layer
/// keys them by name string. Both forms hash, order, and compare exactly,
/// so either can key a lookup table.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DistrictId {
    /// Numeric identifier (e.g. neighborhood council id `52`).
    Numeric(i64),
    /// String identifier (e.g. council district key `"9"`).
    Named(String),
}

impl std::fmt::Display for DistrictId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Numeric(id) => write!(f, "{id}"),
            Self::Named(name) => f.write_str(name),
        }
    }
}

impl From<i64> for DistrictId {
    fn from(id: i64) -> Self {
        Self::Numeric(id)
    }
}

impl From<&str> for DistrictId {
    fn from(name: &str) -> Self {
        Self::Named(name.to_string())
    }
}

impl From<String> for DistrictId {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}

/// A district polygon as supplied to a layer load.
///
/// The raw input record: identifier, display name, and the district area as
/// a polygon union. Geometry is validated when the layer index is built,
/// not here.
#[derive(Debug, Clone, PartialEq)]
pub struct DistrictBoundary {
    /// Layer-specific district identifier.
    pub id: DistrictId,
    /// Human-readable district name.
    pub name: String,
    /// District area as a polygon union.
    pub boundary: MultiPolygon<f64>,
}

/// A resolved district reference returned by point lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictRef {
    /// Layer the district belongs to.
    pub layer: LayerId,
    /// District identifier within the layer.
    pub id: DistrictId,
    /// Human-readable district name.
    pub name: String,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr as _;

    use super::*;

    #[test]
    fn layer_wire_forms() {
        assert_eq!(LayerId::NeighborhoodCouncil.to_string(), "NC");
        assert_eq!(LayerId::CityCouncil.to_string(), "CC");
        assert_eq!(LayerId::from_str("NC").unwrap(), LayerId::NeighborhoodCouncil);
    }

    #[test]
    fn district_id_displays_both_forms() {
        assert_eq!(DistrictId::from(52).to_string(), "52");
        assert_eq!(DistrictId::from("Council District 9").to_string(), "Council District 9");
    }

    #[test]
    fn numeric_and_named_ids_are_distinct_keys() {
        assert_ne!(DistrictId::from(9), DistrictId::from("9"));
    }
}
