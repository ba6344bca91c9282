#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Service request taxonomy and feature record types.
//!
//! This crate defines the canonical closed set of 311 request categories
//! used across the request-map system and the point-tagged feature record
//! every data source normalizes into.

use geo::Point;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// The closed set of 311 service request categories.
///
/// The wire form is `SCREAMING_SNAKE_CASE` (e.g. `"GRAFFITI_REMOVAL"`);
/// unrecognized category strings fail to parse rather than mapping to a
/// catch-all.
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
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestType {
    /// Oversized item pickup (couches, mattresses, furniture).
    BulkyItems,
    /// Dead animal removal from the public right-of-way.
    DeadAnimalRemoval,
    /// Electronic waste pickup.
    ElectronicWaste,
    /// General feedback and service complaints.
    Feedback,
    /// Graffiti removal from public or publicly visible surfaces.
    GraffitiRemoval,
    /// Homeless encampment report.
    HomelessEncampment,
    /// Illegal dumping pickup.
    IllegalDumpingPickup,
    /// Metal and household appliance pickup.
    MetalHouseholdAppliances,
    /// Multiple broken streetlights.
    MultipleStreetlightIssue,
    /// Single broken streetlight.
    SingleStreetlightIssue,
    /// Requests not fitting other categories.
    Other,
}

impl RequestType {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::BulkyItems,
            Self::DeadAnimalRemoval,
            Self::ElectronicWaste,
            Self::Feedback,
            Self::GraffitiRemoval,
            Self::HomelessEncampment,
            Self::IllegalDumpingPickup,
            Self::MetalHouseholdAppliances,
            Self::MultipleStreetlightIssue,
            Self::SingleStreetlightIssue,
            Self::Other,
        ]
    }
}

/// A single geocoded service request.
///
/// The working set is an ordered snapshot of these records, treated as
/// immutable; a new data load replaces the snapshot wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestFeature {
    /// Service request number (e.g. `"1-1523590871"`).
    pub request_id: String,
    /// Request category.
    pub request_type: RequestType,
    /// Longitude in degrees (WGS84).
    pub longitude: f64,
    /// Latitude in degrees (WGS84).
    pub latitude: f64,
}

impl RequestFeature {
    /// Returns the request location as a (longitude, latitude) point.
    #[must_use]
    pub fn point(&self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }
}
