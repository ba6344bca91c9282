#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Validated boundary geometry and point-in-polygon containment.
//!
//! A [`Boundary`] wraps a polygon union with its precomputed bounding
//! rectangle and answers containment queries with an even-odd ray cast.
//! All coordinates are (longitude, latitude) degrees; containment runs
//! directly in lon/lat space, so callers must not mix coordinate systems.

use geo::{BoundingRect, Coord, LineString, MultiPolygon, Point, Polygon, Rect};
use thiserror::Error;

/// Errors that can occur during geometry operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// A ring or polygon set does not describe an area.
    #[error("Invalid geometry: {reason}")]
    InvalidGeometry {
        /// Description of what was degenerate.
        reason: String,
    },
}

/// A validated polygon union with a precomputed bounding rectangle.
///
/// Construction rejects degenerate input, so every held ring has at least
/// 3 distinct vertices and every containment query gets a cheap
/// bounding-box short-circuit before the exact test.
#[derive(Debug, Clone, PartialEq)]
pub struct Boundary {
    polygons: MultiPolygon<f64>,
    bbox: Rect<f64>,
}

impl Boundary {
    /// Creates a boundary from a polygon union.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidGeometry`] if the union is empty or
    /// any ring has fewer than 3 distinct vertices.
    pub fn new(polygons: MultiPolygon<f64>) -> Result<Self, GeometryError> {
        if polygons.0.is_empty() {
            return Err(GeometryError::InvalidGeometry {
                reason: "boundary has zero polygons".to_string(),
            });
        }
        for polygon in &polygons.0 {
            validate_ring(polygon.exterior(), "outer")?;
            for hole in polygon.interiors() {
                validate_ring(hole, "hole")?;
            }
        }

        let bbox = polygons
            .bounding_rect()
            .ok_or_else(|| GeometryError::InvalidGeometry {
                reason: "boundary has no extent".to_string(),
            })?;

        Ok(Self { polygons, bbox })
    }

    /// Creates a boundary from a single polygon.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidGeometry`] if any ring has fewer
    /// than 3 distinct vertices.
    pub fn from_polygon(polygon: Polygon<f64>) -> Result<Self, GeometryError> {
        Self::new(MultiPolygon(vec![polygon]))
    }

    /// Returns the precomputed bounding rectangle.
    ///
    /// `min` is (west, south) and `max` is (east, north).
    #[must_use]
    pub const fn bounding_rect(&self) -> Rect<f64> {
        self.bbox
    }

    /// Returns the underlying polygon union.
    #[must_use]
    pub const fn polygons(&self) -> &MultiPolygon<f64> {
        &self.polygons
    }

    /// Returns whether the boundary encloses a point.
    ///
    /// Union semantics: the point is inside if any member polygon contains
    /// it; a polygon contains it if its outer ring does and no hole ring
    /// does. Points exactly on an edge or vertex classify to whichever side
    /// the even-odd cast lands on, but the vertex iteration order is fixed,
    /// so the same (boundary, point) pair always yields the same answer.
    #[must_use]
    pub fn contains(&self, point: Point<f64>) -> bool {
        if !rect_contains(&self.bbox, point) {
            return false;
        }
        self.polygons
            .0
            .iter()
            .any(|polygon| polygon_contains(polygon, point))
    }
}

/// Inclusive bounding-box containment check.
fn rect_contains(rect: &Rect<f64>, point: Point<f64>) -> bool {
    point.x() >= rect.min().x
        && point.x() <= rect.max().x
        && point.y() >= rect.min().y
        && point.y() <= rect.max().y
}

/// Exact containment against one polygon: outer ring minus holes.
fn polygon_contains(polygon: &Polygon<f64>, point: Point<f64>) -> bool {
    if !ring_contains(polygon.exterior(), point) {
        return false;
    }
    !polygon
        .interiors()
        .iter()
        .any(|hole| ring_contains(hole, point))
}

/// Even-odd ray cast against a single ring.
///
/// Casts a ray from the point toward negative-x and counts edge crossings;
/// an odd count means inside. O(vertices).
fn ring_contains(ring: &LineString<f64>, point: Point<f64>) -> bool {
    let coords = ring_coords(ring);
    let (x, y) = (point.x(), point.y());

    let mut inside = false;
    let mut j = coords.len() - 1;
    for (i, a) in coords.iter().enumerate() {
        let b = coords[j];
        if (a.y > y) != (b.y > y) {
            let crossing_x = ((b.x - a.x) / (b.y - a.y)).mul_add(y - a.y, a.x);
            if x < crossing_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Returns the ring's vertices with a duplicated closing coordinate
/// dropped, so implicitly and explicitly closed rings count the same.
fn ring_coords(ring: &LineString<f64>) -> &[Coord<f64>] {
    let coords = ring.0.as_slice();
    match (coords.first(), coords.last()) {
        (Some(first), Some(last)) if coords.len() > 1 && first == last => {
            &coords[..coords.len() - 1]
        }
        _ => coords,
    }
}

/// Rejects rings with fewer than 3 distinct vertices.
fn validate_ring(ring: &LineString<f64>, role: &str) -> Result<(), GeometryError> {
    if ring_coords(ring).len() < 3 {
        return Err(GeometryError::InvalidGeometry {
            reason: format!("{role} ring has fewer than 3 vertices"),
        });
    }
    Ok(())
}
