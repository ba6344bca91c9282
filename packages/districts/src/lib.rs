#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! In-memory district index for point-to-district resolution.
//!
//! Holds the two administrative district layers as declared-order polygon
//! sets behind R-tree envelope indexes, and resolves points to the
//! enclosing district. Built once per boundary-data load and immutable
//! thereafter; a reload builds a fresh index and replaces the old one.

pub mod normalize;

use std::collections::BTreeMap;

use geo::Point;
use request_map_district_models::{DistrictBoundary, DistrictId, DistrictRef, LayerId};
use request_map_geometry::{Boundary, GeometryError};
use rstar::{AABB, RTree, RTreeObject};
use thiserror::Error;

/// Errors that can occur during district operations.
#[derive(Debug, Error)]
pub enum DistrictError {
    /// Geometry validation failed.
    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    /// The layer has no loaded index.
    #[error("District layer {layer} is not loaded")]
    LayerNotLoaded {
        /// The unloaded layer.
        layer: LayerId,
    },

    /// The district id does not exist in the layer.
    #[error("Unknown district {id} in layer {layer}")]
    UnknownDistrict {
        /// Layer that was searched.
        layer: LayerId,
        /// The unmatched identifier.
        id: DistrictId,
    },
}

/// A district stored in a layer index.
#[derive(Debug, Clone)]
pub struct District {
    id: DistrictId,
    name: String,
    boundary: Boundary,
}

impl District {
    /// Returns the district identifier.
    #[must_use]
    pub const fn id(&self) -> &DistrictId {
        &self.id
    }

    /// Returns the human-readable district name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the district's validated boundary.
    #[must_use]
    pub const fn boundary(&self) -> &Boundary {
        &self.boundary
    }
}

/// R-tree entry pointing back into the declared-order district table.
#[derive(Debug)]
struct EnvelopeEntry {
    ordinal: usize,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for EnvelopeEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// One district layer: districts in declared order plus an R-tree over
/// their precomputed envelopes.
///
/// The R-tree prunes candidates by bounding box; exact containment then
/// picks the lowest declared ordinal, so resolution behaves exactly like a
/// declared-order scan regardless of tree shape.
#[derive(Debug)]
pub struct LayerIndex {
    layer: LayerId,
    districts: Vec<District>,
    by_id: BTreeMap<DistrictId, usize>,
    tree: RTree<EnvelopeEntry>,
}

impl LayerIndex {
    /// Builds a layer index from district boundaries in declared order.
    ///
    /// A duplicate identifier keeps the first declared district and logs a
    /// warning, consistent with first-declared-match resolution.
    ///
    /// # Errors
    ///
    /// Returns [`DistrictError::Geometry`] if any district polygon fails
    /// validation.
    pub fn build(
        layer: LayerId,
        boundaries: Vec<DistrictBoundary>,
    ) -> Result<Self, DistrictError> {
        let mut districts = Vec::with_capacity(boundaries.len());
        let mut by_id = BTreeMap::new();
        let mut entries = Vec::with_capacity(boundaries.len());

        for district in boundaries {
            let boundary = Boundary::new(district.boundary)?;

            if by_id.contains_key(&district.id) {
                log::warn!(
                    "Duplicate district id {} in layer {layer}; keeping the first",
                    district.id
                );
                continue;
            }

            let ordinal = districts.len();
            let rect = boundary.bounding_rect();
            by_id.insert(district.id.clone(), ordinal);
            entries.push(EnvelopeEntry {
                ordinal,
                envelope: AABB::from_corners(
                    [rect.min().x, rect.min().y],
                    [rect.max().x, rect.max().y],
                ),
            });
            districts.push(District {
                id: district.id,
                name: district.name,
                boundary,
            });
        }

        log::info!("Loaded {} districts into {layer} layer index", districts.len());

        Ok(Self {
            layer,
            districts,
            by_id,
            tree: RTree::bulk_load(entries),
        })
    }

    /// Returns the layer this index covers.
    #[must_use]
    pub const fn layer(&self) -> LayerId {
        self.layer
    }

    /// Returns the number of indexed districts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.districts.len()
    }

    /// Returns whether the index holds no districts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.districts.is_empty()
    }

    /// Resolves a point to the enclosing district.
    ///
    /// Districts within a layer are non-overlapping in the source data; if
    /// overlaps exist anyway, the first declared district wins, so the
    /// answer is deterministic.
    ///
    /// `None` means the point is outside every district — a normal outcome
    /// for points outside city limits, not an error.
    #[must_use]
    pub fn resolve(&self, point: Point<f64>) -> Option<DistrictRef> {
        let query = AABB::from_point([point.x(), point.y()]);

        self.tree
            .locate_in_envelope_intersecting(&query)
            .filter(|entry| self.districts[entry.ordinal].boundary.contains(point))
            .map(|entry| entry.ordinal)
            .min()
            .map(|ordinal| {
                let district = &self.districts[ordinal];
                DistrictRef {
                    layer: self.layer,
                    id: district.id.clone(),
                    name: district.name.clone(),
                }
            })
    }

    /// Looks up a district by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DistrictError::UnknownDistrict`] if the id is not in this
    /// layer.
    pub fn district(&self, id: &DistrictId) -> Result<&District, DistrictError> {
        self.by_id
            .get(id)
            .map(|&ordinal| &self.districts[ordinal])
            .ok_or_else(|| DistrictError::UnknownDistrict {
                layer: self.layer,
                id: id.clone(),
            })
    }

    /// Iterates districts in declared order.
    pub fn districts(&self) -> impl Iterator<Item = &District> {
        self.districts.iter()
    }
}

/// Per-layer registry of district indexes.
///
/// Holds at most one [`LayerIndex`] per layer; loading a layer replaces
/// (never merges) the previous index for that layer.
#[derive(Default)]
pub struct DistrictIndex {
    layers: BTreeMap<LayerId, LayerIndex>,
}

impl DistrictIndex {
    /// Creates a registry with no loaded layers.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            layers: BTreeMap::new(),
        }
    }

    /// Publishes a fully built layer index, replacing any prior index for
    /// that layer.
    pub fn load_layer(&mut self, index: LayerIndex) {
        let layer = index.layer();
        if self.layers.insert(layer, index).is_some() {
            log::info!("Replaced district index for layer {layer}");
        }
    }

    /// Returns whether a layer has a loaded index.
    #[must_use]
    pub fn is_loaded(&self, layer: LayerId) -> bool {
        self.layers.contains_key(&layer)
    }

    /// Returns a layer's index.
    ///
    /// # Errors
    ///
    /// Returns [`DistrictError::LayerNotLoaded`] if the layer has no loaded
    /// index.
    pub fn layer(&self, layer: LayerId) -> Result<&LayerIndex, DistrictError> {
        self.layers
            .get(&layer)
            .ok_or(DistrictError::LayerNotLoaded { layer })
    }

    /// Resolves a point to the enclosing district in a layer.
    ///
    /// # Errors
    ///
    /// Returns [`DistrictError::LayerNotLoaded`] if the layer has no loaded
    /// index. A point matching no district is `Ok(None)`, not an error.
    pub fn resolve(
        &self,
        layer: LayerId,
        point: Point<f64>,
    ) -> Result<Option<DistrictRef>, DistrictError> {
        Ok(self.layer(layer)?.resolve(point))
    }

    /// Looks up a district by layer and identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DistrictError::LayerNotLoaded`] if the layer has no loaded
    /// index, or [`DistrictError::UnknownDistrict`] if the id is not in the
    /// layer.
    pub fn district(
        &self,
        layer: LayerId,
        id: &DistrictId,
    ) -> Result<&District, DistrictError> {
        self.layer(layer)?.district(id)
    }
}

#[cfg(test)]
mod tests {
    use geo::{LineString, MultiPolygon, Polygon};

    use super::*;

    fn square_district(id: DistrictId, name: &str, min: f64, max: f64) -> DistrictBoundary {
        DistrictBoundary {
            id,
            name: name.to_string(),
            boundary: MultiPolygon(vec![Polygon::new(
                LineString::from(vec![(min, min), (min, max), (max, max), (max, min)]),
                vec![],
            )]),
        }
    }

    fn two_district_layer() -> LayerIndex {
        LayerIndex::build(
            LayerId::NeighborhoodCouncil,
            vec![
                square_district(DistrictId::from(1), "District A", 0.0, 5.0),
                square_district(DistrictId::from(2), "District B", 5.0, 10.0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn resolves_points_to_enclosing_district() {
        let index = two_district_layer();

        let a = index.resolve(Point::new(2.0, 2.0)).unwrap();
        assert_eq!(a.id, DistrictId::from(1));
        assert_eq!(a.name, "District A");

        let b = index.resolve(Point::new(6.0, 6.0)).unwrap();
        assert_eq!(b.id, DistrictId::from(2));

        assert!(index.resolve(Point::new(20.0, 20.0)).is_none());
    }

    #[test]
    fn resolves_overlap_to_first_declared() {
        let index = LayerIndex::build(
            LayerId::CityCouncil,
            vec![
                square_district(DistrictId::from("first"), "First", 0.0, 10.0),
                square_district(DistrictId::from("second"), "Second", 0.0, 10.0),
            ],
        )
        .unwrap();

        for _ in 0..50 {
            let matched = index.resolve(Point::new(5.0, 5.0)).unwrap();
            assert_eq!(matched.id, DistrictId::from("first"));
        }
    }

    #[test]
    fn duplicate_id_keeps_first_declared() {
        let index = LayerIndex::build(
            LayerId::NeighborhoodCouncil,
            vec![
                square_district(DistrictId::from(1), "Original", 0.0, 5.0),
                square_district(DistrictId::from(1), "Duplicate", 5.0, 10.0),
            ],
        )
        .unwrap();

        assert_eq!(index.len(), 1);
        assert_eq!(index.district(&DistrictId::from(1)).unwrap().name(), "Original");
    }

    #[test]
    fn invalid_geometry_aborts_build() {
        let degenerate = DistrictBoundary {
            id: DistrictId::from(1),
            name: "Degenerate".to_string(),
            boundary: MultiPolygon(vec![Polygon::new(
                LineString::from(vec![(0.0, 0.0), (1.0, 1.0)]),
                vec![],
            )]),
        };

        let err = LayerIndex::build(LayerId::NeighborhoodCouncil, vec![degenerate]).unwrap_err();
        assert!(matches!(err, DistrictError::Geometry(_)));
    }

    #[test]
    fn district_lookup_reports_unknown_id() {
        let index = two_district_layer();
        let err = index.district(&DistrictId::from(99)).unwrap_err();
        assert!(matches!(err, DistrictError::UnknownDistrict { .. }));
    }

    #[test]
    fn registry_distinguishes_unloaded_layer_from_no_match() {
        let mut registry = DistrictIndex::new();
        registry.load_layer(two_district_layer());

        let err = registry
            .resolve(LayerId::CityCouncil, Point::new(2.0, 2.0))
            .unwrap_err();
        assert!(matches!(err, DistrictError::LayerNotLoaded { .. }));

        let miss = registry
            .resolve(LayerId::NeighborhoodCouncil, Point::new(20.0, 20.0))
            .unwrap();
        assert!(miss.is_none());
    }

    #[test]
    fn load_layer_replaces_not_merges() {
        let mut registry = DistrictIndex::new();
        registry.load_layer(two_district_layer());

        let replacement = LayerIndex::build(
            LayerId::NeighborhoodCouncil,
            vec![square_district(DistrictId::from(3), "District C", 0.0, 10.0)],
        )
        .unwrap();
        registry.load_layer(replacement);

        let layer = registry.layer(LayerId::NeighborhoodCouncil).unwrap();
        assert_eq!(layer.len(), 1);
        assert!(layer.district(&DistrictId::from(1)).is_err());
        assert!(layer.district(&DistrictId::from(3)).is_ok());
    }

    #[test]
    fn layers_are_independent() {
        let mut registry = DistrictIndex::new();
        registry.load_layer(two_district_layer());
        registry.load_layer(
            LayerIndex::build(
                LayerId::CityCouncil,
                vec![square_district(DistrictId::from("9"), "Ninth", 0.0, 10.0)],
            )
            .unwrap(),
        );

        let fine = registry
            .resolve(LayerId::NeighborhoodCouncil, Point::new(2.0, 2.0))
            .unwrap()
            .unwrap();
        let coarse = registry
            .resolve(LayerId::CityCouncil, Point::new(2.0, 2.0))
            .unwrap()
            .unwrap();

        assert_eq!(fine.id, DistrictId::from(1));
        assert_eq!(coarse.id, DistrictId::from("9"));
    }
}
