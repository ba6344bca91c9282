//! Derives per-district count tables from a request snapshot.
//!
//! The counting engine consumes these tables read-only as its fast path;
//! building them is an offline step run once per snapshot per layer, the
//! same resolve-and-accumulate pass the boundary attribution pipeline
//! uses.

use std::collections::BTreeMap;

use request_map_analytics_models::{CountTable, PrecomputedCounts};
use request_map_district_models::DistrictId;
use request_map_districts::LayerIndex;
use request_map_request_models::RequestFeature;

/// Builds the full-category per-district tables for one layer.
///
/// Every feature is resolved against the layer; features enclosed by no
/// district contribute to no table. Tables cover all categories present in
/// the district, not any particular allow-list, so any later query can
/// project its own allow-list.
#[must_use]
pub fn layer_counts(features: &[RequestFeature], index: &LayerIndex) -> PrecomputedCounts {
    let mut tables: BTreeMap<DistrictId, CountTable> = BTreeMap::new();

    for feature in features {
        if let Some(district) = index.resolve(feature.point()) {
            *tables
                .entry(district.id)
                .or_default()
                .entry(feature.request_type)
                .or_insert(0) += 1;
        }
    }

    log::debug!(
        "Built {} district count tables for layer {}",
        tables.len(),
        index.layer()
    );

    PrecomputedCounts::new(tables)
}

#[cfg(test)]
mod tests {
    use geo::{LineString, MultiPolygon, Polygon};
    use request_map_district_models::{DistrictBoundary, LayerId};
    use request_map_request_models::RequestType;

    use super::*;

    fn square_district(id: i64, min: f64, max: f64) -> DistrictBoundary {
        DistrictBoundary {
            id: DistrictId::from(id),
            name: format!("District {id}"),
            boundary: MultiPolygon(vec![Polygon::new(
                LineString::from(vec![(min, min), (min, max), (max, max), (max, min)]),
                vec![],
            )]),
        }
    }

    fn feature(request_type: RequestType, lon: f64, lat: f64) -> RequestFeature {
        RequestFeature {
            request_id: format!("{lon}-{lat}"),
            request_type,
            longitude: lon,
            latitude: lat,
        }
    }

    #[test]
    fn accumulates_counts_per_district_and_category() {
        let index = LayerIndex::build(
            LayerId::NeighborhoodCouncil,
            vec![square_district(1, 0.0, 5.0), square_district(2, 5.0, 10.0)],
        )
        .unwrap();

        let counts = layer_counts(
            &[
                feature(RequestType::GraffitiRemoval, 1.0, 1.0),
                feature(RequestType::GraffitiRemoval, 2.0, 2.0),
                feature(RequestType::BulkyItems, 3.0, 3.0),
                feature(RequestType::Feedback, 8.0, 8.0),
            ],
            &index,
        );

        let first = counts.district(&DistrictId::from(1)).unwrap();
        assert_eq!(first.get(&RequestType::GraffitiRemoval), Some(&2));
        assert_eq!(first.get(&RequestType::BulkyItems), Some(&1));
        assert!(!first.contains_key(&RequestType::Feedback));

        let second = counts.district(&DistrictId::from(2)).unwrap();
        assert_eq!(second.get(&RequestType::Feedback), Some(&1));
    }

    #[test]
    fn out_of_district_features_contribute_nothing() {
        let index = LayerIndex::build(
            LayerId::NeighborhoodCouncil,
            vec![square_district(1, 0.0, 5.0)],
        )
        .unwrap();

        let counts = layer_counts(&[feature(RequestType::Other, 50.0, 50.0)], &index);

        assert!(counts.is_empty());
    }
}
