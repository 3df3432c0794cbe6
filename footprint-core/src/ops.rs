//! Pure operations over polygon collections.
//!
//! All functions here are side-effect free: they borrow a slice of
//! polygons and return fresh values, leaving the inputs untouched.

use geojson::FeatureCollection;

use crate::Polygon;

/// Aggregate area figures for a polygon collection.
///
/// Every field is zero for an empty collection.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PolygonStatistics {
    /// Number of polygons.
    pub count: usize,
    /// Mean area in square degrees.
    pub avg_area: f64,
    /// Smallest area in square degrees.
    pub min_area: f64,
    /// Largest area in square degrees.
    pub max_area: f64,
    /// Sum of all areas in square degrees.
    pub total_area: f64,
}

/// Keep polygons whose area is at least `min_area` and, when `max_area`
/// is given, at most `max_area`.
///
/// Areas are planar square degrees as computed by [`Polygon::area`]; open
/// polygons have area zero and only survive a zero `min_area`.
#[must_use]
pub fn filter_by_area(polygons: &[Polygon], min_area: f64, max_area: Option<f64>) -> Vec<Polygon> {
    polygons
        .iter()
        .filter(|polygon| polygon.area() >= min_area)
        .filter(|polygon| max_area.is_none_or(|max| polygon.area() <= max))
        .cloned()
        .collect()
}

/// Keep polygons whose tags contain exactly `key = value`.
///
/// Polygons without the key are excluded.
#[must_use]
pub fn filter_by_tag_value(polygons: &[Polygon], key: &str, value: &str) -> Vec<Polygon> {
    polygons
        .iter()
        .filter(|polygon| polygon.tags.get(key).is_some_and(|tag| tag == value))
        .cloned()
        .collect()
}

/// Serialise a polygon collection to an RFC 7946 `FeatureCollection`.
///
/// One `Feature` per polygon, in input order; see [`Polygon::to_feature`]
/// for the per-feature property merge rules.
#[must_use]
pub fn to_feature_collection(polygons: &[Polygon]) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: polygons.iter().map(Polygon::to_feature).collect(),
        foreign_members: None,
    }
}

/// Compute aggregate area statistics for a polygon collection.
#[must_use]
pub fn statistics(polygons: &[Polygon]) -> PolygonStatistics {
    if polygons.is_empty() {
        return PolygonStatistics::default();
    }

    let areas: Vec<f64> = polygons.iter().map(Polygon::area).collect();
    let total_area: f64 = areas.iter().sum();
    let min_area = areas.iter().copied().fold(f64::INFINITY, f64::min);
    let max_area = areas.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    PolygonStatistics {
        count: polygons.len(),
        avg_area: total_area / polygons.len() as f64,
        min_area,
        max_area,
        total_area,
    }
}
