//! Domain-level conveniences over the polygon repository.
//!
//! [`PolygonService`] names the common queries (buildings, industrial
//! zones, water areas, parks) and re-exposes the pure collection
//! operations so applications talk to one surface.

use geojson::FeatureCollection;

use footprint_core::{
    BoundingBox, Polygon, PolygonStatistics, filter_by_area, filter_by_tag_value, statistics,
    to_feature_collection,
};

use crate::overpass::{HttpTransport, OverpassTransport};
use crate::repository::{OverpassPolygonRepository, RepositoryError};

/// High-level polygon operations for common OSM categories.
///
/// # Examples
///
/// ```no_run
/// use footprint_core::BoundingBox;
/// use footprint_data::overpass::{OverpassClient, OverpassConfig};
/// use footprint_data::{OverpassPolygonRepository, PolygonService};
///
/// let client = OverpassClient::new(OverpassConfig::default())?;
/// let mut service = PolygonService::new(OverpassPolygonRepository::new(client));
///
/// let bbox = BoundingBox::new(48.81, 2.22, 48.9, 2.47);
/// let buildings = service.buildings(&bbox)?;
/// let stats = service.statistics(&buildings);
/// println!("{} buildings, {} deg^2 total", stats.count, stats.total_area);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct PolygonService<T = HttpTransport> {
    repository: OverpassPolygonRepository<T>,
}

impl<T: OverpassTransport> PolygonService<T> {
    /// Create a service over the given repository.
    #[must_use]
    pub fn new(repository: OverpassPolygonRepository<T>) -> Self {
        Self { repository }
    }

    /// Shared access to the underlying repository and its cache.
    #[must_use]
    pub fn repository(&self) -> &OverpassPolygonRepository<T> {
        &self.repository
    }

    /// Exclusive access to the underlying repository and its cache.
    pub fn repository_mut(&mut self) -> &mut OverpassPolygonRepository<T> {
        &mut self.repository
    }

    /// Buildings (`building=yes`) within `bbox`.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::InvalidBoundingBox`] for an invalid
    /// extent.
    pub fn buildings(&mut self, bbox: &BoundingBox) -> Result<Vec<Polygon>, RepositoryError> {
        self.repository.find_ways(bbox, Some(&[("building", "yes")]))
    }

    /// Industrial zones (`landuse=industrial`) within `bbox`.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::InvalidBoundingBox`] for an invalid
    /// extent.
    pub fn industrial_zones(
        &mut self,
        bbox: &BoundingBox,
    ) -> Result<Vec<Polygon>, RepositoryError> {
        self.repository
            .find_ways(bbox, Some(&[("landuse", "industrial")]))
    }

    /// Water areas (`natural=water`) within `bbox`.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::InvalidBoundingBox`] for an invalid
    /// extent.
    pub fn water_areas(&mut self, bbox: &BoundingBox) -> Result<Vec<Polygon>, RepositoryError> {
        self.repository.find_ways(bbox, Some(&[("natural", "water")]))
    }

    /// Parks (`leisure=park`) within `bbox`.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::InvalidBoundingBox`] for an invalid
    /// extent.
    pub fn parks(&mut self, bbox: &BoundingBox) -> Result<Vec<Polygon>, RepositoryError> {
        self.repository.find_ways(bbox, Some(&[("leisure", "park")]))
    }

    /// Way polygons within `bbox` matching a caller-supplied tag filter.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::InvalidBoundingBox`] for an invalid
    /// extent.
    pub fn polygons_by_tags(
        &mut self,
        bbox: &BoundingBox,
        tags: &[(&str, &str)],
    ) -> Result<Vec<Polygon>, RepositoryError> {
        self.repository.find_by_tags(bbox, tags)
    }

    /// Keep polygons within the given area bounds.
    #[must_use]
    pub fn filter_by_area(
        &self,
        polygons: &[Polygon],
        min_area: f64,
        max_area: Option<f64>,
    ) -> Vec<Polygon> {
        filter_by_area(polygons, min_area, max_area)
    }

    /// Keep polygons whose tags contain exactly `key = value`.
    #[must_use]
    pub fn filter_by_tag_value(
        &self,
        polygons: &[Polygon],
        key: &str,
        value: &str,
    ) -> Vec<Polygon> {
        filter_by_tag_value(polygons, key, value)
    }

    /// Serialise polygons to a GeoJSON `FeatureCollection`.
    #[must_use]
    pub fn to_feature_collection(&self, polygons: &[Polygon]) -> FeatureCollection {
        to_feature_collection(polygons)
    }

    /// Aggregate area statistics for a polygon collection.
    #[must_use]
    pub fn statistics(&self, polygons: &[Polygon]) -> PolygonStatistics {
        statistics(polygons)
    }
}
