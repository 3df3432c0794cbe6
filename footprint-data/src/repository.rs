//! Polygon retrieval over Overpass with an identity-keyed cache.
//!
//! [`OverpassPolygonRepository`] orchestrates the fetch → parse → cache
//! pipeline: it validates the query extent, executes the query through an
//! [`OverpassClient`], converts returned elements into domain polygons,
//! and upserts every successfully parsed polygon into an in-memory cache
//! as a side effect of the fetch.
//!
//! The cache is plain single-threaded mutable state with no bound, TTL,
//! or eviction policy; callers needing concurrent access add their own
//! exclusion around the repository.

use std::collections::HashMap;

use geo::Coord;
use log::warn;
use thiserror::Error;

use footprint_core::{BoundingBox, Polygon, PolygonKind, PolygonStore};

use crate::overpass::{
    HttpTransport, OverpassClient, OverpassError, OverpassTransport, RawElement, relation_query,
    way_query,
};

/// Tag filter applied to way queries when the caller supplies none.
const DEFAULT_WAY_TAGS: &[(&str, &str)] = &[("building", "yes")];

/// Tag filter applied to relation queries when the caller supplies none.
const DEFAULT_RELATION_TAGS: &[(&str, &str)] = &[("boundary", "administrative")];

/// Errors surfaced by repository queries.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The supplied extent fails validation. Raised before any network
    /// activity and never retried.
    #[error("invalid bounding box {bbox}")]
    InvalidBoundingBox {
        /// The rejected extent.
        bbox: BoundingBox,
    },
    /// The operation is not meaningful for an Overpass-backed store.
    #[error("{operation} is unsupported: {reason}")]
    Unsupported {
        /// Name of the refused operation.
        operation: &'static str,
        /// Why the operation is not offered.
        reason: &'static str,
    },
    /// The Overpass client failed after exhausting its retry budget.
    #[error(transparent)]
    Overpass(#[from] OverpassError),
}

/// Per-element parse failure.
///
/// Recoverable: the offending element is dropped with a warning and its
/// siblings continue through the batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The element carried no usable geometry.
    #[error("element {id} has no geometry")]
    NoGeometry {
        /// OSM identifier of the dropped element.
        id: i64,
    },
}

/// Convert one raw Overpass element into a [`Polygon`].
///
/// Geometry points project to `Coord { x: lon, y: lat }`: the axis order
/// is intentionally swapped relative to the wire field names to match
/// GeoJSON position order. Way polygons are closed before returning;
/// relations are left exactly as received.
///
/// # Errors
///
/// Returns [`ParseError::NoGeometry`] when the element has no geometry or
/// an empty vertex list.
pub fn parse_element(element: &RawElement, kind: PolygonKind) -> Result<Polygon, ParseError> {
    let coordinates: Vec<Coord<f64>> = element
        .geometry
        .iter()
        .map(|point| Coord {
            x: point.lon,
            y: point.lat,
        })
        .collect();
    if coordinates.is_empty() {
        return Err(ParseError::NoGeometry { id: element.id });
    }

    let mut polygon = Polygon::new(element.id, kind, coordinates, element.tags.clone());
    if kind == PolygonKind::Way {
        polygon.close();
    }
    Ok(polygon)
}

/// Overpass-backed polygon repository.
///
/// Query methods populate the cache as a side effect: every successfully
/// parsed polygon is upserted under its OSM id (last write wins) and also
/// returned to the caller in the order the service produced it. Cached
/// entries survive until [`PolygonStore::delete`] or
/// [`PolygonStore::clear`].
#[derive(Debug)]
pub struct OverpassPolygonRepository<T = HttpTransport> {
    client: OverpassClient<T>,
    cache: HashMap<i64, Polygon>,
}

impl<T: OverpassTransport> OverpassPolygonRepository<T> {
    /// Create a repository over the given client.
    #[must_use]
    pub fn new(client: OverpassClient<T>) -> Self {
        Self {
            client,
            cache: HashMap::new(),
        }
    }

    /// Whether the configured endpoint currently answers probe queries.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.client.is_available()
    }

    /// Fetch way polygons within `bbox`.
    ///
    /// Defaults to the `building=yes` filter when `tags` is `None`.
    /// Elements that fail to parse are dropped with a warning; a client
    /// failure after retry exhaustion degrades to an empty result.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::InvalidBoundingBox`], the only failure
    /// that propagates, before any network activity.
    pub fn find_ways(
        &mut self,
        bbox: &BoundingBox,
        tags: Option<&[(&str, &str)]>,
    ) -> Result<Vec<Polygon>, RepositoryError> {
        if !bbox.is_valid() {
            return Err(RepositoryError::InvalidBoundingBox { bbox: *bbox });
        }

        let query = way_query(bbox, tags.unwrap_or(DEFAULT_WAY_TAGS));
        Ok(self.query_and_parse(&query, PolygonKind::Way))
    }

    /// Fetch relation polygons within `bbox`. Always empty.
    ///
    /// Relations need multipolygon assembly (outer/inner ring resolution)
    /// that this repository deliberately does not implement. The query is
    /// still issued as a count so the extent is exercised against the
    /// service, but no geometry is requested and no polygons are returned.
    /// Defaults to the `boundary=administrative` filter when `tags` is
    /// `None`.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::InvalidBoundingBox`] for an invalid
    /// extent, or [`RepositoryError::Overpass`] when the count query
    /// itself fails after retry exhaustion.
    pub fn find_relations(
        &mut self,
        bbox: &BoundingBox,
        tags: Option<&[(&str, &str)]>,
    ) -> Result<Vec<Polygon>, RepositoryError> {
        if !bbox.is_valid() {
            return Err(RepositoryError::InvalidBoundingBox { bbox: *bbox });
        }

        let query = relation_query(bbox, tags.unwrap_or(DEFAULT_RELATION_TAGS));
        self.client.query(&query)?;
        Ok(Vec::new())
    }

    /// Fetch way polygons within `bbox` matching a mandatory tag filter.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::InvalidBoundingBox`] for an invalid
    /// extent.
    pub fn find_by_tags(
        &mut self,
        bbox: &BoundingBox,
        tags: &[(&str, &str)],
    ) -> Result<Vec<Polygon>, RepositoryError> {
        self.find_ways(bbox, Some(tags))
    }

    /// Bulk enumeration is not offered by this repository.
    ///
    /// Polygons only enter the store through a bounded query, so "all
    /// polygons" has no meaningful answer against a planet-scale source.
    /// The refusal is deliberate API surface, kept distinct so callers can
    /// tell it apart from an empty query result.
    ///
    /// # Errors
    ///
    /// Always returns [`RepositoryError::Unsupported`].
    pub fn find_all(&self) -> Result<Vec<Polygon>, RepositoryError> {
        Err(RepositoryError::Unsupported {
            operation: "find_all",
            reason: "polygons only enter the store through a bounded query; \
                     use find_ways with a bounding box",
        })
    }

    fn query_and_parse(&mut self, query: &str, kind: PolygonKind) -> Vec<Polygon> {
        let response = match self.client.query(query) {
            Ok(response) => response,
            Err(err) => {
                warn!("overpass query failed, returning no polygons: {err}");
                return Vec::new();
            }
        };

        let mut polygons = Vec::new();
        for element in &response.elements {
            if element.kind != kind.as_str() {
                continue;
            }
            match parse_element(element, kind) {
                Ok(polygon) => {
                    self.save(polygon.clone());
                    polygons.push(polygon);
                }
                Err(err) => warn!("skipping unparseable element: {err}"),
            }
        }
        polygons
    }
}

impl<T: OverpassTransport> PolygonStore for OverpassPolygonRepository<T> {
    fn find_by_id(&self, osm_id: i64) -> Option<Polygon> {
        self.cache.get(&osm_id).cloned()
    }

    fn save(&mut self, polygon: Polygon) -> Polygon {
        self.cache.insert(polygon.osm_id, polygon.clone());
        polygon
    }

    fn delete(&mut self, osm_id: i64) -> bool {
        self.cache.remove(&osm_id).is_some()
    }

    fn clear(&mut self) {
        self.cache.clear();
    }

    fn len(&self) -> usize {
        self.cache.len()
    }
}
