//! Polygon records parsed from OpenStreetMap elements.

use std::collections::HashMap;
use std::fmt;

use geo::Coord;
use geojson::{Feature, Geometry, JsonObject, Value};

/// OSM primitive geometry kinds.
///
/// A way is an ordered point sequence; a relation may group multiple ways
/// or nodes. Relations are unsupported for geometry extraction here; see
/// the repository documentation in `footprint-data`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolygonKind {
    /// An ordered point sequence, closable into a ring.
    Way,
    /// A grouping of ways and nodes (multipolygon geometry not extracted).
    Relation,
    /// A single point.
    Node,
}

impl PolygonKind {
    /// The lowercase element `type` string used on the Overpass wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Way => "way",
            Self::Relation => "relation",
            Self::Node => "node",
        }
    }
}

impl fmt::Display for PolygonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A polygon extracted from one OSM element.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`. Tags
/// mirror OpenStreetMap's free-form key/value structure; `properties`
/// carries caller-attached values that surface in GeoJSON export.
///
/// A polygon counts as valid once it has at least three vertices and its
/// first vertex equals its last exactly (no epsilon tolerance).
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use geo::Coord;
/// use footprint_core::{Polygon, PolygonKind};
///
/// let mut polygon = Polygon::new(
///     123,
///     PolygonKind::Way,
///     vec![
///         Coord { x: 2.25, y: 48.81 },
///         Coord { x: 2.26, y: 48.81 },
///         Coord { x: 2.26, y: 48.82 },
///     ],
///     HashMap::from([("building".into(), "yes".into())]),
/// );
/// assert!(!polygon.is_closed());
/// polygon.close();
/// assert!(polygon.is_valid());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    /// Unique OpenStreetMap identifier.
    pub osm_id: i64,
    /// Geometry kind of the source element.
    pub kind: PolygonKind,
    /// Ring vertices, `x = longitude`, `y = latitude`.
    pub coordinates: Vec<Coord<f64>>,
    /// OSM tags of the source element.
    pub tags: HashMap<String, String>,
    /// Additional properties merged into GeoJSON output.
    pub properties: JsonObject,
}

impl Polygon {
    /// Construct a polygon with empty `properties`.
    #[must_use]
    pub fn new(
        osm_id: i64,
        kind: PolygonKind,
        coordinates: Vec<Coord<f64>>,
        tags: HashMap<String, String>,
    ) -> Self {
        Self {
            osm_id,
            kind,
            coordinates,
            tags,
            properties: JsonObject::new(),
        }
    }

    /// Whether the ring is explicitly closed.
    ///
    /// Requires at least three vertices and exact float equality between
    /// the first and last vertex.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        if self.coordinates.len() < 3 {
            return false;
        }
        self.coordinates.first() == self.coordinates.last()
    }

    /// Close the ring by appending the first vertex when it is open.
    ///
    /// Idempotent: closing an already-closed polygon changes nothing.
    pub fn close(&mut self) {
        if !self.is_closed() {
            if let Some(&first) = self.coordinates.first() {
                self.coordinates.push(first);
            }
        }
    }

    /// Whether the polygon is structurally valid: at least three vertices
    /// and explicitly closed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.is_closed()
    }

    /// Approximate area via the planar Shoelace formula, in square degrees.
    ///
    /// Longitude/latitude pairs are treated as Cartesian coordinates with no
    /// geodesic correction. Open polygons and polygons with fewer than
    /// three vertices have area `0.0`.
    #[must_use]
    pub fn area(&self) -> f64 {
        if !self.is_closed() {
            return 0.0;
        }
        let mut doubled = 0.0;
        for pair in self.coordinates.windows(2) {
            doubled += pair[0].x * pair[1].y - pair[1].x * pair[0].y;
        }
        (doubled / 2.0).abs()
    }

    /// Convert to a GeoJSON `Feature` wrapping a single ring.
    ///
    /// Properties are built by inserting the computed `osm_id` and `type`
    /// entries first, then the polygon's tags, then `properties`; later
    /// insertions override earlier ones on key collision.
    #[must_use]
    pub fn to_feature(&self) -> Feature {
        let ring: Vec<Vec<f64>> = self
            .coordinates
            .iter()
            .map(|vertex| vec![vertex.x, vertex.y])
            .collect();

        let mut properties = JsonObject::new();
        properties.insert("osm_id".to_owned(), serde_json::Value::from(self.osm_id));
        properties.insert(
            "type".to_owned(),
            serde_json::Value::from(self.kind.as_str()),
        );
        for (key, value) in &self.tags {
            properties.insert(key.clone(), serde_json::Value::from(value.clone()));
        }
        for (key, value) in &self.properties {
            properties.insert(key.clone(), value.clone());
        }

        Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::Polygon(vec![ring]))),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        }
    }
}
