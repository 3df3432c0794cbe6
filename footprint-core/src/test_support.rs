//! Test-only, in-memory `PolygonStore` implementation and polygon builders
//! used by unit and behaviour tests.

use std::collections::HashMap;

use geo::Coord;

use crate::{Polygon, PolygonKind, PolygonStore};

/// In-memory `PolygonStore` implementation used in tests.
#[derive(Default, Debug)]
pub struct MemoryPolygonStore {
    polygons: HashMap<i64, Polygon>,
}

impl MemoryPolygonStore {
    /// Create a store containing a single polygon.
    #[must_use]
    pub fn with_polygon(polygon: Polygon) -> Self {
        Self::with_polygons(std::iter::once(polygon))
    }

    /// Create a store from a collection of polygons.
    pub fn with_polygons<I>(polygons: I) -> Self
    where
        I: IntoIterator<Item = Polygon>,
    {
        Self {
            polygons: polygons
                .into_iter()
                .map(|polygon| (polygon.osm_id, polygon))
                .collect(),
        }
    }
}

impl PolygonStore for MemoryPolygonStore {
    fn find_by_id(&self, osm_id: i64) -> Option<Polygon> {
        self.polygons.get(&osm_id).cloned()
    }

    fn save(&mut self, polygon: Polygon) -> Polygon {
        self.polygons.insert(polygon.osm_id, polygon.clone());
        polygon
    }

    fn delete(&mut self, osm_id: i64) -> bool {
        self.polygons.remove(&osm_id).is_some()
    }

    fn clear(&mut self) {
        self.polygons.clear();
    }

    fn len(&self) -> usize {
        self.polygons.len()
    }
}

/// A closed axis-aligned square way with its south-west corner at the
/// origin and the given side length in degrees.
#[must_use]
pub fn square(osm_id: i64, side: f64) -> Polygon {
    Polygon::new(
        osm_id,
        PolygonKind::Way,
        vec![
            Coord { x: 0.0, y: 0.0 },
            Coord { x: side, y: 0.0 },
            Coord { x: side, y: side },
            Coord { x: 0.0, y: side },
            Coord { x: 0.0, y: 0.0 },
        ],
        HashMap::new(),
    )
}

/// A closed unit square way with area exactly `1.0` square degrees.
#[must_use]
pub fn unit_square(osm_id: i64) -> Polygon {
    square(osm_id, 1.0)
}
