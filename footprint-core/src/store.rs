//! Data access trait for parsed polygons.
//!
//! The `PolygonStore` trait defines identity-keyed access to [`Polygon`]
//! values. Consumers use it to look up, upsert, and evict polygons that a
//! bounded query has already brought into memory.

use crate::Polygon;

/// Identity-keyed access to parsed polygons.
///
/// The capability set is deliberately narrow: point lookups by OSM id,
/// upserts, deletion, and eviction. Bulk enumeration is not part of the
/// contract: polygons only ever enter a store through a bounded query, so
/// "all polygons" is not a meaningful question to ask a store backed by a
/// planet-scale data source. Stores that could answer it anyway should
/// expose that capability separately rather than widen this trait.
///
/// Reads hand back clones. A caller may mutate its copy freely; the store's
/// entry changes only through [`PolygonStore::save`], where the last write
/// wins.
///
/// # Examples
///
/// ```rust
/// use std::collections::HashMap;
/// use footprint_core::{Polygon, PolygonStore};
///
/// #[derive(Default)]
/// struct MemoryStore {
///     polygons: HashMap<i64, Polygon>,
/// }
///
/// impl PolygonStore for MemoryStore {
///     fn find_by_id(&self, osm_id: i64) -> Option<Polygon> {
///         self.polygons.get(&osm_id).cloned()
///     }
///
///     fn save(&mut self, polygon: Polygon) -> Polygon {
///         self.polygons.insert(polygon.osm_id, polygon.clone());
///         polygon
///     }
///
///     fn delete(&mut self, osm_id: i64) -> bool {
///         self.polygons.remove(&osm_id).is_some()
///     }
///
///     fn clear(&mut self) {
///         self.polygons.clear();
///     }
///
///     fn len(&self) -> usize {
///         self.polygons.len()
///     }
/// }
/// ```
pub trait PolygonStore {
    /// Look up a polygon by OSM id, cloning the stored value.
    fn find_by_id(&self, osm_id: i64) -> Option<Polygon>;

    /// Upsert a polygon keyed by its `osm_id` and hand it back.
    ///
    /// An existing entry with the same id is replaced wholesale, not merged.
    fn save(&mut self, polygon: Polygon) -> Polygon;

    /// Remove a polygon by OSM id.
    ///
    /// Returns `true` iff an entry was present before deletion.
    fn delete(&mut self, osm_id: i64) -> bool;

    /// Remove every entry.
    fn clear(&mut self);

    /// Number of stored polygons.
    fn len(&self) -> usize;

    /// Whether the store holds no polygons.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
