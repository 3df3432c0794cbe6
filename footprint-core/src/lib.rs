//! Core domain types for the footprint polygon engine.
//!
//! This crate holds the pure geometric and collection-level vocabulary:
//! bounding boxes, polygon records parsed from OpenStreetMap elements, the
//! [`PolygonStore`] access trait, and operations over polygon collections
//! (filtering, statistics, GeoJSON export). Nothing in here performs I/O;
//! network access lives in `footprint-data`.
//!
//! Coordinates are WGS84 degrees throughout, with `x = longitude` and
//! `y = latitude`. Area computations are planar (Shoelace over degrees),
//! sufficient for relative comparisons, not for surveying.

#![forbid(unsafe_code)]

mod bbox;
mod ops;
mod polygon;
mod store;

#[doc(hidden)]
pub mod test_support;

pub use bbox::BoundingBox;
pub use ops::{
    PolygonStatistics, filter_by_area, filter_by_tag_value, statistics, to_feature_collection,
};
pub use polygon::{Polygon, PolygonKind};
pub use store::PolygonStore;
