//! Data access for the footprint polygon engine.
//!
//! Responsibilities:
//! - Build Overpass QL queries from validated extents and tag filters.
//! - Execute queries over a blocking transport with bounded retries.
//! - Parse returned elements into domain polygons and cache them.
//!
//! Boundaries:
//! - Domain rules (geometry, validity, statistics) live in `footprint-core`.
//! - HTTP mechanics stay behind the [`overpass::OverpassTransport`] seam.
//!
//! Invariants:
//! - One logical thread of control per request; retries are strictly
//!   sequential and no attempt starts before the previous one has ended.
//! - No global mutable state; configuration is threaded into constructors.

#![forbid(unsafe_code)]

pub mod overpass;
pub mod repository;
pub mod service;

pub use overpass::{OverpassClient, OverpassConfig};
pub use repository::OverpassPolygonRepository;
pub use service::PolygonService;
