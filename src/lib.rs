//! Facade crate for the footprint polygon engine.
//!
//! This crate re-exports the core domain types together with the Overpass
//! client, repository, and service implementations so applications can depend
//! on a single package.

#![forbid(unsafe_code)]

pub use footprint_core::{
    BoundingBox, Polygon, PolygonKind, PolygonStatistics, PolygonStore, filter_by_area,
    filter_by_tag_value, statistics, to_feature_collection,
};

pub use footprint_data::overpass::{
    OverpassClient, OverpassConfig, OverpassError, OverpassTransport, TransportError,
};
pub use footprint_data::repository::{
    OverpassPolygonRepository, ParseError, RepositoryError, parse_element,
};
pub use footprint_data::service::PolygonService;
