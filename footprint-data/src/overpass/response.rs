//! Overpass API response types.
//!
//! Deserialisation types for the JSON document returned by the Overpass
//! interpreter. Fields that the service omits (tags on untagged elements,
//! geometry on count summaries) default to empty so that both geometry and
//! count-only responses parse with the same types.
//!
//! See: <https://wiki.openstreetmap.org/wiki/Overpass_API>

use std::collections::HashMap;

use serde::Deserialize;

/// Top-level Overpass response document.
#[derive(Debug, Clone, Deserialize)]
pub struct OverpassResponse {
    /// Returned elements, in service order.
    #[serde(default)]
    pub elements: Vec<RawElement>,
}

/// One raw element of an Overpass response.
#[derive(Debug, Clone, Deserialize)]
pub struct RawElement {
    /// Element kind as reported by the service: `"way"`, `"relation"`,
    /// `"node"`, or `"count"` for count summaries.
    #[serde(rename = "type")]
    pub kind: String,
    /// OSM identifier. Count summaries carry `0`.
    #[serde(default)]
    pub id: i64,
    /// OSM tags; empty when the element carries none.
    #[serde(default)]
    pub tags: HashMap<String, String>,
    /// Vertex list included by an `out geom` directive; empty otherwise.
    #[serde(default)]
    pub geometry: Vec<GeometryPoint>,
}

/// A single vertex of an element geometry, in the service's field order.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct GeometryPoint {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
}
