//! Overpass QL construction.
//!
//! The textual shape of these queries is part of the wire contract with
//! the interpreter endpoint: statement order and whitespace are kept
//! exactly as the service expects them.

use footprint_core::BoundingBox;

/// Minimal query used by availability probes.
pub const PROBE_QUERY: &str = "[bbox:0,0,0.1,0.1];node;out count;";

/// Concatenated `["key"="value"]` clauses in slice order.
///
/// No separator is emitted between clauses and no escaping is applied;
/// callers are responsible for supplying safe keys and values. Malformed
/// input produces a malformed but non-failing query string.
#[must_use]
pub fn tag_conditions(tags: &[(&str, &str)]) -> String {
    let mut conditions = String::new();
    for (key, value) in tags {
        conditions.push_str(&format!("[\"{key}\"=\"{value}\"]"));
    }
    conditions
}

/// Query for all way elements within `bbox` matching every tag condition,
/// with geometry included in the response.
#[must_use]
pub fn way_query(bbox: &BoundingBox, tags: &[(&str, &str)]) -> String {
    format!(
        "\n[bbox:{}];\n(\n  way{};\n);\nout geom;\n",
        bbox.to_overpass(),
        tag_conditions(tags),
    )
}

/// Count-only query for relation elements within `bbox` matching every
/// tag condition.
///
/// Relations are unsupported for geometry extraction, so no `out geom` is
/// requested and the response only carries a count summary.
#[must_use]
pub fn relation_query(bbox: &BoundingBox, tags: &[(&str, &str)]) -> String {
    format!(
        "\n[bbox:{}];\n(\n  relation{};\n);\nout count;\n",
        bbox.to_overpass(),
        tag_conditions(tags),
    )
}
