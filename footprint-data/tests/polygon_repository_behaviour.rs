//! Behavioural tests for the Overpass polygon repository: fetch → parse →
//! cache orchestration and the store contract.

use footprint_core::{BoundingBox, PolygonStore};
use footprint_data::overpass::test_support::ScriptedTransport;
use footprint_data::overpass::{OverpassClient, OverpassConfig};
use footprint_data::repository::{OverpassPolygonRepository, RepositoryError};
use rstest::{fixture, rstest};

fn repository(
    transport: &ScriptedTransport,
) -> OverpassPolygonRepository<&ScriptedTransport> {
    let client = OverpassClient::with_transport(
        OverpassConfig::new("http://localhost:12345/api/interpreter"),
        transport,
    );
    OverpassPolygonRepository::new(client)
}

#[fixture]
fn bbox() -> BoundingBox {
    BoundingBox::new(48.81, 2.22, 48.9, 2.47)
}

/// Two parseable ways around a node and a geometry-less way.
const MIXED_BODY: &str = r#"{
    "elements": [
        {
            "type": "way", "id": 101, "tags": {"building": "yes"},
            "geometry": [
                {"lat": 48.81, "lon": 2.25},
                {"lat": 48.81, "lon": 2.26},
                {"lat": 48.82, "lon": 2.26}
            ]
        },
        {"type": "node", "id": 55},
        {"type": "way", "id": 102, "tags": {"building": "yes"}},
        {
            "type": "way", "id": 103,
            "geometry": [
                {"lat": 48.83, "lon": 2.3},
                {"lat": 48.83, "lon": 2.31},
                {"lat": 48.84, "lon": 2.31},
                {"lat": 48.83, "lon": 2.3}
            ]
        }
    ]
}"#;

#[rstest]
fn find_ways_parses_caches_and_preserves_service_order(bbox: BoundingBox) {
    let transport = ScriptedTransport::with_json(MIXED_BODY);
    let mut repository = repository(&transport);

    let polygons = repository.find_ways(&bbox, None).expect("bbox is valid");

    // The node and the geometry-less way are skipped; order follows the
    // service response.
    let ids: Vec<i64> = polygons.iter().map(|polygon| polygon.osm_id).collect();
    assert_eq!(ids, vec![101, 103]);
    assert!(polygons.iter().all(footprint_core::Polygon::is_closed));

    assert_eq!(repository.len(), 2);
    let cached = repository.find_by_id(101).expect("way 101 should be cached");
    assert_eq!(
        cached.tags.get("building").map(String::as_str),
        Some("yes")
    );
    assert_eq!(repository.find_by_id(102), None);
}

#[rstest]
fn find_ways_defaults_to_the_building_filter(bbox: BoundingBox) {
    let transport = ScriptedTransport::with_json(r#"{"elements": []}"#);
    let mut repository = repository(&transport);

    repository.find_ways(&bbox, None).expect("bbox is valid");

    let fetches = transport.fetches();
    assert!(fetches[0].query.contains(r#"way["building"="yes"]"#));
    assert!(fetches[0].query.contains("out geom;"));
}

#[rstest]
fn find_ways_uses_the_supplied_tag_filter(bbox: BoundingBox) {
    let transport = ScriptedTransport::with_json(r#"{"elements": []}"#);
    let mut repository = repository(&transport);

    repository
        .find_ways(&bbox, Some(&[("leisure", "park"), ("access", "yes")]))
        .expect("bbox is valid");

    let fetches = transport.fetches();
    assert!(
        fetches[0]
            .query
            .contains(r#"way["leisure"="park"]["access"="yes"]"#)
    );
}

#[rstest]
fn an_invalid_bbox_fails_before_any_network_activity() {
    let transport = ScriptedTransport::default();
    let mut repository = repository(&transport);
    let inverted = BoundingBox::new(48.9, 2.22, 48.81, 2.47);

    let err = repository
        .find_ways(&inverted, None)
        .expect_err("inverted extent should be rejected");

    assert!(matches!(err, RepositoryError::InvalidBoundingBox { .. }));
    assert!(transport.fetches().is_empty());
}

#[rstest]
fn transport_exhaustion_degrades_to_an_empty_result(bbox: BoundingBox) {
    let transport = ScriptedTransport::with_outcomes([
        ScriptedTransport::network_error("down"),
        ScriptedTransport::network_error("down"),
        ScriptedTransport::network_error("down"),
    ]);
    let mut repository = repository(&transport);

    let polygons = repository.find_ways(&bbox, None).expect("bbox is valid");

    assert!(polygons.is_empty());
    assert_eq!(repository.len(), 0);
    assert_eq!(transport.fetches().len(), 3);
}

#[rstest]
fn find_relations_is_always_empty_even_with_elements_in_the_response(bbox: BoundingBox) {
    let transport = ScriptedTransport::with_json(
        r#"{
            "elements": [
                {
                    "type": "relation", "id": 9001,
                    "tags": {"boundary": "administrative"},
                    "geometry": [
                        {"lat": 48.81, "lon": 2.25},
                        {"lat": 48.81, "lon": 2.26},
                        {"lat": 48.82, "lon": 2.26}
                    ]
                }
            ]
        }"#,
    );
    let mut repository = repository(&transport);

    let polygons = repository
        .find_relations(&bbox, None)
        .expect("bbox is valid");

    assert!(polygons.is_empty());
    assert_eq!(repository.len(), 0);

    let fetches = transport.fetches();
    assert!(
        fetches[0]
            .query
            .contains(r#"relation["boundary"="administrative"]"#)
    );
    assert!(fetches[0].query.contains("out count;"));
    assert!(!fetches[0].query.contains("out geom"));
}

#[rstest]
fn find_relations_rejects_an_invalid_bbox() {
    let transport = ScriptedTransport::default();
    let mut repository = repository(&transport);
    let inverted = BoundingBox::new(48.9, 2.22, 48.81, 2.47);

    let err = repository
        .find_relations(&inverted, None)
        .expect_err("inverted extent should be rejected");

    assert!(matches!(err, RepositoryError::InvalidBoundingBox { .. }));
    assert!(transport.fetches().is_empty());
}

#[rstest]
fn find_relations_propagates_a_client_failure(bbox: BoundingBox) {
    let transport = ScriptedTransport::with_outcomes([
        ScriptedTransport::network_error("down"),
        ScriptedTransport::network_error("down"),
        ScriptedTransport::network_error("down"),
    ]);
    let mut repository = repository(&transport);

    let err = repository
        .find_relations(&bbox, None)
        .expect_err("count query failure should propagate");

    assert!(matches!(err, RepositoryError::Overpass(_)));
}

#[rstest]
fn find_by_tags_is_a_way_query_with_mandatory_tags(bbox: BoundingBox) {
    let transport = ScriptedTransport::with_json(r#"{"elements": []}"#);
    let mut repository = repository(&transport);

    repository
        .find_by_tags(&bbox, &[("natural", "water")])
        .expect("bbox is valid");

    let fetches = transport.fetches();
    assert!(fetches[0].query.contains(r#"way["natural"="water"]"#));
}

#[rstest]
fn find_all_signals_a_distinct_unsupported_operation() {
    let transport = ScriptedTransport::default();
    let repository = repository(&transport);

    let err = repository.find_all().expect_err("find_all is unsupported");

    match err {
        RepositoryError::Unsupported { operation, .. } => assert_eq!(operation, "find_all"),
        other => panic!("expected Unsupported, got {other:?}"),
    }
    assert!(transport.fetches().is_empty());
}

#[rstest]
fn cache_upserts_overwrite_and_deletes_report_presence(bbox: BoundingBox) {
    let transport = ScriptedTransport::with_json(MIXED_BODY);
    let mut repository = repository(&transport);
    repository.find_ways(&bbox, None).expect("bbox is valid");

    let mut replacement = repository.find_by_id(101).expect("cached");
    replacement.tags.insert("building".into(), "church".into());
    repository.save(replacement);

    assert_eq!(repository.len(), 2);
    let stored = repository.find_by_id(101).expect("still cached");
    assert_eq!(
        stored.tags.get("building").map(String::as_str),
        Some("church")
    );

    assert!(repository.delete(101));
    assert!(!repository.delete(101));
    assert!(!repository.delete(424242));

    repository.clear();
    assert!(repository.is_empty());
}

#[rstest]
fn refetching_an_id_overwrites_the_cached_entry(bbox: BoundingBox) {
    let first = r#"{
        "elements": [{
            "type": "way", "id": 101, "tags": {"building": "yes"},
            "geometry": [
                {"lat": 48.81, "lon": 2.25},
                {"lat": 48.81, "lon": 2.26},
                {"lat": 48.82, "lon": 2.26}
            ]
        }]
    }"#;
    let second = r#"{
        "elements": [{
            "type": "way", "id": 101, "tags": {"building": "retail"},
            "geometry": [
                {"lat": 48.81, "lon": 2.25},
                {"lat": 48.81, "lon": 2.26},
                {"lat": 48.82, "lon": 2.26}
            ]
        }]
    }"#;
    let transport = ScriptedTransport::with_outcomes([
        ScriptedTransport::ok(first),
        ScriptedTransport::ok(second),
    ]);
    let mut repository = repository(&transport);

    repository.find_ways(&bbox, None).expect("bbox is valid");
    repository.find_ways(&bbox, None).expect("bbox is valid");

    assert_eq!(repository.len(), 1);
    let stored = repository.find_by_id(101).expect("cached");
    assert_eq!(
        stored.tags.get("building").map(String::as_str),
        Some("retail")
    );
}
