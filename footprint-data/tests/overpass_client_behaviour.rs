//! Behavioural tests for the Overpass client's retry contract.
//!
//! These use [`ScriptedTransport`] to verify attempt counts, backoff
//! delays, and error propagation without a network or wall-clock sleeps.

use std::time::Duration;

use footprint_data::overpass::test_support::ScriptedTransport;
use footprint_data::overpass::{
    OverpassClient, OverpassConfig, OverpassError, PROBE_QUERY, TransportError,
};
use rstest::{fixture, rstest};

const EMPTY_BODY: &str = r#"{"elements": []}"#;

#[fixture]
fn config() -> OverpassConfig {
    OverpassConfig::new("http://localhost:12345/api/interpreter")
}

#[rstest]
fn first_success_returns_immediately_without_pausing(config: OverpassConfig) {
    let transport = ScriptedTransport::with_json(EMPTY_BODY);
    let client = OverpassClient::with_transport(config, &transport);

    let response = client.query("node;out count;").expect("query should succeed");

    assert!(response.elements.is_empty());
    assert_eq!(transport.fetches().len(), 1);
    assert!(transport.pauses().is_empty());
}

#[rstest]
fn two_failures_then_success_makes_three_attempts_with_doubling_pauses(config: OverpassConfig) {
    let transport = ScriptedTransport::with_outcomes([
        ScriptedTransport::network_error("connection refused"),
        ScriptedTransport::network_error("connection refused"),
        ScriptedTransport::ok(EMPTY_BODY),
    ]);
    let client = OverpassClient::with_transport(
        config.with_max_retries(3).with_retry_delay(Duration::from_secs(1)),
        &transport,
    );

    client.query("node;out count;").expect("third attempt should succeed");

    assert_eq!(transport.fetches().len(), 3);
    assert_eq!(
        transport.pauses(),
        vec![Duration::from_secs(1), Duration::from_secs(2)]
    );
}

#[rstest]
fn exhaustion_surfaces_the_last_transport_error_unchanged(config: OverpassConfig) {
    let transport = ScriptedTransport::with_outcomes([
        ScriptedTransport::network_error("first failure"),
        ScriptedTransport::network_error("second failure"),
    ]);
    let client = OverpassClient::with_transport(config.with_max_retries(2), &transport);

    let err = client.query("node;out count;").expect_err("should exhaust");

    assert_eq!(transport.fetches().len(), 2);
    assert_eq!(transport.pauses(), vec![Duration::from_secs(1)]);
    match err {
        OverpassError::Transport(TransportError::Network { message, .. }) => {
            assert_eq!(message, "second failure");
        }
        other => panic!("expected the final network error, got {other:?}"),
    }
}

#[rstest]
fn a_single_attempt_budget_never_pauses(config: OverpassConfig) {
    let transport =
        ScriptedTransport::with_outcomes([ScriptedTransport::network_error("boom")]);
    let client = OverpassClient::with_transport(config.with_max_retries(1), &transport);

    let err = client.query("node;out count;").expect_err("should fail");

    assert!(matches!(err, OverpassError::Transport(_)));
    assert_eq!(transport.fetches().len(), 1);
    assert!(transport.pauses().is_empty());
}

#[rstest]
#[case::rate_limited(429)]
#[case::server_error(504)]
fn non_success_statuses_are_retried(config: OverpassConfig, #[case] status: u16) {
    let transport = ScriptedTransport::with_outcomes([
        ScriptedTransport::status(status),
        ScriptedTransport::ok(EMPTY_BODY),
    ]);
    let client = OverpassClient::with_transport(config, &transport);

    client.query("node;out count;").expect("retry should succeed");

    assert_eq!(transport.fetches().len(), 2);
    assert_eq!(transport.pauses(), vec![Duration::from_secs(1)]);
}

#[rstest]
fn undecodable_bodies_are_retried_and_surface_as_decode_errors(config: OverpassConfig) {
    let transport = ScriptedTransport::with_outcomes([
        ScriptedTransport::ok("<html>rate limited</html>"),
        ScriptedTransport::ok("<html>rate limited</html>"),
    ]);
    let client = OverpassClient::with_transport(config.with_max_retries(2), &transport);

    let err = client.query("node;out count;").expect_err("should exhaust");

    assert_eq!(transport.fetches().len(), 2);
    assert!(matches!(err, OverpassError::Decode { .. }));
}

#[rstest]
fn query_carries_the_configured_endpoint_timeout_and_text(config: OverpassConfig) {
    let transport = ScriptedTransport::with_json(EMPTY_BODY);
    let client = OverpassClient::with_transport(
        config.with_timeout(Duration::from_secs(45)),
        &transport,
    );

    client.query("node;out count;").expect("query should succeed");

    let fetches = transport.fetches();
    assert_eq!(fetches[0].url, "http://localhost:12345/api/interpreter");
    assert_eq!(fetches[0].timeout, Duration::from_secs(45));
    assert_eq!(fetches[0].query, "node;out count;");
}

#[rstest]
fn availability_probe_is_a_single_short_fetch(config: OverpassConfig) {
    let transport = ScriptedTransport::with_json(EMPTY_BODY);
    let client = OverpassClient::with_transport(config, &transport);

    assert!(client.is_available());

    let fetches = transport.fetches();
    assert_eq!(fetches.len(), 1);
    assert_eq!(fetches[0].query, PROBE_QUERY);
    // The probe timeout is fixed and independent of the retry policy.
    assert_eq!(fetches[0].timeout, Duration::from_secs(5));
    assert!(transport.pauses().is_empty());
}

#[rstest]
fn availability_probe_never_retries_on_failure(config: OverpassConfig) {
    let transport =
        ScriptedTransport::with_outcomes([ScriptedTransport::network_error("down")]);
    let client = OverpassClient::with_transport(config, &transport);

    assert!(!client.is_available());
    assert_eq!(transport.fetches().len(), 1);
    assert!(transport.pauses().is_empty());
}

#[rstest]
fn availability_probe_treats_non_success_status_as_unavailable(config: OverpassConfig) {
    let transport = ScriptedTransport::with_outcomes([ScriptedTransport::status(503)]);
    let client = OverpassClient::with_transport(config, &transport);

    assert!(!client.is_available());
}
