//! Error taxonomy for Overpass queries.

use thiserror::Error;

/// Failures raised by the transport collaborator.
///
/// Both variants are transient from the client's point of view and are
/// retried up to the configured attempt budget.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request exceeded its per-attempt timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Endpoint the request was sent to.
        url: String,
        /// The per-attempt timeout that elapsed, in seconds.
        timeout_secs: u64,
    },
    /// The request failed before an HTTP status was available.
    #[error("network error contacting {url}: {message}")]
    Network {
        /// Endpoint the request was sent to.
        url: String,
        /// Description of the underlying failure.
        message: String,
    },
}

/// Failures surfaced by [`crate::overpass::OverpassClient::query`].
///
/// Every variant is treated as a failed attempt by the retry loop; after
/// the attempt budget is exhausted the last failure is returned as-is.
#[derive(Debug, Error)]
pub enum OverpassError {
    /// The transport could not complete the request.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The service answered with a non-success HTTP status.
    #[error("{url} returned HTTP status {status}")]
    Status {
        /// Endpoint that produced the status.
        url: String,
        /// The non-2xx status code.
        status: u16,
    },
    /// The response body was not a valid Overpass JSON document.
    #[error("failed to decode Overpass response: {source}")]
    Decode {
        /// JSON decoding failure.
        #[source]
        source: serde_json::Error,
    },
}
