//! Test utilities for the Overpass client.
//!
//! [`ScriptedTransport`] is a deterministic double for
//! [`OverpassTransport`]: it serves pre-scripted fetch outcomes in order
//! and records every request and backoff pause instead of performing I/O
//! or sleeping.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::time::Duration;

use super::error::TransportError;
use super::transport::{FetchResponse, OverpassTransport};

/// One recorded fetch invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedFetch {
    /// Endpoint the client contacted.
    pub url: String,
    /// Overpass QL text sent.
    pub query: String,
    /// Per-attempt timeout supplied by the client.
    pub timeout: Duration,
}

/// Scripted `OverpassTransport` double.
///
/// # Example
///
/// ```
/// use footprint_data::overpass::test_support::ScriptedTransport;
/// use footprint_data::overpass::{OverpassClient, OverpassConfig};
///
/// let transport = ScriptedTransport::with_outcomes([
///     ScriptedTransport::network_error("connection refused"),
///     ScriptedTransport::ok(r#"{"elements": []}"#),
/// ]);
/// let client = OverpassClient::with_transport(OverpassConfig::default(), transport);
///
/// let response = client.query("node;out count;").unwrap();
/// assert!(response.elements.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    outcomes: RefCell<VecDeque<Result<FetchResponse, TransportError>>>,
    fetches: RefCell<Vec<RecordedFetch>>,
    pauses: RefCell<Vec<Duration>>,
}

impl ScriptedTransport {
    /// Queue fetch outcomes served in order.
    ///
    /// Once the script is exhausted, further fetches fail with a network
    /// error.
    pub fn with_outcomes<I>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = Result<FetchResponse, TransportError>>,
    {
        Self {
            outcomes: RefCell::new(outcomes.into_iter().collect()),
            fetches: RefCell::new(Vec::new()),
            pauses: RefCell::new(Vec::new()),
        }
    }

    /// Shorthand for a transport serving a single 200 response.
    #[must_use]
    pub fn with_json(body: &str) -> Self {
        Self::with_outcomes([Self::ok(body)])
    }

    /// A successful 200 outcome with the given body.
    #[must_use]
    pub fn ok(body: &str) -> Result<FetchResponse, TransportError> {
        Ok(FetchResponse {
            status: 200,
            body: body.as_bytes().to_vec(),
        })
    }

    /// A completed request with an arbitrary status and empty body.
    #[must_use]
    pub fn status(status: u16) -> Result<FetchResponse, TransportError> {
        Ok(FetchResponse {
            status,
            body: Vec::new(),
        })
    }

    /// A failed request with a network error.
    #[must_use]
    pub fn network_error(message: &str) -> Result<FetchResponse, TransportError> {
        Err(TransportError::Network {
            url: "scripted".to_owned(),
            message: message.to_owned(),
        })
    }

    /// A failed request with a timeout.
    #[must_use]
    pub fn timeout(timeout_secs: u64) -> Result<FetchResponse, TransportError> {
        Err(TransportError::Timeout {
            url: "scripted".to_owned(),
            timeout_secs,
        })
    }

    /// Every fetch the client issued, in order.
    #[must_use]
    pub fn fetches(&self) -> Vec<RecordedFetch> {
        self.fetches.borrow().clone()
    }

    /// Every backoff pause the client requested, in order.
    #[must_use]
    pub fn pauses(&self) -> Vec<Duration> {
        self.pauses.borrow().clone()
    }
}

impl OverpassTransport for ScriptedTransport {
    fn fetch(
        &self,
        url: &str,
        query: &str,
        timeout: Duration,
    ) -> Result<FetchResponse, TransportError> {
        self.fetches.borrow_mut().push(RecordedFetch {
            url: url.to_owned(),
            query: query.to_owned(),
            timeout,
        });
        self.outcomes.borrow_mut().pop_front().unwrap_or_else(|| {
            Err(TransportError::Network {
                url: url.to_owned(),
                message: "transport script exhausted".to_owned(),
            })
        })
    }

    fn pause(&self, delay: Duration) {
        self.pauses.borrow_mut().push(delay);
    }
}
