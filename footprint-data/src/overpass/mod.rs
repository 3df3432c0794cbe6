//! Overpass API client: configuration, retrying query execution, and the
//! transport seam it runs over.
//!
//! # Architecture
//!
//! The client executes Overpass QL text against an interpreter endpoint
//! through the blocking [`OverpassTransport`] trait. The bundled
//! [`HttpTransport`] bridges that trait over asynchronous reqwest calls;
//! everything above the seam (status interpretation, JSON decoding, the
//! retry loop with exponential backoff) is transport-agnostic and can be
//! exercised against a scripted transport.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use footprint_data::overpass::{OverpassClient, OverpassConfig, way_query};
//! use footprint_core::BoundingBox;
//!
//! let config = OverpassConfig::default().with_timeout(Duration::from_secs(60));
//! let client = OverpassClient::new(config)?;
//!
//! let bbox = BoundingBox::new(48.81, 2.22, 48.9, 2.47);
//! let response = client.query(&way_query(&bbox, &[("building", "yes")]))?;
//! println!("{} elements", response.elements.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod query;
mod response;
mod transport;

#[doc(hidden)]
pub mod test_support;

pub use error::{OverpassError, TransportError};
pub use query::{PROBE_QUERY, relation_query, tag_conditions, way_query};
pub use response::{GeometryPoint, OverpassResponse, RawElement};
pub use transport::{
    DEFAULT_USER_AGENT, FetchResponse, HttpTransport, OverpassTransport, TransportBuildError,
};

use std::time::Duration;

use log::warn;

/// Default interpreter endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://overpass-api.de/api/interpreter";

/// Default per-attempt request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default attempt budget per query, including the first attempt.
const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default wait before the second attempt.
const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Timeout for availability probes, independent of the retry policy.
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration for [`OverpassClient`].
///
/// Immutable per client instance: build the value up front and hand it to
/// the constructor. There is no process-wide default beyond
/// [`OverpassConfig::default`].
#[derive(Debug, Clone)]
pub struct OverpassConfig {
    /// Interpreter endpoint URL.
    pub url: String,
    /// Per-attempt request timeout.
    pub timeout: Duration,
    /// Total number of attempts per query, including the first. At least 1.
    pub max_retries: u32,
    /// Wait before the second attempt; doubles after each further failure.
    pub retry_delay: Duration,
}

impl Default for OverpassConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }
}

impl OverpassConfig {
    /// Create a configuration targeting the given endpoint, with defaults
    /// for everything else.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Set the per-attempt timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the attempt budget. Clamped to at least one attempt.
    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Set the wait before the second attempt.
    #[must_use]
    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }
}

/// Client for the Overpass interpreter endpoint.
///
/// Executes one logical request at a time: each call blocks the caller
/// through every attempt and backoff wait until the query succeeds or the
/// attempt budget is exhausted. Retries are strictly sequential: attempt
/// `n` completes or times out before attempt `n + 1` begins.
#[derive(Debug)]
pub struct OverpassClient<T = HttpTransport> {
    transport: T,
    config: OverpassConfig,
}

impl OverpassClient<HttpTransport> {
    /// Create a client over the bundled HTTP transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or its runtime fails to build.
    pub fn new(config: OverpassConfig) -> Result<Self, TransportBuildError> {
        Ok(Self {
            transport: HttpTransport::new()?,
            config,
        })
    }
}

impl<T: OverpassTransport> OverpassClient<T> {
    /// Create a client over a caller-supplied transport.
    #[must_use]
    pub fn with_transport(config: OverpassConfig, transport: T) -> Self {
        Self { transport, config }
    }

    /// The configuration this client was built with.
    #[must_use]
    pub fn config(&self) -> &OverpassConfig {
        &self.config
    }

    /// Execute one Overpass QL query with bounded retries.
    ///
    /// Each attempt issues one transport fetch with the configured
    /// timeout; a non-2xx status or an undecodable body counts as a failed
    /// attempt just like a transport error. After a failed attempt `n`
    /// (zero-based) with budget remaining, the client pauses
    /// `retry_delay * 2^n` and tries again. The first success returns
    /// immediately; once the budget is exhausted the last failure is
    /// returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns the final [`OverpassError`] after `max_retries` failed
    /// attempts.
    pub fn query(&self, overpass_ql: &str) -> Result<OverpassResponse, OverpassError> {
        let mut attempt = 0u32;
        loop {
            match self.attempt(overpass_ql) {
                Ok(response) => return Ok(response),
                Err(err) => {
                    if attempt + 1 >= self.config.max_retries {
                        warn!(
                            "overpass query failed after {} attempts: {err}",
                            self.config.max_retries
                        );
                        return Err(err);
                    }
                    let delay = self.config.retry_delay * 2u32.pow(attempt);
                    warn!(
                        "overpass attempt {} failed: {err}; retrying in {delay:?}",
                        attempt + 1
                    );
                    self.transport.pause(delay);
                    attempt += 1;
                }
            }
        }
    }

    fn attempt(&self, overpass_ql: &str) -> Result<OverpassResponse, OverpassError> {
        let response = self
            .transport
            .fetch(&self.config.url, overpass_ql, self.config.timeout)?;
        if !(200..300).contains(&response.status) {
            return Err(OverpassError::Status {
                url: self.config.url.clone(),
                status: response.status,
            });
        }
        serde_json::from_slice(&response.body).map_err(|source| OverpassError::Decode { source })
    }

    /// Probe the endpoint with a minimal query.
    ///
    /// Uses a short fixed timeout independent of the retry policy, never
    /// retries, and maps every failure to `false`.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.transport
            .fetch(&self.config.url, PROBE_QUERY, PROBE_TIMEOUT)
            .is_ok_and(|response| response.status == 200)
    }
}
