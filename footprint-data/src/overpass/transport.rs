//! Blocking transport over the Overpass HTTP endpoint.

use std::thread;
use std::time::Duration;

use reqwest::Client;
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};

use super::error::TransportError;

/// Default user agent for Overpass requests.
pub const DEFAULT_USER_AGENT: &str = "footprint-engine/0.1";

/// Raw HTTP result handed back by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body bytes.
    pub body: Vec<u8>,
}

/// The single blocking call the query pipeline depends on.
///
/// One invocation of [`OverpassTransport::fetch`] issues one request and
/// blocks the caller until a response, a failure, or the timeout. Status
/// interpretation and body decoding are the client's concern; the
/// transport reports whatever the wire produced.
///
/// [`OverpassTransport::pause`] is the timed suspension between retry
/// attempts. The default blocks the calling thread; test doubles override
/// it to record the backoff sequence instead of sleeping.
pub trait OverpassTransport {
    /// Issue one blocking request carrying `query` to `url`.
    fn fetch(
        &self,
        url: &str,
        query: &str,
        timeout: Duration,
    ) -> Result<FetchResponse, TransportError>;

    /// Wait between retry attempts.
    fn pause(&self, delay: Duration) {
        thread::sleep(delay);
    }
}

impl<T: OverpassTransport + ?Sized> OverpassTransport for &T {
    fn fetch(
        &self,
        url: &str,
        query: &str,
        timeout: Duration,
    ) -> Result<FetchResponse, TransportError> {
        (**self).fetch(url, query, timeout)
    }

    fn pause(&self, delay: Duration) {
        (**self).pause(delay);
    }
}

/// Error type for [`HttpTransport`] construction failures.
#[derive(Debug, Error)]
pub enum TransportBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// reqwest-backed [`OverpassTransport`].
///
/// Sends `GET {url}?data={query}` with a per-request timeout. The
/// synchronous trait is implemented by blocking on asynchronous HTTP calls
/// internally; the transport owns a Tokio runtime that is reused across
/// calls.
///
/// # Runtime behaviour
///
/// When called from outside any Tokio runtime, the transport uses its own
/// stored runtime. When called from within an existing multi-threaded
/// Tokio runtime (detected via [`Handle::try_current()`]), it uses that
/// runtime's handle with [`tokio::task::block_in_place`] to avoid nested
/// runtime panics. From within a `current_thread` runtime it falls back to
/// its own runtime, which may deadlock if the caller's runtime is driving
/// IO this request depends on.
pub struct HttpTransport {
    client: Client,
    runtime: Runtime,
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("client", &self.client)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl HttpTransport {
    /// Create a transport with the default user agent.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new() -> Result<Self, TransportBuildError> {
        let client = Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .map_err(TransportBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(TransportBuildError::Runtime)?;
        Ok(Self { client, runtime })
    }

    async fn fetch_async(
        &self,
        url: &str,
        query: &str,
        timeout: Duration,
    ) -> Result<FetchResponse, TransportError> {
        let response = self
            .client
            .get(url)
            .query(&[("data", query)])
            .timeout(timeout)
            .send()
            .await
            .map_err(|err| convert_reqwest_error(&err, url, timeout))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|err| convert_reqwest_error(&err, url, timeout))?
            .to_vec();

        Ok(FetchResponse { status, body })
    }
}

/// Convert a reqwest error to a [`TransportError`].
fn convert_reqwest_error(error: &reqwest::Error, url: &str, timeout: Duration) -> TransportError {
    if error.is_timeout() {
        return TransportError::Timeout {
            url: url.to_owned(),
            timeout_secs: timeout.as_secs(),
        };
    }

    TransportError::Network {
        url: url.to_owned(),
        message: error.to_string(),
    }
}

impl OverpassTransport for HttpTransport {
    fn fetch(
        &self,
        url: &str,
        query: &str,
        timeout: Duration,
    ) -> Result<FetchResponse, TransportError> {
        // If we're already inside a Tokio runtime, check the runtime
        // flavour. block_in_place requires a multi-threaded runtime; for
        // current_thread runtimes we fall back to our own stored runtime.
        let future = self.fetch_async(url, query, timeout);
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }
}
