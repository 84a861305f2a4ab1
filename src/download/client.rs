//! HTTP client wrapper for transfer runs.
//!
//! Thin layer over `reqwest::Client` that pins the connect and read timeouts
//! and maps request failures into [`TransferError`].

use std::time::Duration;

use reqwest::Client;

use super::constants::{CONNECT_TIMEOUT, READ_TIMEOUT};
use super::error::TransferError;

/// HTTP client for streaming downloads.
///
/// Designed to be created once and reused across runs, taking advantage of
/// connection pooling.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient {
    /// Creates a new HTTP client with the default timeouts
    /// (10 s connect, 15 s read).
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        Self::with_timeouts(CONNECT_TIMEOUT, READ_TIMEOUT)
    }

    /// Creates a new HTTP client with explicit timeout values.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the supplied
    /// timeout configuration.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn with_timeouts(connect_timeout: Duration, read_timeout: Duration) -> Self {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .read_timeout(read_timeout)
            .build()
            .expect("failed to build HTTP client with static configuration");
        Self { client }
    }

    /// Sends a GET request and returns the raw response.
    ///
    /// Connect failures, DNS errors, and timeouts surface as
    /// [`TransferError::Network`]. The response status is not inspected
    /// here; the executor validates it.
    pub(crate) async fn get(&self, url: &str) -> Result<reqwest::Response, TransferError> {
        self.client
            .get(url)
            .send()
            .await
            .map_err(|e| TransferError::network(url, e))
    }

    /// Returns a reference to the underlying reqwest client.
    #[must_use]
    pub fn inner(&self) -> &Client {
        &self.client
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_get_connect_failure_maps_to_network_error() {
        // Nothing listens on this port; connection is refused immediately.
        let client = HttpClient::new();
        let result = tokio_test::block_on(client.get("http://127.0.0.1:1/file.bin"));
        assert!(matches!(result, Err(TransferError::Network { .. })));
    }

    #[test]
    fn test_default_builds() {
        let client = HttpClient::default();
        drop(client);
    }
}
