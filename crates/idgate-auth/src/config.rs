//! Outbound HTTP fetch configuration.

use std::time::Duration;

/// Configuration for outbound metadata fetches (JWKS, sector identifier
/// documents).
///
/// Timeouts live on the HTTP client itself; a fetch that times out is
/// indistinguishable from any other fetch failure and is classified as
/// invalid client metadata by the caller.
#[derive(Debug, Clone)]
pub struct HttpFetchConfig {
    /// HTTP request timeout (default: 10 seconds).
    pub request_timeout: Duration,

    /// Maximum response size in bytes (default: 1 MB).
    pub max_response_size: usize,

    /// Whether to allow plain-HTTP fetch targets.
    /// This should only be enabled for testing.
    pub allow_http: bool,
}

impl Default for HttpFetchConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(10),
            max_response_size: 1024 * 1024,
            allow_http: false,
        }
    }
}

impl HttpFetchConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the HTTP request timeout.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Sets the maximum response size.
    #[must_use]
    pub fn with_max_response_size(mut self, size: usize) -> Self {
        self.max_response_size = size;
        self
    }

    /// Allows plain-HTTP fetch targets.
    ///
    /// # Warning
    ///
    /// This should only be used for testing; published metadata must be
    /// fetched over HTTPS in production.
    #[must_use]
    pub fn with_allow_http(mut self, allow: bool) -> Self {
        self.allow_http = allow;
        self
    }

    /// Builds a `reqwest` client honoring this configuration.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be created (should not happen in
    /// practice).
    pub(crate) fn build_http_client(&self) -> reqwest::Client {
        reqwest::Client::builder()
            .timeout(self.request_timeout)
            .build()
            .expect("Failed to create HTTP client")
    }
}
