//! Remote JSON Web Key Set resolution.
//!
//! Fetches a client's published JWK Set over HTTP. Fetch failures,
//! non-success statuses and unparsable bodies are all classified as
//! invalid client metadata; a well-formed but empty key set is reported as
//! "empty" (`Ok(None)`), which callers treat differently from an error.
//! Key lookup by `kid` lives on [`JwkSet::find_key`].
//!
//! [`JwkSet::find_key`]: idgate_core::JwkSet::find_key

use url::Url;

use idgate_core::JwkSet;

use crate::OAuth2Result;
use crate::config::HttpFetchConfig;
use crate::error::OAuth2Error;

/// Fetches JWK Sets from client-published endpoints.
pub struct JwkResolver {
    http_client: reqwest::Client,
    config: HttpFetchConfig,
}

impl JwkResolver {
    /// Creates a resolver with the given fetch configuration.
    #[must_use]
    pub fn new(config: HttpFetchConfig) -> Self {
        Self {
            http_client: config.build_http_client(),
            config,
        }
    }

    /// Creates a resolver with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(HttpFetchConfig::default())
    }

    /// Fetches the JWK Set published at `jwks_uri`.
    ///
    /// Returns `Ok(None)` when the document parses but contains no keys.
    ///
    /// # Errors
    ///
    /// Returns `invalid_client_metadata` when the URI is invalid, the
    /// endpoint is unreachable or answers with a non-success status, or
    /// the body cannot be parsed as a JWK Set.
    pub async fn resolve(&self, jwks_uri: &str) -> OAuth2Result<Option<JwkSet>> {
        let url = Url::parse(jwks_uri)
            .map_err(|_| OAuth2Error::invalid_client_metadata(format!("{jwks_uri} is not valid.")))?;
        self.validate_scheme(&url)?;

        tracing::debug!(uri = %url, "Fetching JWKS");

        let response = self
            .http_client
            .get(url.as_str())
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|err| {
                tracing::warn!(uri = %url, error = %err, "JWKS fetch failed");
                OAuth2Error::invalid_client_metadata(format!("Uri not reachable: {jwks_uri}"))
            })?;

        if !response.status().is_success() {
            return Err(OAuth2Error::invalid_client_metadata(format!(
                "Uri not reachable: {jwks_uri}"
            )));
        }

        if let Some(length) = response.content_length()
            && length as usize > self.config.max_response_size
        {
            return Err(OAuth2Error::invalid_client_metadata(format!(
                "JWKS document at {jwks_uri} exceeds the maximum allowed size"
            )));
        }

        let jwks: JwkSet = response.json().await.map_err(|err| {
            tracing::warn!(uri = %url, error = %err, "JWKS parse failed");
            OAuth2Error::invalid_client_metadata(format!("Unable to parse JWKS at {jwks_uri}"))
        })?;

        if jwks.is_empty() {
            return Ok(None);
        }
        Ok(Some(jwks))
    }

    fn validate_scheme(&self, url: &Url) -> OAuth2Result<()> {
        match url.scheme() {
            "https" => Ok(()),
            "http" if self.config.allow_http => Ok(()),
            _ => Err(OAuth2Error::invalid_client_metadata(format!(
                "Scheme must be https for {url}"
            ))),
        }
    }
}
