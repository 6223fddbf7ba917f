//! Dynamic client registration validation.
//!
//! Applies the OpenID Connect registration rules
//! (<https://openid.net/specs/openid-connect-registration-1_0.html#ClientMetadata>)
//! to an inbound metadata document: an ordered, fail-fast chain analogous
//! to the authorization pipeline, with two network-dependent stages
//! (sector identifier document fetch, JWKS resolution) that only suspend
//! the registration that issued them.

use serde::{Deserialize, Serialize};
use url::Url;

use idgate_core::{Client, Domain, JwkSet};

use crate::OAuth2Result;
use crate::config::HttpFetchConfig;
use crate::discovery::DiscoveryService;
use crate::error::OAuth2Error;
use crate::jwk::JwkResolver;
use crate::oidc::patch::Patch;
use crate::storage::DomainProviderSource;

use std::sync::Arc;

/// Default response types of a registered client.
const DEFAULT_RESPONSE_TYPES: &[&str] = &["code"];

/// Default grant types of a registered client.
const DEFAULT_GRANT_TYPES: &[&str] = &["authorization_code"];

/// An OpenID Connect dynamic client registration request.
///
/// Every optional field is three-state ([`Patch`]) so that patching an
/// existing client can tell "field omitted" from "field explicitly
/// nulled". The scope field is the space-delimited registration string,
/// not the parsed list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DynamicClientRegistrationRequest {
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub redirect_uris: Patch<Vec<String>>,

    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub response_types: Patch<Vec<String>>,

    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub grant_types: Patch<Vec<String>>,

    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub client_name: Patch<String>,

    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub scope: Patch<String>,

    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub request_uris: Patch<Vec<String>>,

    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub sector_identifier_uri: Patch<String>,

    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub jwks: Patch<JwkSet>,

    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub jwks_uri: Patch<String>,
}

impl DynamicClientRegistrationRequest {
    /// Applies this request onto an existing client registration.
    ///
    /// Omitted fields keep the stored value; explicitly nulled fields are
    /// erased (list fields with registration defaults fall back to those
    /// defaults); set fields replace the stored value. The space-delimited
    /// `scope` string becomes the client's scope list.
    #[must_use]
    pub fn patch(&self, mut client: Client) -> Client {
        self.redirect_uris
            .apply_or_default(&mut client.redirect_uris, Vec::new());
        self.response_types.apply_or_default(
            &mut client.response_types,
            DEFAULT_RESPONSE_TYPES.iter().map(|s| s.to_string()).collect(),
        );
        self.grant_types.apply_or_default(
            &mut client.authorized_grant_types,
            DEFAULT_GRANT_TYPES.iter().map(|s| s.to_string()).collect(),
        );
        self.client_name.apply_to(&mut client.client_name);
        match &self.scope {
            Patch::Unset => {}
            Patch::Null => client.scopes = Vec::new(),
            Patch::Value(scope) => {
                client.scopes = scope.split_whitespace().map(str::to_string).collect();
            }
        }
        self.request_uris
            .apply_or_default(&mut client.request_uris, Vec::new());
        self.sector_identifier_uri
            .apply_to(&mut client.sector_identifier_uri);
        self.jwks.apply_to(&mut client.jwks);
        self.jwks_uri.apply_to(&mut client.jwks_uri);
        client
    }
}

/// The ordered validation chain over registration requests.
pub struct DynamicClientRegistrationValidator {
    discovery: Arc<dyn DiscoveryService>,
    jwk_resolver: JwkResolver,
    http_client: reqwest::Client,
    config: HttpFetchConfig,
}

impl DynamicClientRegistrationValidator {
    #[must_use]
    pub fn new(discovery: Arc<dyn DiscoveryService>, config: HttpFetchConfig) -> Self {
        Self {
            discovery,
            jwk_resolver: JwkResolver::new(config.clone()),
            http_client: config.build_http_client(),
            config,
        }
    }

    /// Validates a registration request against the OpenID Connect rules.
    ///
    /// Returns the request with scope defaulting applied (`openid` is
    /// guaranteed present afterwards).
    ///
    /// # Errors
    ///
    /// The first failing stage classifies the error as
    /// `invalid_redirect_uri` or `invalid_client_metadata`; a missing
    /// request body fails immediately.
    pub async fn validate(
        &self,
        domain: &Domain,
        request: Option<DynamicClientRegistrationRequest>,
    ) -> OAuth2Result<DynamicClientRegistrationRequest> {
        tracing::debug!(domain = %domain.id, "Validating dynamic client registration payload");

        let Some(mut request) = request else {
            return Err(OAuth2Error::invalid_client_metadata(
                "Registration request must not be null",
            ));
        };

        self.validate_redirect_uris(&request)?;
        self.validate_response_types(domain, &request)?;
        self.validate_grant_types(domain, &request)?;
        self.validate_request_uris(&request)?;
        self.validate_sector_identifier_uri(&request).await?;
        self.validate_jwks(&request).await?;
        apply_scope_defaulting(&mut request);

        Ok(request)
    }

    /// Stage 1: redirect_uris is required, non-empty.
    fn validate_redirect_uris(
        &self,
        request: &DynamicClientRegistrationRequest,
    ) -> OAuth2Result<()> {
        match request.redirect_uris.as_value() {
            Some(uris) if !uris.is_empty() => Ok(()),
            _ => Err(OAuth2Error::invalid_redirect_uri()),
        }
    }

    /// Stage 2: response_types, when given, must all be server-supported.
    fn validate_response_types(
        &self,
        domain: &Domain,
        request: &DynamicClientRegistrationRequest,
    ) -> OAuth2Result<()> {
        if let Some(response_types) = request.response_types.as_value()
            && !self
                .discovery
                .configuration(domain)
                .are_response_types_supported(response_types)
        {
            return Err(OAuth2Error::invalid_client_metadata("Invalid response type."));
        }
        Ok(())
    }

    /// Stage 3: grant_types, when given, must all be server-supported.
    fn validate_grant_types(
        &self,
        domain: &Domain,
        request: &DynamicClientRegistrationRequest,
    ) -> OAuth2Result<()> {
        if let Some(grant_types) = request.grant_types.as_value()
            && !self
                .discovery
                .configuration(domain)
                .are_grant_types_supported(grant_types)
        {
            return Err(OAuth2Error::invalid_client_metadata(
                "Missing or invalid grant type.",
            ));
        }
        Ok(())
    }

    /// Stage 4: request_uris, when given, must be valid absolute URIs.
    fn validate_request_uris(
        &self,
        request: &DynamicClientRegistrationRequest,
    ) -> OAuth2Result<()> {
        if let Some(request_uris) = request.request_uris.as_value() {
            for uri in request_uris {
                if Url::parse(uri).is_err() {
                    return Err(OAuth2Error::invalid_client_metadata(format!(
                        "request_uris: {uri} is not valid."
                    )));
                }
            }
        }
        Ok(())
    }

    /// Stage 5: when a sector identifier URI is given, fetch the document
    /// and check every requested redirect_uri appears in it.
    async fn validate_sector_identifier_uri(
        &self,
        request: &DynamicClientRegistrationRequest,
    ) -> OAuth2Result<()> {
        let Some(sector_uri) = request.sector_identifier_uri.as_value() else {
            return Ok(());
        };

        let url = Url::parse(sector_uri).map_err(|_| {
            OAuth2Error::invalid_client_metadata(format!(
                "sector_identifier_uri: {sector_uri} is not valid."
            ))
        })?;

        let https = url.scheme() == "https";
        if !https && !(url.scheme() == "http" && self.config.allow_http) {
            return Err(OAuth2Error::invalid_client_metadata(format!(
                "Scheme must be https for sector_identifier_uri : {sector_uri}"
            )));
        }

        let allowed = self.fetch_sector_document(&url).await?;

        let redirect_uris = request.redirect_uris.as_value().cloned().unwrap_or_default();
        let missing: Vec<String> = redirect_uris
            .into_iter()
            .filter(|uri| !allowed.contains(uri))
            .collect();
        if !missing.is_empty() {
            return Err(OAuth2Error::invalid_redirect_uri_with(format!(
                "redirect uris are not allowed according to sector_identifier_uri: {}",
                missing.join(" ")
            )));
        }

        Ok(())
    }

    /// Fetches the sector identifier document: a JSON array of redirect
    /// URI strings. Any fetch or parse failure is invalid metadata.
    async fn fetch_sector_document(&self, url: &Url) -> OAuth2Result<Vec<String>> {
        let unparsable = || {
            OAuth2Error::invalid_client_metadata(format!(
                "Unable to parse sector_identifier_uri : {url}"
            ))
        };

        let response = self
            .http_client
            .get(url.as_str())
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|err| {
                tracing::warn!(uri = %url, error = %err, "Sector identifier fetch failed");
                unparsable()
            })?;

        if !response.status().is_success() {
            return Err(unparsable());
        }

        response.json::<Vec<String>>().await.map_err(|err| {
            tracing::warn!(uri = %url, error = %err, "Sector identifier parse failed");
            unparsable()
        })
    }

    /// Stage 6: jwks and jwks_uri are mutually exclusive; a given jwks_uri
    /// must resolve to a non-empty key set.
    async fn validate_jwks(&self, request: &DynamicClientRegistrationRequest) -> OAuth2Result<()> {
        if request.jwks.is_value() && request.jwks_uri.is_value() {
            return Err(OAuth2Error::invalid_client_metadata(
                "The jwks_uri and jwks parameters MUST NOT be used together.",
            ));
        }

        if let Some(jwks_uri) = request.jwks_uri.as_value() {
            let resolved = self.jwk_resolver.resolve(jwks_uri).await?;
            if resolved.is_none() {
                return Err(OAuth2Error::invalid_client_metadata(format!(
                    "No JWK found behind jwks_uri: {jwks_uri}"
                )));
            }
        }

        Ok(())
    }
}

/// Stage 7: scope defaulting. An unset scope becomes `openid`; a given
/// scope without `openid` gets it appended. Tokens are de-duplicated
/// preserving the given order.
fn apply_scope_defaulting(request: &mut DynamicClientRegistrationRequest) {
    const OPENID: &str = "openid";

    let scope = match request.scope.as_value() {
        None => OPENID.to_string(),
        Some(scope) => {
            let mut tokens: Vec<&str> = Vec::new();
            for token in scope.split_whitespace() {
                if !tokens.contains(&token) {
                    tokens.push(token);
                }
            }
            if !tokens.contains(&OPENID) {
                tokens.push(OPENID);
            }
            tokens.join(" ")
        }
    };
    request.scope = Patch::Value(scope);
}

/// Assigns the domain's first identity provider to the client.
///
/// Identity providers are not part of registration metadata but are
/// required on a usable client.
pub async fn apply_default_identity_provider(
    providers: &dyn DomainProviderSource,
    domain_id: &str,
    client: &mut Client,
) -> OAuth2Result<()> {
    let identity_providers = providers.identity_providers(domain_id).await?;
    if let Some(first) = identity_providers.first() {
        client.identities = vec![first.clone()];
    }
    Ok(())
}

/// Assigns the domain's first certificate provider to the client.
pub async fn apply_default_certificate_provider(
    providers: &dyn DomainProviderSource,
    domain_id: &str,
    client: &mut Client,
) -> OAuth2Result<()> {
    let certificates = providers.certificate_providers(domain_id).await?;
    if let Some(first) = certificates.first() {
        client.certificate = Some(first.clone());
    }
    Ok(())
}
