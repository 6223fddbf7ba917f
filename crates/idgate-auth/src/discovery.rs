//! Server metadata (OpenID Provider discovery values).

use idgate_core::Domain;

use crate::oauth::request::ResponseType;

/// The subset of OpenID Provider metadata the processing core consults:
/// supported response types, grant types and scopes.
#[derive(Debug, Clone)]
pub struct OpenIdProviderMetadata {
    pub response_types_supported: Vec<ResponseType>,
    pub grant_types_supported: Vec<String>,
    pub scopes_supported: Vec<String>,
}

impl Default for OpenIdProviderMetadata {
    fn default() -> Self {
        Self {
            response_types_supported: vec![
                ResponseType::Code,
                ResponseType::Token,
                ResponseType::IdToken,
                ResponseType::IdTokenToken,
                ResponseType::CodeIdToken,
                ResponseType::CodeToken,
                ResponseType::CodeIdTokenToken,
            ],
            grant_types_supported: vec![
                "authorization_code".to_string(),
                "implicit".to_string(),
                "refresh_token".to_string(),
                "client_credentials".to_string(),
            ],
            scopes_supported: vec!["openid".to_string(), "profile".to_string()],
        }
    }
}

impl OpenIdProviderMetadata {
    /// Checks whether a response type is supported by this server.
    #[must_use]
    pub fn is_response_type_supported(&self, response_type: ResponseType) -> bool {
        self.response_types_supported.contains(&response_type)
    }

    /// Checks whether every given response type value is supported.
    #[must_use]
    pub fn are_response_types_supported(&self, response_types: &[String]) -> bool {
        response_types.iter().all(|value| {
            ResponseType::parse(value)
                .map(|rt| self.is_response_type_supported(rt))
                .unwrap_or(false)
        })
    }

    /// Checks whether every given grant type value is supported.
    #[must_use]
    pub fn are_grant_types_supported(&self, grant_types: &[String]) -> bool {
        grant_types
            .iter()
            .all(|value| self.grant_types_supported.contains(value))
    }
}

/// Provides per-domain server metadata.
pub trait DiscoveryService: Send + Sync {
    /// Returns the provider metadata for the given domain.
    fn configuration(&self, domain: &Domain) -> OpenIdProviderMetadata;
}

/// A discovery service serving the same metadata for every domain.
#[derive(Debug, Clone, Default)]
pub struct StaticDiscoveryService {
    metadata: OpenIdProviderMetadata,
}

impl StaticDiscoveryService {
    #[must_use]
    pub fn new(metadata: OpenIdProviderMetadata) -> Self {
        Self { metadata }
    }
}

impl DiscoveryService for StaticDiscoveryService {
    fn configuration(&self, _domain: &Domain) -> OpenIdProviderMetadata {
        self.metadata.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_supports_all_response_types() {
        let metadata = OpenIdProviderMetadata::default();
        assert!(metadata.is_response_type_supported(ResponseType::Code));
        assert!(metadata.is_response_type_supported(ResponseType::CodeIdTokenToken));
    }

    #[test]
    fn test_response_type_values() {
        let metadata = OpenIdProviderMetadata::default();
        assert!(metadata.are_response_types_supported(&[
            "code".to_string(),
            "id_token token".to_string()
        ]));
        assert!(!metadata.are_response_types_supported(&["garbage".to_string()]));
    }

    #[test]
    fn test_restricted_response_types() {
        let metadata = OpenIdProviderMetadata {
            response_types_supported: vec![ResponseType::Code],
            ..OpenIdProviderMetadata::default()
        };
        assert!(!metadata.is_response_type_supported(ResponseType::Token));
    }

    #[test]
    fn test_grant_type_values() {
        let metadata = OpenIdProviderMetadata::default();
        assert!(metadata.are_grant_types_supported(&["authorization_code".to_string()]));
        assert!(!metadata.are_grant_types_supported(&["device_code".to_string()]));
    }
}
