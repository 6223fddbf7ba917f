//! OAuth 2.0 / OIDC client (relying party) model.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::jose::JwkSet;

/// An OAuth 2.0 / OIDC client registered on a domain.
///
/// A client is owned by exactly one domain; `client_id` is unique within
/// that domain. Equality and hashing go through the technical identifier
/// `id` only, which is what the client directory relies on when replacing
/// or removing cache entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    /// Technical identifier, unique across the gateway.
    pub id: String,

    /// OAuth client identifier, unique within the owning domain.
    pub client_id: String,

    /// Client secret (confidential clients only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,

    /// Human-readable client name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,

    /// Identifier of the owning domain.
    pub domain: String,

    /// Registered redirect URIs for the authorization code and implicit flows.
    #[serde(default)]
    pub redirect_uris: Vec<String>,

    /// Scopes this client may request. Empty means no restriction.
    #[serde(default)]
    pub scopes: Vec<String>,

    /// Grant types this client may use.
    #[serde(default)]
    pub authorized_grant_types: Vec<String>,

    /// Response types this client may use.
    #[serde(default)]
    pub response_types: Vec<String>,

    /// Certificate provider backing this client's tokens.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate: Option<String>,

    /// Identity providers usable by this client.
    #[serde(default)]
    pub identities: Vec<String>,

    /// Inline JSON Web Key Set. Mutually exclusive with `jwks_uri`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jwks: Option<JwkSet>,

    /// URI of the client's published JSON Web Key Set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jwks_uri: Option<String>,

    /// Sector identifier document URI (pairwise subject identifiers).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector_identifier_uri: Option<String>,

    /// Pre-registered request object URIs.
    #[serde(default)]
    pub request_uris: Vec<String>,

    /// Whether this client is currently enabled.
    pub enabled: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<OffsetDateTime>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<OffsetDateTime>,
}

impl Client {
    /// Checks whether the given redirect URI is registered for this client.
    /// Comparison is an exact string match.
    #[must_use]
    pub fn is_redirect_uri_registered(&self, uri: &str) -> bool {
        self.redirect_uris.iter().any(|allowed| allowed == uri)
    }

    /// Checks whether the given scope may be requested by this client.
    /// An empty scope list means no restriction.
    #[must_use]
    pub fn is_scope_allowed(&self, scope: &str) -> bool {
        self.scopes.is_empty() || self.scopes.iter().any(|allowed| allowed == scope)
    }
}

// Cache replace/remove semantics key on the technical identifier.
impl PartialEq for Client {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Client {}

impl std::hash::Hash for Client {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_client(id: &str) -> Client {
        Client {
            id: id.to_string(),
            client_id: id.to_string(),
            client_secret: None,
            client_name: Some("Test Client".to_string()),
            domain: "domain-1".to_string(),
            redirect_uris: vec!["https://app.example.com/callback".to_string()],
            scopes: vec![],
            authorized_grant_types: vec!["authorization_code".to_string()],
            response_types: vec!["code".to_string()],
            certificate: None,
            identities: vec![],
            jwks: None,
            jwks_uri: None,
            sector_identifier_uri: None,
            request_uris: vec![],
            enabled: true,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_redirect_uri_exact_match() {
        let client = make_client("c1");
        assert!(client.is_redirect_uri_registered("https://app.example.com/callback"));
        assert!(!client.is_redirect_uri_registered("https://app.example.com/callback/"));
        assert!(!client.is_redirect_uri_registered("https://evil.example.com/callback"));
    }

    #[test]
    fn test_scope_allowed_unrestricted() {
        let client = make_client("c1");
        assert!(client.is_scope_allowed("anything"));
    }

    #[test]
    fn test_scope_allowed_restricted() {
        let mut client = make_client("c1");
        client.scopes = vec!["read".to_string(), "write".to_string()];
        assert!(client.is_scope_allowed("read"));
        assert!(!client.is_scope_allowed("admin"));
    }

    #[test]
    fn test_equality_by_identifier() {
        let a = make_client("c1");
        let mut b = make_client("c1");
        b.client_name = Some("Renamed".to_string());
        b.redirect_uris = vec![];
        assert_eq!(a, b);
        assert_ne!(a, make_client("c2"));
    }

    #[test]
    fn test_serde_roundtrip() {
        let client = make_client("c1");
        let json = serde_json::to_string(&client).unwrap();
        let parsed: Client = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, client.id);
        assert_eq!(parsed.client_id, client.client_id);
        assert_eq!(parsed.redirect_uris, client.redirect_uris);
        assert!(!json.contains("clientSecret"));
    }
}
