//! Security domain (tenant) model.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A security domain.
///
/// A domain is a tenant boundary: every client registration, every cache
/// entry and every OAuth endpoint is scoped by a domain identifier. The
/// identifier is immutable and unique across the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Domain {
    /// Immutable domain identifier.
    pub id: String,

    /// Human-readable domain name.
    pub name: String,

    /// Whether the domain currently accepts traffic.
    pub enabled: bool,

    /// HTTP path prefix under which the domain's endpoints are exposed,
    /// without leading or trailing slash (e.g. `"test"`).
    pub path: String,

    /// Identity providers attached to this domain.
    #[serde(default)]
    pub identities: Vec<String>,

    /// Certificate providers attached to this domain.
    #[serde(default)]
    pub certificates: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<OffsetDateTime>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<OffsetDateTime>,
}

impl Domain {
    /// Returns the absolute path of an endpoint below this domain,
    /// e.g. `endpoint_path("/oauth/error")` -> `"/test/oauth/error"`.
    #[must_use]
    pub fn endpoint_path(&self, suffix: &str) -> String {
        format!("/{}{}", self.path.trim_matches('/'), suffix)
    }
}

// Domain identity is its identifier, not its content.
impl PartialEq for Domain {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Domain {}

impl std::hash::Hash for Domain {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
