//! Client synchronization events.

use serde::{Deserialize, Serialize};

/// The kind of mutation a [`ClientEvent`] carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientEventKind {
    /// A client was deployed on a domain.
    Deploy,
    /// An existing client was updated.
    Update,
    /// A client was removed from a domain.
    Undeploy,
}

impl ClientEventKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deploy => "deploy",
            Self::Update => "update",
            Self::Undeploy => "undeploy",
        }
    }
}

impl std::fmt::Display for ClientEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A client mutation event published on the gateway event bus.
///
/// Events reference clients by technical identifier; consumers refetch the
/// client record themselves. Events are transient and not persisted by the
/// gateway core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientEvent {
    pub kind: ClientEventKind,

    /// Technical identifier of the affected client.
    pub client_id: String,

    /// Identifier of the domain owning the client.
    pub domain_id: String,
}

impl ClientEvent {
    #[must_use]
    pub fn new(
        kind: ClientEventKind,
        client_id: impl Into<String>,
        domain_id: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            client_id: client_id.into(),
            domain_id: domain_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_display() {
        assert_eq!(ClientEventKind::Deploy.to_string(), "deploy");
        assert_eq!(ClientEventKind::Update.to_string(), "update");
        assert_eq!(ClientEventKind::Undeploy.to_string(), "undeploy");
    }

    #[test]
    fn test_serde_roundtrip() {
        let event = ClientEvent::new(ClientEventKind::Undeploy, "client-1", "domain-1");
        let json = serde_json::to_string(&event).unwrap();
        let parsed: ClientEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, event);
        assert!(json.contains(r#""kind":"undeploy""#));
    }
}
