//! Client repository trait.
//!
//! Defines the read interface over persisted client registrations that the
//! client directory synchronizes against. Implementations are provided by
//! storage backends.

use async_trait::async_trait;

use idgate_core::Client;

use crate::OAuth2Result;

/// Read operations over persisted OAuth 2.0 clients.
#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Returns every registered client across all domains.
    ///
    /// Used once at startup to seed the client directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn find_all(&self) -> OAuth2Result<Vec<Client>>;

    /// Finds a client by its technical identifier.
    ///
    /// Returns `None` if no such client exists — callers must treat a
    /// client that disappeared between an event and its refetch as a
    /// non-fatal condition.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn find_by_id(&self, id: &str) -> OAuth2Result<Option<Client>>;
}

/// Access to a domain's default providers.
///
/// Identity and certificate providers are not part of dynamic client
/// registration metadata but are required on a registered client; the
/// registration flow assigns the domain's first available provider of each
/// kind.
#[async_trait]
pub trait DomainProviderSource: Send + Sync {
    /// Returns the identity provider identifiers configured on a domain,
    /// in configuration order.
    async fn identity_providers(&self, domain_id: &str) -> OAuth2Result<Vec<String>>;

    /// Returns the certificate provider identifiers configured on a domain,
    /// in configuration order.
    async fn certificate_providers(&self, domain_id: &str) -> OAuth2Result<Vec<String>>;
}
