//! Event-synchronized client directory.
//!
//! The directory is the one shared mutable resource of the processing core.
//! It maps a domain identifier to the set of clients deployed on that
//! domain and is consulted synchronously on every authorization request.
//!
//! Reads are lock-free: the whole mapping lives behind an [`ArcSwap`] and
//! every mutation builds a new snapshot before atomically swapping the
//! pointer, so a reader never observes a set mid-mutation. Mutations are
//! driven by [`ClientEvent`]s consumed from a single-consumer channel, in
//! arrival order and without coalescing.

use std::collections::HashMap;
use std::sync::Arc;

use arc_swap::ArcSwap;
use tokio::sync::mpsc;

use idgate_core::{Client, ClientEvent, ClientEventKind};

use crate::OAuth2Result;
use crate::storage::ClientRepository;

/// Immutable per-domain view of deployed clients.
type Snapshot = HashMap<String, Arc<Vec<Client>>>;

/// In-memory, domain-scoped cache of registered clients.
pub struct ClientDirectory {
    repository: Arc<dyn ClientRepository>,
    domains: ArcSwap<Snapshot>,
}

impl ClientDirectory {
    /// Creates an empty directory backed by the given repository.
    ///
    /// Call [`ClientDirectory::load`] before serving lookups.
    #[must_use]
    pub fn new(repository: Arc<dyn ClientRepository>) -> Self {
        Self {
            repository,
            domains: ArcSwap::from_pointee(Snapshot::new()),
        }
    }

    /// Loads the full client set from the repository and installs it as
    /// the initial snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be read; the directory
    /// keeps its previous (possibly empty) snapshot in that case.
    pub async fn load(&self) -> OAuth2Result<()> {
        let clients = self.repository.find_all().await?;
        let mut snapshot = Snapshot::new();
        for client in clients {
            let entry = snapshot
                .entry(client.domain.clone())
                .or_insert_with(|| Arc::new(Vec::new()));
            let mut set = entry.as_ref().clone();
            set.retain(|existing| existing.id != client.id);
            set.push(client);
            *entry = Arc::new(set);
        }

        let domain_count = snapshot.len();
        self.domains.store(Arc::new(snapshot));
        tracing::info!(domains = domain_count, "Client directory loaded");
        Ok(())
    }

    /// Looks up a client by domain identifier and OAuth client_id.
    ///
    /// Non-blocking and lock-free: reads the current snapshot only.
    #[must_use]
    pub fn find_by_domain_and_client_id(&self, domain: &str, client_id: &str) -> Option<Client> {
        self.domains
            .load()
            .get(domain)
            .and_then(|clients| {
                clients
                    .iter()
                    .find(|client| client.client_id == client_id)
            })
            .cloned()
    }

    /// Applies a single client event to the directory.
    ///
    /// `Deploy` and `Update` refetch the client from the repository before
    /// replacing it in its domain's set; a client that disappeared between
    /// the event and the refetch is logged and skipped. `Undeploy` removes
    /// the client from the given domain's set.
    pub async fn process_event(&self, event: ClientEvent) {
        match event.kind {
            ClientEventKind::Deploy | ClientEventKind::Update => {
                match self.repository.find_by_id(&event.client_id).await {
                    Ok(Some(client)) => {
                        let current = self.domains.load();
                        self.domains.store(Arc::new(upsert(&current, client)));
                        tracing::info!(
                            client = %event.client_id,
                            domain = %event.domain_id,
                            event = %event.kind,
                            "Client directory updated"
                        );
                    }
                    Ok(None) => {
                        tracing::warn!("No client found with id {}", event.client_id);
                    }
                    Err(err) => {
                        tracing::error!(
                            client = %event.client_id,
                            error = %err,
                            "Unable to apply {} client event", event.kind
                        );
                    }
                }
            }
            ClientEventKind::Undeploy => {
                let current = self.domains.load();
                self.domains
                    .store(Arc::new(remove(&current, &event.domain_id, &event.client_id)));
                tracing::info!(
                    client = %event.client_id,
                    domain = %event.domain_id,
                    "Client undeployed"
                );
            }
        }
    }

    /// Consumes client events until the channel closes.
    ///
    /// Events are applied strictly in arrival order.
    pub async fn run(&self, mut events: mpsc::Receiver<ClientEvent>) {
        tracing::info!("Client directory listening for client events");
        while let Some(event) = events.recv().await {
            self.process_event(event).await;
        }
        tracing::info!("Client event channel closed");
    }
}

/// Returns a new snapshot with `client` replaced (by identifier) or added
/// in its domain's set. The input snapshot is left untouched.
fn upsert(snapshot: &Snapshot, client: Client) -> Snapshot {
    let mut next = snapshot.clone();
    let mut set = next
        .get(&client.domain)
        .map(|clients| clients.as_ref().clone())
        .unwrap_or_default();
    set.retain(|existing| existing.id != client.id);
    let domain = client.domain.clone();
    set.push(client);
    next.insert(domain, Arc::new(set));
    next
}

/// Returns a new snapshot with the client removed (by identifier) from the
/// given domain's set. The input snapshot is left untouched.
fn remove(snapshot: &Snapshot, domain_id: &str, client_id: &str) -> Snapshot {
    let mut next = snapshot.clone();
    if let Some(clients) = next.get(domain_id) {
        let mut set = clients.as_ref().clone();
        set.retain(|existing| existing.id != client_id);
        next.insert(domain_id.to_string(), Arc::new(set));
    }
    next
}
