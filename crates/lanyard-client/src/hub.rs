//! Shared clients: one connection per subject, however many consumers.

use std::collections::HashMap;
use std::ops::Deref;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use lanyard_common::LanyardError;
use tracing::{debug, info};

use crate::gateway::{ClientConfig, PresenceClient};
use crate::transport::{Connector, WsConnector};

struct HubEntry {
    client: Arc<PresenceClient>,
    leases: usize,
}

struct HubInner {
    config: ClientConfig,
    connector: Arc<dyn Connector>,
    clients: Mutex<HashMap<String, HubEntry>>,
}

impl HubInner {
    fn clients(&self) -> MutexGuard<'_, HashMap<String, HubEntry>> {
        self.clients.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Hands out leases on per-subject clients.
///
/// The first lease for a subject starts its client; the last lease dropped
/// disposes it. Cloning the hub shares the same set of clients.
#[derive(Clone)]
pub struct PresenceHub {
    inner: Arc<HubInner>,
}

impl PresenceHub {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_connector(config, Arc::new(WsConnector))
    }

    pub fn with_connector(config: ClientConfig, connector: Arc<dyn Connector>) -> Self {
        Self {
            inner: Arc::new(HubInner {
                config,
                connector,
                clients: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Lease the client for `subject_id`, starting one if none is live.
    /// A disposed or exhausted client counts as not live and is replaced.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn acquire(&self, subject_id: &str) -> Result<PresenceLease, LanyardError> {
        let mut clients = self.inner.clients();

        if let Some(entry) = clients.get_mut(subject_id) {
            if entry.client.ensure_active().is_ok() && !entry.client.is_exhausted() {
                entry.leases += 1;
                debug!(subject = %subject_id, leases = entry.leases, "Reusing presence client");
                return Ok(PresenceLease {
                    hub: Arc::clone(&self.inner),
                    client: Arc::clone(&entry.client),
                });
            }
        }

        let client = Arc::new(PresenceClient::connect_with(
            subject_id,
            self.inner.config.clone(),
            Arc::clone(&self.inner.connector),
        )?);
        clients.insert(
            subject_id.to_string(),
            HubEntry {
                client: Arc::clone(&client),
                leases: 1,
            },
        );
        info!(subject = %subject_id, "Started shared presence client");

        Ok(PresenceLease {
            hub: Arc::clone(&self.inner),
            client,
        })
    }

    /// Subjects with a live client, sorted.
    pub fn active_subjects(&self) -> Vec<String> {
        let mut subjects: Vec<String> = self.inner.clients().keys().cloned().collect();
        subjects.sort();
        subjects
    }

    /// Outstanding leases for `subject_id`.
    pub fn lease_count(&self, subject_id: &str) -> usize {
        self.inner
            .clients()
            .get(subject_id)
            .map_or(0, |entry| entry.leases)
    }
}

impl std::fmt::Debug for PresenceHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresenceHub")
            .field("subjects", &self.active_subjects())
            .finish()
    }
}

/// A consumer's hold on a shared [`PresenceClient`].
pub struct PresenceLease {
    hub: Arc<HubInner>,
    client: Arc<PresenceClient>,
}

impl Deref for PresenceLease {
    type Target = PresenceClient;

    fn deref(&self) -> &PresenceClient {
        &self.client
    }
}

impl std::fmt::Debug for PresenceLease {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("PresenceLease").field(&*self.client).finish()
    }
}

impl Drop for PresenceLease {
    fn drop(&mut self) {
        let subject_id = self.client.subject_id();
        let mut clients = self.hub.clients();

        // A replaced entry belongs to a newer client; leave it alone.
        let Some(entry) = clients.get_mut(subject_id) else {
            return;
        };
        if !Arc::ptr_eq(&entry.client, &self.client) {
            return;
        }

        entry.leases = entry.leases.saturating_sub(1);
        if entry.leases == 0 {
            clients.remove(subject_id);
            drop(clients);
            self.client.dispose();
            info!(subject = %subject_id, "Released shared presence client");
        }
    }
}
