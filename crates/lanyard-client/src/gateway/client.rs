//! Public handle for one subject's presence connection.

use std::sync::{Arc, Mutex, PoisonError};

use lanyard_common::{ClientError, LanyardError};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::snapshot::PresenceSnapshot;
use crate::transport::{Connector, WsConnector};

use super::connection::{connection_loop, Publisher};
use super::types::{ClientConfig, PresenceState};

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Live presence of one subject.
///
/// The connection runs in a background task and reconnects on its own.
/// Read the latest state with [`state`](Self::state) or watch it with
/// [`subscribe`](Self::subscribe). Dropping the client disposes it.
pub struct PresenceClient {
    subject_id: String,
    state: Arc<watch::Sender<PresenceState>>,
    cancel: CancellationToken,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl PresenceClient {
    /// Start tracking `subject_id` over the default WebSocket transport.
    ///
    /// Returns immediately; the first connection attempt happens in the
    /// background. Must be called from within a Tokio runtime.
    pub fn connect(
        subject_id: impl Into<String>,
        config: ClientConfig,
    ) -> Result<Self, LanyardError> {
        Self::connect_with(subject_id, config, Arc::new(WsConnector))
    }

    /// Like [`connect`](Self::connect), with an explicit transport.
    pub fn connect_with(
        subject_id: impl Into<String>,
        config: ClientConfig,
        connector: Arc<dyn Connector>,
    ) -> Result<Self, LanyardError> {
        let subject_id = subject_id.into();
        if subject_id.trim().is_empty() {
            return Err(ClientError::InvalidSubject(subject_id).into());
        }

        let (state_tx, _) = watch::channel(PresenceState::default());
        let state = Arc::new(state_tx);
        let cancel = CancellationToken::new();
        let publisher = Publisher::new(Arc::clone(&state), cancel.clone());

        let task = tokio::spawn(connection_loop(
            subject_id.clone(),
            config,
            connector,
            publisher,
            cancel.clone(),
        ));

        Ok(Self {
            subject_id,
            state,
            cancel,
            task: Mutex::new(Some(task)),
        })
    }

    pub fn subject_id(&self) -> &str {
        &self.subject_id
    }

    /// Current published state.
    pub fn state(&self) -> PresenceState {
        self.state.borrow().clone()
    }

    /// Latest snapshot, if one has arrived.
    pub fn snapshot(&self) -> Option<Arc<PresenceSnapshot>> {
        self.state.borrow().snapshot.clone()
    }

    pub fn is_connected(&self) -> bool {
        self.state.borrow().connected
    }

    /// The failure budget ran out and the client stopped reconnecting.
    pub fn is_exhausted(&self) -> bool {
        self.state.borrow().exhausted
    }

    /// Watch for state changes. Every published snapshot notifies every
    /// receiver.
    pub fn subscribe(&self) -> watch::Receiver<PresenceState> {
        self.state.subscribe()
    }

    pub fn is_disposed(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Close the connection and cancel every timer. Idempotent.
    ///
    /// When this returns, no further snapshot, heartbeat or reconnect
    /// will happen on behalf of this client.
    pub fn dispose(&self) {
        if self.cancel.is_cancelled() {
            return;
        }
        self.cancel.cancel();
        // Waits out any publish already holding the lock.
        self.state.send_modify(|state| state.connected = false);
        info!(subject = %self.subject_id, "Presence client disposed");
    }

    /// Wait for the background task to finish. Returns immediately if it
    /// already has, or if another caller is waiting on it.
    pub async fn closed(&self) {
        let task = self
            .task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(task) = task {
            let _ = task.await;
        }
    }

    /// Returns `Err(ClientError::Disposed)` once the client is disposed.
    pub fn ensure_active(&self) -> Result<(), ClientError> {
        if self.is_disposed() {
            Err(ClientError::Disposed)
        } else {
            Ok(())
        }
    }
}

impl Drop for PresenceClient {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl std::fmt::Debug for PresenceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("PresenceClient")
            .field("subject_id", &self.subject_id)
            .field("connected", &state.connected)
            .field("exhausted", &state.exhausted)
            .field("has_snapshot", &state.snapshot.is_some())
            .field("disposed", &self.cancel.is_cancelled())
            .finish()
    }
}
