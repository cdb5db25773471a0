//! In-memory transport for driving the client from tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use lanyard_common::TransportError;
use tokio::sync::mpsc;

use crate::transport::{Connector, Socket};

/// Frames the fake server pushes to the client. `None` closes the socket.
type ServerFrame = Option<Result<String, TransportError>>;

#[derive(Default)]
struct Counters {
    attempts: AtomicUsize,
    open: AtomicUsize,
    max_open: AtomicUsize,
    fail_next: AtomicUsize,
}

pub(crate) struct FakeConnector {
    counters: Arc<Counters>,
    accepted: mpsc::UnboundedSender<ServerEnd>,
}

/// The test's side of the fake gateway.
pub(crate) struct FakeServer {
    counters: Arc<Counters>,
    accepted: mpsc::UnboundedReceiver<ServerEnd>,
}

/// One accepted connection, seen from the server.
pub(crate) struct ServerEnd {
    to_client: mpsc::UnboundedSender<ServerFrame>,
    from_client: mpsc::UnboundedReceiver<String>,
}

struct FakeSocket {
    inbound: mpsc::UnboundedReceiver<ServerFrame>,
    outbound: mpsc::UnboundedSender<String>,
    counters: Arc<Counters>,
}

pub(crate) fn fake_gateway() -> (Arc<FakeConnector>, FakeServer) {
    let counters = Arc::new(Counters::default());
    let (accepted_tx, accepted_rx) = mpsc::unbounded_channel();
    (
        Arc::new(FakeConnector {
            counters: Arc::clone(&counters),
            accepted: accepted_tx,
        }),
        FakeServer {
            counters,
            accepted: accepted_rx,
        },
    )
}

#[async_trait]
impl Connector for FakeConnector {
    async fn connect(&self, _url: &str) -> Result<Box<dyn Socket>, TransportError> {
        self.counters.attempts.fetch_add(1, Ordering::SeqCst);
        let refused = self
            .counters
            .fail_next
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if refused {
            return Err(TransportError::Connect("connection refused".into()));
        }

        let (to_client, inbound) = mpsc::unbounded_channel();
        let (outbound, from_client) = mpsc::unbounded_channel();
        let open = self.counters.open.fetch_add(1, Ordering::SeqCst) + 1;
        self.counters.max_open.fetch_max(open, Ordering::SeqCst);

        let _ = self.accepted.send(ServerEnd {
            to_client,
            from_client,
        });
        Ok(Box::new(FakeSocket {
            inbound,
            outbound,
            counters: Arc::clone(&self.counters),
        }))
    }
}

#[async_trait]
impl Socket for FakeSocket {
    async fn send(&mut self, text: String) -> Result<(), TransportError> {
        self.outbound.send(text).map_err(|_| TransportError::Closed)
    }

    async fn recv(&mut self) -> Option<Result<String, TransportError>> {
        self.inbound.recv().await.flatten()
    }

    async fn close(&mut self) {
        self.inbound.close();
    }
}

impl Drop for FakeSocket {
    fn drop(&mut self) {
        self.counters.open.fetch_sub(1, Ordering::SeqCst);
    }
}

impl FakeServer {
    pub(crate) async fn accept(&mut self) -> ServerEnd {
        self.accepted
            .recv()
            .await
            .expect("connector dropped before a connection was made")
    }

    pub(crate) fn try_accept(&mut self) -> Option<ServerEnd> {
        self.accepted.try_recv().ok()
    }

    pub(crate) fn attempts(&self) -> usize {
        self.counters.attempts.load(Ordering::SeqCst)
    }

    pub(crate) fn open_sockets(&self) -> usize {
        self.counters.open.load(Ordering::SeqCst)
    }

    pub(crate) fn max_open_sockets(&self) -> usize {
        self.counters.max_open.load(Ordering::SeqCst)
    }

    /// Refuse the next `n` connect attempts.
    pub(crate) fn refuse_next(&self, n: usize) {
        self.counters.fail_next.store(n, Ordering::SeqCst);
    }
}

impl ServerEnd {
    pub(crate) fn send(&self, text: impl Into<String>) {
        let _ = self.to_client.send(Some(Ok(text.into())));
    }

    pub(crate) fn hello(&self, interval_ms: u64) {
        self.send(format!(
            r#"{{"op":1,"d":{{"heartbeat_interval":{interval_ms}}}}}"#
        ));
    }

    pub(crate) fn event(&self, event: &str, data: serde_json::Value) {
        self.send(serde_json::json!({ "op": 0, "t": event, "d": data }).to_string());
    }

    pub(crate) fn fail(&self, message: &str) {
        let _ = self
            .to_client
            .send(Some(Err(TransportError::Receive(message.into()))));
    }

    pub(crate) fn close(&self) {
        let _ = self.to_client.send(None);
    }

    /// Next frame from the client, parsed. `None` once the client side is gone.
    pub(crate) async fn recv(&mut self) -> Option<serde_json::Value> {
        let text = self.from_client.recv().await?;
        Some(serde_json::from_str(&text).expect("client sent invalid JSON"))
    }

    pub(crate) fn try_recv(&mut self) -> Option<serde_json::Value> {
        let text = self.from_client.try_recv().ok()?;
        Some(serde_json::from_str(&text).expect("client sent invalid JSON"))
    }
}
