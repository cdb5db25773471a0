//! Transport seam between the connection driver and the network.
//!
//! The driver only ever sees text frames. [`WsConnector`] is the real
//! implementation over `tokio-tungstenite`; tests substitute their own.

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use lanyard_common::TransportError;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::debug;

/// One open duplex connection carrying text frames.
#[async_trait]
pub trait Socket: Send {
    async fn send(&mut self, text: String) -> Result<(), TransportError>;

    /// Next inbound text frame. `None` once the connection is closed.
    async fn recv(&mut self) -> Option<Result<String, TransportError>>;

    async fn close(&mut self);
}

/// Opens sockets. Each call must produce a fresh, independent connection.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self, url: &str) -> Result<Box<dyn Socket>, TransportError>;
}

// ---------------------------------------------------------------------------
// WebSocket implementation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default)]
pub struct WsConnector;

#[async_trait]
impl Connector for WsConnector {
    async fn connect(&self, url: &str) -> Result<Box<dyn Socket>, TransportError> {
        let (stream, _) = tokio_tungstenite::connect_async(url)
            .await
            .map_err(|e| TransportError::Connect(e.to_string()))?;
        Ok(Box::new(WsSocket { stream }))
    }
}

struct WsSocket {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

#[async_trait]
impl Socket for WsSocket {
    async fn send(&mut self, text: String) -> Result<(), TransportError> {
        self.stream
            .send(WsMessage::Text(text.into()))
            .await
            .map_err(|e| TransportError::Send(e.to_string()))
    }

    async fn recv(&mut self) -> Option<Result<String, TransportError>> {
        loop {
            match self.stream.next().await? {
                Ok(WsMessage::Text(text)) => return Some(Ok(text.to_string())),
                Ok(WsMessage::Close(frame)) => {
                    debug!(frame = ?frame, "Gateway sent close frame");
                    return None;
                }
                // Pings are answered by tungstenite itself.
                Ok(_) => continue,
                Err(e) => return Some(Err(TransportError::Receive(e.to_string()))),
            }
        }
    }

    async fn close(&mut self) {
        if let Err(e) = self.stream.close(None).await {
            debug!(error = %e, "Error while closing gateway socket");
        }
    }
}
