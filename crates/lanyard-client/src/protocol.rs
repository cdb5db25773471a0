//! Wire protocol for the presence gateway.
//!
//! Every frame is a JSON object with an integer `op`. Inbound events carry
//! an event name in `t` and a payload in `d`. Decoding is strict about shape:
//! anything that does not fit is a [`FrameError`] and the caller drops it.

use std::time::Duration;

use serde::Deserialize;

use crate::snapshot::PresenceSnapshot;

// ---------------------------------------------------------------------------
// Opcodes & event names
// ---------------------------------------------------------------------------

pub mod op {
    pub const EVENT: u8 = 0;
    pub const HELLO: u8 = 1;
    pub const SUBSCRIBE: u8 = 2;
    pub const HEARTBEAT: u8 = 3;
}

pub mod events {
    pub const INIT_STATE: &str = "INIT_STATE";
    pub const PRESENCE_UPDATE: &str = "PRESENCE_UPDATE";
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    #[error("frame is not a valid envelope: {0}")]
    Envelope(#[source] serde_json::Error),

    #[error("hello frame without a positive heartbeat_interval")]
    InvalidHello,

    #[error("{event} frame without a payload")]
    MissingPayload { event: String },

    #[error("{event} payload does not match the snapshot shape: {source}")]
    InvalidSnapshot {
        event: String,
        #[source]
        source: serde_json::Error,
    },
}

// ---------------------------------------------------------------------------
// Inbound
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct Envelope {
    op: u8,
    #[serde(default)]
    t: Option<String>,
    #[serde(default)]
    d: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct HelloPayload {
    heartbeat_interval: u64,
}

/// A decoded inbound frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Inbound {
    Hello { heartbeat_interval: Duration },
    /// `INIT_STATE` or `PRESENCE_UPDATE`: the full current state.
    Presence { event: String, snapshot: PresenceSnapshot },
    /// An event type this client does not handle.
    OtherEvent { event: Option<String> },
    /// An opcode this client does not handle.
    Unknown { op: u8 },
}

impl Inbound {
    pub fn decode(text: &str) -> Result<Self, FrameError> {
        let envelope: Envelope = serde_json::from_str(text).map_err(FrameError::Envelope)?;

        match envelope.op {
            op::HELLO => {
                let hello = envelope
                    .d
                    .and_then(|d| serde_json::from_value::<HelloPayload>(d).ok())
                    .filter(|h| h.heartbeat_interval > 0)
                    .ok_or(FrameError::InvalidHello)?;
                Ok(Inbound::Hello {
                    heartbeat_interval: Duration::from_millis(hello.heartbeat_interval),
                })
            }
            op::EVENT => match envelope.t.as_deref() {
                Some(event @ (events::INIT_STATE | events::PRESENCE_UPDATE)) => {
                    let event = event.to_string();
                    let data = envelope.d.ok_or_else(|| FrameError::MissingPayload {
                        event: event.clone(),
                    })?;
                    let snapshot = serde_json::from_value(data).map_err(|source| {
                        FrameError::InvalidSnapshot {
                            event: event.clone(),
                            source,
                        }
                    })?;
                    Ok(Inbound::Presence { event, snapshot })
                }
                _ => Ok(Inbound::OtherEvent { event: envelope.t }),
            },
            other => Ok(Inbound::Unknown { op: other }),
        }
    }
}

// ---------------------------------------------------------------------------
// Outbound
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    Subscribe { subject_id: String },
    Heartbeat,
}

impl Outbound {
    pub fn encode(&self) -> String {
        match self {
            Outbound::Subscribe { subject_id } => serde_json::json!({
                "op": op::SUBSCRIBE,
                "d": { "subscribe_to_id": subject_id }
            }),
            Outbound::Heartbeat => serde_json::json!({ "op": op::HEARTBEAT }),
        }
        .to_string()
    }
}
