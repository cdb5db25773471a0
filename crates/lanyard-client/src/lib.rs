//! Realtime presence client for a Lanyard-style gateway.
//!
//! [`PresenceClient`] keeps one WebSocket open per subject, answers the
//! gateway's heartbeat cadence and republishes every presence snapshot it
//! receives. [`PresenceHub`] shares one client per subject between many
//! consumers. The [`view`] module holds the display projections consumers
//! build on top of a snapshot.

pub mod backoff;
pub mod gateway;
pub mod hub;
pub mod protocol;
pub mod snapshot;
pub mod transport;
pub mod view;

pub use backoff::{Backoff, RetryPolicy};
pub use gateway::{ClientConfig, PresenceClient, PresenceState, DEFAULT_GATEWAY_URL};
pub use hub::{PresenceHub, PresenceLease};
pub use protocol::{FrameError, Inbound, Outbound};
pub use snapshot::{
    Activity, ActivityKind, Assets, Emoji, PresenceFlags, PresenceSnapshot, SpotifyTrack, Status,
    TimeRange, User,
};
pub use transport::{Connector, Socket, WsConnector};
