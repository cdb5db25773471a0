//! Presence gateway client.
//!
//! A sans-IO [`session`] state machine decides what to do with each socket
//! event; the [`connection`] driver owns the socket, timers and retry loop
//! and runs in one background task per client; [`PresenceClient`] is the
//! handle consumers hold.

mod client;
mod connection;
mod session;
mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use client::PresenceClient;
pub use types::{ClientConfig, PresenceState, DEFAULT_GATEWAY_URL};
