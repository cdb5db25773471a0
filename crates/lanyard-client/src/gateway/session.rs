//! Sans-IO gateway session state machine.
//!
//! Each socket event is fed in and a list of [`Action`]s comes out. The
//! driver in `connection.rs` executes them in order. Keeping this free of
//! sockets and timers lets every transition be tested synchronously.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::protocol::{Inbound, Outbound};
use crate::snapshot::PresenceSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Phase {
    Connecting,
    AwaitingHello,
    Subscribed,
    ClosedPendingRetry,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Action {
    Send(Outbound),
    /// (Re)start the repeating heartbeat timer. The first tick is one full
    /// period away.
    StartHeartbeat(Duration),
    StopHeartbeat,
    Publish(Arc<PresenceSnapshot>),
    SetConnected(bool),
    ScheduleRetry,
}

pub(crate) struct Session {
    subject_id: String,
    phase: Phase,
    heartbeat_interval: Option<Duration>,
}

impl Session {
    pub(crate) fn new(subject_id: String) -> Self {
        Self {
            subject_id,
            phase: Phase::Connecting,
            heartbeat_interval: None,
        }
    }

    pub(crate) fn phase(&self) -> Phase {
        self.phase
    }

    pub(crate) fn heartbeat_interval(&self) -> Option<Duration> {
        self.heartbeat_interval
    }

    /// A new connection attempt is starting.
    pub(crate) fn connecting(&mut self) {
        self.phase = Phase::Connecting;
        self.heartbeat_interval = None;
    }

    /// The transport reported open.
    pub(crate) fn opened(&mut self) -> Vec<Action> {
        if self.phase != Phase::Connecting {
            return Vec::new();
        }
        self.phase = Phase::AwaitingHello;
        vec![Action::SetConnected(true)]
    }

    /// One inbound text frame. Malformed or out-of-phase frames produce no
    /// actions and leave the session untouched.
    pub(crate) fn frame(&mut self, text: &str) -> Vec<Action> {
        let inbound = match Inbound::decode(text) {
            Ok(inbound) => inbound,
            Err(e) => {
                debug!(subject = %self.subject_id, error = %e, "Dropping malformed frame");
                return Vec::new();
            }
        };

        match (self.phase, inbound) {
            (Phase::AwaitingHello, Inbound::Hello { heartbeat_interval }) => {
                self.phase = Phase::Subscribed;
                self.heartbeat_interval = Some(heartbeat_interval);
                info!(
                    subject = %self.subject_id,
                    heartbeat_ms = heartbeat_interval.as_millis() as u64,
                    "Gateway hello, subscribing"
                );
                vec![
                    Action::StartHeartbeat(heartbeat_interval),
                    Action::Send(Outbound::Subscribe {
                        subject_id: self.subject_id.clone(),
                    }),
                ]
            }
            (Phase::Subscribed, Inbound::Hello { heartbeat_interval }) => {
                debug!(subject = %self.subject_id, "Repeated hello, restarting heartbeat");
                self.heartbeat_interval = Some(heartbeat_interval);
                vec![Action::StartHeartbeat(heartbeat_interval)]
            }
            (Phase::Subscribed, Inbound::Presence { event, mut snapshot }) => {
                debug!(subject = %self.subject_id, event = %event, "Presence snapshot");
                snapshot.subject_id = self.subject_id.clone();
                vec![Action::Publish(Arc::new(snapshot))]
            }
            (Phase::Subscribed, Inbound::OtherEvent { event }) => {
                debug!(subject = %self.subject_id, event = ?event, "Ignoring event");
                Vec::new()
            }
            (phase, inbound) => {
                debug!(
                    subject = %self.subject_id,
                    phase = ?phase,
                    frame = ?inbound,
                    "Ignoring frame"
                );
                Vec::new()
            }
        }
    }

    /// The heartbeat timer fired.
    pub(crate) fn heartbeat_due(&self) -> Vec<Action> {
        if self.phase == Phase::Subscribed {
            vec![Action::Send(Outbound::Heartbeat)]
        } else {
            Vec::new()
        }
    }

    /// The transport closed or failed, from any phase.
    pub(crate) fn closed(&mut self) -> Vec<Action> {
        self.phase = Phase::ClosedPendingRetry;
        self.heartbeat_interval = None;
        vec![
            Action::StopHeartbeat,
            Action::SetConnected(false),
            Action::ScheduleRetry,
        ]
    }
}
