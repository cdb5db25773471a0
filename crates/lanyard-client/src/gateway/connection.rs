//! Background connection loop: one socket at a time, heartbeat, retry.

use std::sync::Arc;
use std::time::Duration;

use lanyard_common::TransportError;
use tokio::sync::watch;
use tokio::time::{Instant, Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::backoff::Backoff;
use crate::snapshot::PresenceSnapshot;
use crate::transport::{Connector, Socket};

use super::session::{Action, Phase, Session};
use super::types::{ClientConfig, PresenceState};

/// Upper bound on a graceful close.
const CLOSE_TIMEOUT: Duration = Duration::from_secs(1);

// ---------------------------------------------------------------------------
// Publisher
// ---------------------------------------------------------------------------

/// Writes to the published state, refusing once the client is cancelled.
///
/// The cancellation check runs while the watch lock is held, and `dispose`
/// takes that same lock after cancelling. Once `dispose` returns, no write
/// can land.
#[derive(Clone)]
pub(crate) struct Publisher {
    state: Arc<watch::Sender<PresenceState>>,
    cancel: CancellationToken,
}

impl Publisher {
    pub(crate) fn new(state: Arc<watch::Sender<PresenceState>>, cancel: CancellationToken) -> Self {
        Self { state, cancel }
    }

    fn publish(&self, snapshot: Arc<PresenceSnapshot>) {
        self.state.send_if_modified(|state| {
            if self.cancel.is_cancelled() {
                return false;
            }
            state.snapshot = Some(snapshot);
            true
        });
    }

    fn set_connected(&self, connected: bool) {
        self.state.send_if_modified(|state| {
            if self.cancel.is_cancelled() || state.connected == connected {
                return false;
            }
            state.connected = connected;
            true
        });
    }

    fn set_exhausted(&self) {
        self.state.send_if_modified(|state| {
            if self.cancel.is_cancelled() {
                return false;
            }
            state.connected = false;
            state.exhausted = true;
            true
        });
    }
}

// ---------------------------------------------------------------------------
// Connection Loop
// ---------------------------------------------------------------------------

enum SocketOutcome {
    /// The socket closed or failed. `subscribed` records whether the
    /// handshake completed before that.
    Closed { subscribed: bool },
    Cancelled,
}

/// Background task owning the gateway connection for one subject.
pub(crate) async fn connection_loop(
    subject_id: String,
    config: ClientConfig,
    connector: Arc<dyn Connector>,
    publisher: Publisher,
    cancel: CancellationToken,
) {
    let mut session = Session::new(subject_id.clone());
    let mut backoff = Backoff::new(config.retry.clone());
    let mut consecutive_failures: u32 = 0;

    loop {
        session.connecting();
        info!(subject = %subject_id, url = %config.url, "Connecting to presence gateway");

        let attempt = tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            attempt = tokio::time::timeout(config.connect_timeout, connector.connect(&config.url)) => {
                attempt.unwrap_or(Err(TransportError::Timeout(config.connect_timeout)))
            }
        };

        let subscribed = match attempt {
            Ok(socket) => {
                match run_socket(socket, &mut session, &config, &publisher, &cancel).await {
                    SocketOutcome::Cancelled => break,
                    SocketOutcome::Closed { subscribed } => subscribed,
                }
            }
            Err(e) => {
                warn!(subject = %subject_id, error = %e, "Failed to connect to presence gateway");
                let closing = session.closed();
                apply_local(&closing, &publisher);
                false
            }
        };

        if subscribed {
            backoff.reset();
            consecutive_failures = 0;
        } else {
            consecutive_failures = consecutive_failures.saturating_add(1);
        }

        if let Some(max) = config.max_consecutive_failures {
            if consecutive_failures >= max {
                warn!(
                    subject = %subject_id,
                    failures = consecutive_failures,
                    "Giving up on presence gateway"
                );
                publisher.set_exhausted();
                break;
            }
        }

        let delay = backoff.next_delay();
        info!(
            subject = %subject_id,
            delay_ms = delay.as_millis() as u64,
            "Reconnecting to presence gateway"
        );
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = tokio::time::sleep(delay) => {}
        }
    }

    debug!(subject = %subject_id, "Connection loop finished");
}

/// Drive one open socket until it closes or the client is cancelled.
async fn run_socket(
    mut socket: Box<dyn Socket>,
    session: &mut Session,
    config: &ClientConfig,
    publisher: &Publisher,
    cancel: &CancellationToken,
) -> SocketOutcome {
    let mut heartbeat: Option<Interval> = None;
    let mut subscribed = false;
    let hello_deadline = tokio::time::sleep(config.hello_timeout);
    tokio::pin!(hello_deadline);

    let mut pending = session.opened();

    loop {
        if let Err(e) = execute(&pending, socket.as_mut(), &mut heartbeat, publisher, cancel).await
        {
            warn!(error = %e, "Gateway send failed");
            break;
        }
        if session.phase() == Phase::Subscribed {
            subscribed = true;
        }

        pending = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                let _ = tokio::time::timeout(CLOSE_TIMEOUT, socket.close()).await;
                return SocketOutcome::Cancelled;
            }
            _ = &mut hello_deadline, if session.phase() == Phase::AwaitingHello => {
                warn!(
                    timeout_ms = config.hello_timeout.as_millis() as u64,
                    "No hello from presence gateway"
                );
                let _ = tokio::time::timeout(CLOSE_TIMEOUT, socket.close()).await;
                break;
            }
            _ = next_tick(&mut heartbeat) => session.heartbeat_due(),
            frame = socket.recv() => match frame {
                Some(Ok(text)) => session.frame(&text),
                Some(Err(e)) => {
                    warn!(error = %e, "Presence gateway socket error");
                    break;
                }
                None => {
                    info!("Presence gateway closed connection");
                    break;
                }
            },
        };
    }

    drop(socket);
    let closing = session.closed();
    apply_local(&closing, publisher);
    SocketOutcome::Closed { subscribed }
}

/// Execute session actions against an open socket, in order.
async fn execute(
    actions: &[Action],
    socket: &mut dyn Socket,
    heartbeat: &mut Option<Interval>,
    publisher: &Publisher,
    cancel: &CancellationToken,
) -> Result<(), TransportError> {
    for action in actions {
        if cancel.is_cancelled() {
            return Ok(());
        }
        match action {
            Action::Send(frame) => socket.send(frame.encode()).await?,
            Action::StartHeartbeat(period) => *heartbeat = Some(heartbeat_timer(*period)),
            Action::StopHeartbeat => *heartbeat = None,
            Action::Publish(snapshot) => publisher.publish(Arc::clone(snapshot)),
            Action::SetConnected(connected) => publisher.set_connected(*connected),
            Action::ScheduleRetry => {}
        }
    }
    Ok(())
}

/// Actions that need no socket: used once the socket is gone.
fn apply_local(actions: &[Action], publisher: &Publisher) {
    for action in actions {
        match action {
            Action::Publish(snapshot) => publisher.publish(Arc::clone(snapshot)),
            Action::SetConnected(connected) => publisher.set_connected(*connected),
            // Timers die with `run_socket`; the retry is the caller's loop.
            Action::Send(_)
            | Action::StartHeartbeat(_)
            | Action::StopHeartbeat
            | Action::ScheduleRetry => {}
        }
    }
}

fn heartbeat_timer(period: Duration) -> Interval {
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

async fn next_tick(heartbeat: &mut Option<Interval>) {
    match heartbeat {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}
