//! Heartbeat loop driving the presence tracker.

use crate::roster::RosterSource;
use lastseen_core::{FlushReport, PresenceTracker};
use std::future::Future;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::debug;

/// Run heartbeats every `tick` until `shutdown` resolves, then flush.
pub async fn run_heartbeats(
    tracker: &mut PresenceTracker<RosterSource>,
    tick: Duration,
    shutdown: impl Future<Output = ()>,
) -> FlushReport {
    let mut interval = tokio::time::interval(tick);
    // A stalled host should not replay a burst of heartbeats afterwards.
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tokio::pin!(shutdown);

    debug!(roster = %tracker.source().path().display(), ?tick, "Heartbeat loop started");
    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            _ = interval.tick() => {
                let session = tracker.source_mut().advance().await;
                tracker.on_session_changed(session);
                tracker.on_heartbeat();
            }
        }
    }

    tracker.shutdown()
}
