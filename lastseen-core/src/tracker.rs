//! PresenceTracker - turns heartbeats into buffered last-seen updates
//!
//! Session state machine:
//! - `Inactive`: heartbeats are ignored
//! - `Active` → `Inactive`: flush, then drop the store's read cache
//! - `Inactive` → `Active`: drop the store's read cache, start accepting heartbeats

use crate::{
    IdentityLifecycle, LookupService, OnlineView, PresenceSource, TrackerConfig, WriteBehindBuffer,
};
use lastseen_model::{Clock, Identity, OnlineMember, SessionState};
use lastseen_store::LastSeenStore;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

/// Outcome of one flush.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlushReport {
    pub written: usize,
    pub failed: usize,
}

impl FlushReport {
    pub fn is_empty(&self) -> bool {
        self.written == 0 && self.failed == 0
    }
}

pub struct PresenceTracker<P> {
    source: P,
    store: Arc<dyn LastSeenStore>,
    clock: Arc<dyn Clock>,
    buffer: Arc<WriteBehindBuffer>,
    online: OnlineView,
    session: SessionState,
    config: TrackerConfig,
}

impl<P> std::fmt::Debug for PresenceTracker<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresenceTracker")
            .field("session", &self.session)
            .field("config", &self.config)
            .field("buffered", &self.buffer.len())
            .field("online", &self.online.len())
            .finish_non_exhaustive()
    }
}

impl<P: PresenceSource> PresenceTracker<P> {
    /// Create a tracker in the `Inactive` state with an empty buffer.
    pub fn new(
        source: P,
        store: Arc<dyn LastSeenStore>,
        clock: Arc<dyn Clock>,
        config: TrackerConfig,
    ) -> Self {
        Self {
            source,
            store,
            clock,
            buffer: Arc::new(WriteBehindBuffer::new()),
            online: OnlineView::default(),
            session: SessionState::Inactive,
            config,
        }
    }

    pub fn source(&self) -> &P {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut P {
        &mut self.source
    }

    pub fn buffer(&self) -> &Arc<WriteBehindBuffer> {
        &self.buffer
    }

    pub fn online(&self) -> &OnlineView {
        &self.online
    }

    pub fn session(&self) -> SessionState {
        self.session
    }

    pub fn config(&self) -> TrackerConfig {
        self.config
    }

    /// Lookup handle sharing this tracker's buffer, store and online set.
    pub fn lookup(&self) -> LookupService {
        LookupService::new(self.buffer.clone(), self.store.clone(), self.online.clone())
    }

    /// Rename/removal handler sharing this tracker's store.
    pub fn lifecycle(&self) -> IdentityLifecycle {
        IdentityLifecycle::new(self.store.clone())
    }

    /// Handle one heartbeat.
    ///
    /// Flushes first when the tick is due, then recomputes the online set
    /// and stamps every online identity with the current time.
    pub fn on_heartbeat(&mut self) {
        if !self.session.is_active() {
            return;
        }

        let tick = self.source.tick_count();
        if self.config.is_flush_tick(tick) {
            self.flush();
        }

        let Some(members) = self.source.current_online_members() else {
            trace!(tick, "Roster not loaded, skipping heartbeat");
            return;
        };

        let online: HashSet<Identity> = members
            .into_iter()
            .filter(OnlineMember::is_online)
            .map(|m| m.identity)
            .collect();

        trace!(tick, online = online.len(), "Heartbeat");
        self.online.replace(online.clone());

        let now = self.clock.now_ms();
        for identity in online {
            self.buffer.put(identity, now);
        }
    }

    /// Apply a session state notification from the host.
    pub fn on_session_changed(&mut self, state: SessionState) {
        match (self.session, state) {
            (SessionState::Active, SessionState::Inactive) => self.on_session_ended(),
            (SessionState::Inactive, SessionState::Active) => {
                debug!("Session started");
                self.session = SessionState::Active;
                self.store.clear_cache();
            }
            _ => {}
        }
    }

    /// The session left the active state: persist everything buffered and
    /// drop cached reads, which may belong to another account.
    pub fn on_session_ended(&mut self) {
        self.session = SessionState::Inactive;
        let report = self.flush();
        self.store.clear_cache();
        debug!(written = report.written, failed = report.failed, "Session ended");
    }

    /// Drain the buffer into the store.
    ///
    /// A failed write is logged and skipped; the rest of the entries are
    /// still written. Nothing is retried.
    pub fn flush(&self) -> FlushReport {
        let entries = self.buffer.drain_all();
        let mut report = FlushReport::default();

        for (identity, timestamp_ms) in entries {
            match self.store.set(&identity, timestamp_ms) {
                Ok(()) => report.written += 1,
                Err(e) => {
                    warn!(identity = %identity, timestamp_ms, error = %e, "Failed to persist last seen");
                    report.failed += 1;
                }
            }
        }
        self.buffer.complete_flush();

        if !report.is_empty() {
            debug!(written = report.written, failed = report.failed, "Flushed last-seen buffer");
        }
        report
    }

    /// Final flush before the host goes away.
    pub fn shutdown(&mut self) -> FlushReport {
        self.session = SessionState::Inactive;
        let report = self.flush();
        self.store.clear_cache();
        info!(written = report.written, failed = report.failed, "Presence tracker stopped");
        report
    }
}
