use crate::{OnlineView, WriteBehindBuffer};
use lastseen_model::{Identity, PresenceStatus};
use lastseen_store::LastSeenStore;
use std::sync::Arc;
use tracing::warn;

/// Answers "when was this identity last seen online".
///
/// Resolution order is buffer, then store. Safe to call from any thread.
#[derive(Clone)]
pub struct LookupService {
    buffer: Arc<WriteBehindBuffer>,
    store: Arc<dyn LastSeenStore>,
    online: OnlineView,
}

impl std::fmt::Debug for LookupService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LookupService").finish_non_exhaustive()
    }
}

impl LookupService {
    pub fn new(
        buffer: Arc<WriteBehindBuffer>,
        store: Arc<dyn LastSeenStore>,
        online: OnlineView,
    ) -> Self {
        Self { buffer, store, online }
    }

    /// Latest known timestamp, or `None` if never observed.
    ///
    /// Store failures read as `None`.
    pub fn last_seen(&self, identity: &Identity) -> Option<u64> {
        if let Some(ts) = self.buffer.get(identity) {
            return Some(ts);
        }
        match self.store.get(identity) {
            Ok(ts) => ts,
            Err(e) => {
                warn!(identity = %identity, error = %e, "Failed to read last seen");
                None
            }
        }
    }

    /// Caller-facing status: online peers get no timestamp.
    pub fn status(&self, identity: &Identity) -> PresenceStatus {
        if identity.is_blank() {
            return PresenceStatus::Unknown;
        }
        if self.is_online(identity) {
            return PresenceStatus::Online;
        }
        match self.last_seen(identity) {
            Some(ts) => PresenceStatus::LastSeen(ts),
            None => PresenceStatus::Unknown,
        }
    }

    pub fn is_online(&self, identity: &Identity) -> bool {
        self.online.contains(identity)
    }
}
