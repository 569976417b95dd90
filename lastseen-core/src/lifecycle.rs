use lastseen_model::Identity;
use lastseen_store::LastSeenStore;
use std::sync::Arc;
use tracing::{debug, warn};

/// Keeps stored records in line with identity renames and removals.
///
/// The buffer is deliberately left alone: entries buffered under an old or
/// removed identity are persisted by the next flush like any other.
#[derive(Clone)]
pub struct IdentityLifecycle {
    store: Arc<dyn LastSeenStore>,
}

impl std::fmt::Debug for IdentityLifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityLifecycle").finish_non_exhaustive()
    }
}

impl IdentityLifecycle {
    pub fn new(store: Arc<dyn LastSeenStore>) -> Self {
        Self { store }
    }

    /// A tracked peer changed name. Blank names mean no real rename.
    pub fn on_renamed(&self, old: &Identity, new: &Identity) {
        if old.is_blank() || new.is_blank() {
            debug!(old = %old, new = %new, "Ignoring rename with blank identity");
            return;
        }
        if let Err(e) = self.store.migrate(old, new) {
            warn!(old = %old, new = %new, error = %e, "Failed to migrate last seen");
        }
    }

    /// A peer is no longer tracked.
    pub fn on_removed(&self, identity: &Identity) {
        if identity.is_blank() {
            return;
        }
        if let Err(e) = self.store.delete(identity) {
            warn!(identity = %identity, error = %e, "Failed to delete last seen");
        }
    }
}
