use lastseen_model::Identity;
use std::collections::HashSet;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// The set of identities online as of the latest heartbeat.
///
/// Cloning shares the set. Only the tracker replaces it.
#[derive(Debug, Clone, Default)]
pub struct OnlineView {
    inner: Arc<RwLock<HashSet<Identity>>>,
}

impl OnlineView {
    fn read(&self) -> RwLockReadGuard<'_, HashSet<Identity>> {
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashSet<Identity>> {
        self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn contains(&self, identity: &Identity) -> bool {
        self.read().contains(identity)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Sorted copy of the current set.
    pub fn snapshot(&self) -> Vec<Identity> {
        let mut out: Vec<Identity> = self.read().iter().cloned().collect();
        out.sort();
        out
    }

    pub(crate) fn replace(&self, online: HashSet<Identity>) {
        *self.write() = online;
    }
}
