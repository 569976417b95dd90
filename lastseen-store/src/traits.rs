use crate::StoreError;
use lastseen_model::Identity;

/// Keyed durable storage for `identity -> last seen (ms since epoch)`.
///
/// Every mutating call must invalidate cached reads for the identities it
/// touches. Implementations are shared between the heartbeat path and
/// lookup callers, hence `Send + Sync`.
pub trait LastSeenStore: Send + Sync {
    /// Read the stored timestamp. `None` means never observed.
    fn get(&self, identity: &Identity) -> Result<Option<u64>, StoreError>;

    /// Overwrite the stored timestamp.
    fn set(&self, identity: &Identity, timestamp_ms: u64) -> Result<(), StoreError>;

    /// Remove the record entirely.
    fn delete(&self, identity: &Identity) -> Result<(), StoreError>;

    /// Move the record from `old` to `new` in one step. If `new` already
    /// has a record the later timestamp wins.
    fn migrate(&self, old: &Identity, new: &Identity) -> Result<(), StoreError>;

    /// Drop all cached reads. Records are untouched.
    fn clear_cache(&self);
}
