//! In-memory write-behind buffer of last-seen timestamps.
//!
//! Entries accumulate between flushes. A flush takes everything with
//! [`WriteBehindBuffer::drain_all`], writes it to the store, then calls
//! [`WriteBehindBuffer::complete_flush`]. Between those two calls the drained
//! entries stay readable through [`WriteBehindBuffer::get`], so a lookup never
//! sees a gap while a flush is writing.
//!
//! No eviction: the buffer is bounded by the number of peers online at once.

use lastseen_model::Identity;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct Inner {
    pending: HashMap<Identity, u64>,
    in_flight: HashMap<Identity, u64>,
}

#[derive(Debug, Default)]
pub struct WriteBehindBuffer {
    inner: Mutex<Inner>,
}

impl WriteBehindBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Record `timestamp_ms` for `identity`, replacing any buffered value.
    pub fn put(&self, identity: Identity, timestamp_ms: u64) {
        self.lock().pending.insert(identity, timestamp_ms);
    }

    /// Take every pending entry, leaving the buffer empty for new puts.
    ///
    /// The returned entries stay visible to `get` until `complete_flush`.
    pub fn drain_all(&self) -> Vec<(Identity, u64)> {
        let mut inner = self.lock();
        let drained: Vec<(Identity, u64)> = inner.pending.drain().collect();
        inner.in_flight.extend(drained.iter().cloned());
        drained
    }

    /// Forget the entries handed out by the last `drain_all`.
    pub fn complete_flush(&self) {
        self.lock().in_flight.clear();
    }

    /// Buffered timestamp for `identity`. Pending values win over in-flight
    /// ones since they are newer.
    pub fn get(&self, identity: &Identity) -> Option<u64> {
        let inner = self.lock();
        inner
            .pending
            .get(identity)
            .or_else(|| inner.in_flight.get(identity))
            .copied()
    }

    /// Number of pending entries.
    pub fn len(&self) -> usize {
        self.lock().pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
