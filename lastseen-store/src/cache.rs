//! Short-lived read cache for stored last-seen records.
//!
//! Entries expire after a fixed TTL and the oldest entries are evicted once
//! the cache is full. Negative results ("never seen") are cached too.
//!
//! A fill generation guards against a lookup that read the database before
//! a write and inserts its result after the write invalidated the key: any
//! invalidation bumps the generation, and fills carrying an older generation
//! are dropped.

use indexmap::IndexMap;
use lastseen_model::Identity;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

struct CacheEntry {
    value: Option<u64>,
    inserted: Instant,
}

impl CacheEntry {
    fn is_expired(&self, ttl: Duration) -> bool {
        self.inserted.elapsed() > ttl
    }
}

#[derive(Default)]
struct Inner {
    entries: IndexMap<Identity, CacheEntry>,
    generation: u64,
}

pub struct ReadCache {
    ttl: Duration,
    capacity: usize,
    inner: Mutex<Inner>,
}

impl std::fmt::Debug for ReadCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadCache")
            .field("ttl", &self.ttl)
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

impl ReadCache {
    /// A zero `ttl` or zero `capacity` disables caching.
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            ttl,
            capacity,
            inner: Mutex::new(Inner::default()),
        }
    }

    fn enabled(&self) -> bool {
        !self.ttl.is_zero() && self.capacity > 0
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // Cache contents are disposable, so a poisoned lock is still usable.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Cached value for `identity`.
    ///
    /// Outer `None` is a miss; `Some(None)` is a cached "never seen".
    pub fn get(&self, identity: &Identity) -> Option<Option<u64>> {
        if !self.enabled() {
            return None;
        }
        let mut inner = self.lock();
        let expired = match inner.entries.get(identity) {
            Some(entry) if !entry.is_expired(self.ttl) => return Some(entry.value),
            Some(_) => true,
            None => false,
        };
        if expired {
            inner.entries.shift_remove(identity);
        }
        None
    }

    /// Token to pass to [`ReadCache::fill`] after reading the backing store.
    pub fn generation(&self) -> u64 {
        self.lock().generation
    }

    /// Insert a value read from the backing store, unless something was
    /// invalidated since `generation` was taken.
    pub fn fill(&self, identity: &Identity, value: Option<u64>, generation: u64) {
        if !self.enabled() {
            return;
        }
        let mut inner = self.lock();
        if inner.generation != generation {
            return;
        }
        if inner.entries.len() >= self.capacity && !inner.entries.contains_key(identity) {
            let ttl = self.ttl;
            inner.entries.retain(|_, entry| !entry.is_expired(ttl));
            while inner.entries.len() >= self.capacity {
                inner.entries.shift_remove_index(0);
            }
        }
        inner.entries.insert(
            identity.clone(),
            CacheEntry {
                value,
                inserted: Instant::now(),
            },
        );
    }

    pub fn invalidate(&self, identity: &Identity) {
        let mut inner = self.lock();
        inner.generation = inner.generation.wrapping_add(1);
        inner.entries.shift_remove(identity);
    }

    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.generation = inner.generation.wrapping_add(1);
        inner.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
