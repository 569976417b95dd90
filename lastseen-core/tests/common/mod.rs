#![allow(dead_code)]

use lastseen_core::{LookupService, PresenceSource, PresenceTracker, TrackerConfig};
use lastseen_model::{Clock, Identity, MockClock, OnlineMember, PresenceStatus};
use lastseen_store::{LastSeenDb, LastSeenStore, StoreError};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Presence source driven by the test: set the roster, bump the tick.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    pub tick: u64,
    pub members: Option<Vec<OnlineMember>>,
    pub polls: usize,
}

impl ScriptedSource {
    pub fn with_members(members: &[(&str, i32)]) -> Self {
        let mut source = Self::default();
        source.set_members(members);
        source
    }

    pub fn set_members(&mut self, members: &[(&str, i32)]) {
        self.members = Some(
            members
                .iter()
                .map(|(name, world)| OnlineMember::new(*name, *world))
                .collect(),
        );
    }
}

impl PresenceSource for ScriptedSource {
    fn tick_count(&self) -> u64 {
        self.tick
    }

    fn current_online_members(&mut self) -> Option<Vec<OnlineMember>> {
        self.polls += 1;
        self.members.clone()
    }
}

/// Store wrapper that fails writes for chosen identities and counts calls.
pub struct FlakyStore {
    pub inner: LastSeenDb,
    pub fail_writes_for: Mutex<HashSet<Identity>>,
    pub fail_reads: Mutex<bool>,
    pub cache_clears: Mutex<usize>,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self {
            inner: LastSeenDb::in_memory().unwrap(),
            fail_writes_for: Mutex::new(HashSet::new()),
            fail_reads: Mutex::new(false),
            cache_clears: Mutex::new(0),
        }
    }

    pub fn fail_writes(&self, name: &str) {
        self.fail_writes_for.lock().unwrap().insert(Identity::new(name));
    }

    fn injected() -> StoreError {
        StoreError::Io(std::io::Error::new(std::io::ErrorKind::Other, "injected failure"))
    }
}

impl LastSeenStore for FlakyStore {
    fn get(&self, identity: &Identity) -> Result<Option<u64>, StoreError> {
        if *self.fail_reads.lock().unwrap() {
            return Err(Self::injected());
        }
        self.inner.get(identity)
    }

    fn set(&self, identity: &Identity, timestamp_ms: u64) -> Result<(), StoreError> {
        if self.fail_writes_for.lock().unwrap().contains(identity) {
            return Err(Self::injected());
        }
        self.inner.set(identity, timestamp_ms)
    }

    fn delete(&self, identity: &Identity) -> Result<(), StoreError> {
        self.inner.delete(identity)
    }

    fn migrate(&self, old: &Identity, new: &Identity) -> Result<(), StoreError> {
        self.inner.migrate(old, new)
    }

    fn clear_cache(&self) {
        *self.cache_clears.lock().unwrap() += 1;
        self.inner.clear_cache();
    }
}

pub fn id(name: &str) -> Identity {
    Identity::new(name)
}

pub fn tracker_with(
    source: ScriptedSource,
    store: Arc<dyn LastSeenStore>,
    clock: &MockClock,
) -> PresenceTracker<ScriptedSource> {
    PresenceTracker::new(source, store, Arc::new(clock.clone()), TrackerConfig::default())
}

/// Clock that records what a lookup reports for one identity each time the
/// tracker reads the time.
pub struct StatusRecordingClock {
    pub time_ms: u64,
    pub watched: Identity,
    pub lookup: Mutex<Option<LookupService>>,
    pub seen: Mutex<Vec<PresenceStatus>>,
}

impl StatusRecordingClock {
    pub fn new(time_ms: u64, watched: &str) -> Self {
        Self {
            time_ms,
            watched: Identity::new(watched),
            lookup: Mutex::new(None),
            seen: Mutex::new(Vec::new()),
        }
    }
}

impl Clock for StatusRecordingClock {
    fn now_ms(&self) -> u64 {
        let lookup = self.lookup.lock().unwrap().clone();
        if let Some(lookup) = lookup {
            let status = lookup.status(&self.watched);
            self.seen.lock().unwrap().push(status);
        }
        self.time_ms
    }
}

/// Store that asks the lookup service about each identity right before
/// writing it, i.e. while the flush is in progress.
pub struct LookupOnWriteStore {
    pub inner: LastSeenDb,
    pub lookup: Mutex<Option<LookupService>>,
    pub seen_during_write: Mutex<Vec<(Identity, Option<u64>)>>,
}

impl LookupOnWriteStore {
    pub fn new() -> Self {
        Self {
            inner: LastSeenDb::in_memory().unwrap(),
            lookup: Mutex::new(None),
            seen_during_write: Mutex::new(Vec::new()),
        }
    }
}

impl LastSeenStore for LookupOnWriteStore {
    fn get(&self, identity: &Identity) -> Result<Option<u64>, StoreError> {
        self.inner.get(identity)
    }

    fn set(&self, identity: &Identity, timestamp_ms: u64) -> Result<(), StoreError> {
        let lookup = self.lookup.lock().unwrap().clone();
        if let Some(lookup) = lookup {
            let seen = lookup.last_seen(identity);
            self.seen_during_write.lock().unwrap().push((identity.clone(), seen));
        }
        self.inner.set(identity, timestamp_ms)
    }

    fn delete(&self, identity: &Identity) -> Result<(), StoreError> {
        self.inner.delete(identity)
    }

    fn migrate(&self, old: &Identity, new: &Identity) -> Result<(), StoreError> {
        self.inner.migrate(old, new)
    }

    fn clear_cache(&self) {
        self.inner.clear_cache();
    }
}
