//! Runtime settings assembled from command-line flags.

use lastseen_core::TrackerConfig;
use lastseen_model::{DataDir, StorageConfig};
use lastseen_store::StoreOptions;
use std::path::PathBuf;
use std::time::Duration;

/// One game tick.
pub const DEFAULT_TICK_MS: u64 = 600;
pub const DEFAULT_CACHE_TTL_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct DaemonConfig {
    pub data_dir: DataDir,
    pub storage: StorageConfig,
    pub store: StoreOptions,
    pub tracker: TrackerConfig,
    pub tick_interval: Duration,
    pub roster: PathBuf,
}

impl DaemonConfig {
    pub fn new(data_dir: Option<PathBuf>, in_memory: bool) -> Self {
        let data_dir = data_dir.map(DataDir::new).unwrap_or_default();
        let storage = if in_memory {
            StorageConfig::InMemory
        } else {
            StorageConfig::File(data_dir.state_dir())
        };
        let roster = data_dir.roster_file();
        Self {
            data_dir,
            storage,
            store: StoreOptions {
                cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
                ..StoreOptions::default()
            },
            tracker: TrackerConfig::default(),
            tick_interval: Duration::from_millis(DEFAULT_TICK_MS),
            roster,
        }
    }

    pub fn with_cache_ttl_secs(mut self, secs: u64) -> Self {
        self.store.cache_ttl = Duration::from_secs(secs);
        self
    }

    pub fn with_tick_ms(mut self, tick_ms: u64) -> Self {
        // A zero interval would make tokio::time::interval panic.
        self.tick_interval = Duration::from_millis(tick_ms.max(1));
        self
    }

    pub fn with_flush_every(mut self, ticks: u64) -> Self {
        self.tracker = TrackerConfig::with_flush_interval(ticks);
        self
    }

    pub fn with_roster(mut self, roster: Option<PathBuf>) -> Self {
        if let Some(roster) = roster {
            self.roster = roster;
        }
        self
    }
}
