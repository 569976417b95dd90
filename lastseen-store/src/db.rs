//! LastSeenDb - redb-backed last-seen records
//!
//! Table:
//! - last_seen: identity (&str) → last seen online (u64, ms since epoch)

use crate::{LastSeenStore, ReadCache, StoreError};
use lastseen_model::{Identity, StorageConfig};
use redb::backends::InMemoryBackend;
use redb::{Database, ReadableTable, ReadableTableMetadata, TableDefinition};
use std::time::Duration;
use tracing::debug;

const TABLE_LAST_SEEN: TableDefinition<&str, u64> = TableDefinition::new("last_seen");
const DB_FILE: &str = "lastseen.db";

/// Tuning for the read cache in front of the database.
#[derive(Debug, Clone)]
pub struct StoreOptions {
    /// How long a cached read stays valid. Zero disables the cache.
    pub cache_ttl: Duration,
    /// Maximum number of cached identities.
    pub cache_capacity: usize,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            cache_ttl: Duration::from_secs(60),
            cache_capacity: 1024,
        }
    }
}

pub struct LastSeenDb {
    db: Database,
    cache: ReadCache,
}

impl std::fmt::Debug for LastSeenDb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LastSeenDb").finish_non_exhaustive()
    }
}

impl LastSeenDb {
    /// Open or create the store.
    ///
    /// For `StorageConfig::File(dir)` the directory is created if needed and
    /// the database lives at `dir/lastseen.db`.
    pub fn open(config: &StorageConfig, options: StoreOptions) -> Result<Self, StoreError> {
        let db = match config {
            StorageConfig::File(dir) => {
                std::fs::create_dir_all(dir)?;
                Database::create(dir.join(DB_FILE))?
            }
            StorageConfig::InMemory => {
                Database::builder().create_with_backend(InMemoryBackend::new())?
            }
        };

        // Create the table up front so readers never see TableDoesNotExist.
        let write_txn = db.begin_write()?;
        write_txn.open_table(TABLE_LAST_SEEN)?;
        write_txn.commit()?;

        debug!(?config, "Opened last-seen store");
        Ok(Self {
            db,
            cache: ReadCache::new(options.cache_ttl, options.cache_capacity),
        })
    }

    /// In-memory store with default options.
    pub fn in_memory() -> Result<Self, StoreError> {
        Self::open(&StorageConfig::InMemory, StoreOptions::default())
    }

    /// Access the read cache (for inspection).
    pub fn cache(&self) -> &ReadCache {
        &self.cache
    }

    /// Number of stored records.
    pub fn len(&self) -> Result<u64, StoreError> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(TABLE_LAST_SEEN)?;
        Ok(table.len()?)
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    /// All records, ordered by identity. Bypasses the cache.
    pub fn list_all(&self) -> Result<Vec<(Identity, u64)>, StoreError> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(TABLE_LAST_SEEN)?;
        let mut result = Vec::new();
        for entry in table.iter()? {
            let (k, v) = entry?;
            result.push((Identity::new(k.value()), v.value()));
        }
        Ok(result)
    }

    fn read(&self, identity: &Identity) -> Result<Option<u64>, StoreError> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(TABLE_LAST_SEEN)?;
        let value = table.get(identity.as_str())?.map(|v| v.value());
        Ok(value)
    }
}

impl LastSeenStore for LastSeenDb {
    fn get(&self, identity: &Identity) -> Result<Option<u64>, StoreError> {
        if let Some(cached) = self.cache.get(identity) {
            return Ok(cached);
        }
        let generation = self.cache.generation();
        let value = self.read(identity)?;
        self.cache.fill(identity, value, generation);
        Ok(value)
    }

    fn set(&self, identity: &Identity, timestamp_ms: u64) -> Result<(), StoreError> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(TABLE_LAST_SEEN)?;
            table.insert(identity.as_str(), timestamp_ms)?;
        }
        write_txn.commit()?;
        self.cache.invalidate(identity);
        Ok(())
    }

    fn delete(&self, identity: &Identity) -> Result<(), StoreError> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(TABLE_LAST_SEEN)?;
            table.remove(identity.as_str())?;
        }
        write_txn.commit()?;
        self.cache.invalidate(identity);
        Ok(())
    }

    fn migrate(&self, old: &Identity, new: &Identity) -> Result<(), StoreError> {
        if old == new {
            return Ok(());
        }

        let write_txn = self.db.begin_write()?;
        let moved = {
            let mut table = write_txn.open_table(TABLE_LAST_SEEN)?;
            let old_ts = table.get(old.as_str())?.map(|v| v.value());
            match old_ts {
                Some(old_ts) => {
                    let new_ts = table.get(new.as_str())?.map(|v| v.value());
                    let winner = new_ts.map_or(old_ts, |n| n.max(old_ts));
                    table.remove(old.as_str())?;
                    table.insert(new.as_str(), winner)?;
                    Some(winner)
                }
                None => None,
            }
        };
        write_txn.commit()?;

        self.cache.invalidate(old);
        self.cache.invalidate(new);
        debug!(old = %old, new = %new, timestamp_ms = ?moved, "Migrated last-seen record");
        Ok(())
    }

    fn clear_cache(&self) {
        self.cache.clear();
    }
}
