use std::path::{Path, PathBuf};

/// Configuration for where to keep last-seen records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    /// File-backed storage inside the given directory.
    File(PathBuf),
    /// In-memory storage (no filesystem). Useful for tests.
    InMemory,
}

impl StorageConfig {
    /// Directory the store writes into, if any.
    pub fn state_dir(&self) -> Option<&Path> {
        match self {
            StorageConfig::File(dir) => Some(dir),
            StorageConfig::InMemory => None,
        }
    }
}
