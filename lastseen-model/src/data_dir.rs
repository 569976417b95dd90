//! Data directory management
//!
//! Provides platform-specific paths for last-seen data:
//! - `state/lastseen.db`: durable last-seen records (redb)
//! - `roster.txt`: default roster file read by the daemon

use std::path::{Path, PathBuf};

const APP_NAME: &str = "lastseen";

#[derive(Debug, Clone)]
pub struct DataDir {
    base: PathBuf,
}

impl DataDir {
    /// Create a DataDir with a custom base path.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Create a DataDir using the platform-specific data directory.
    ///
    /// - Linux: `~/.local/share/lastseen/`
    /// - macOS: `~/Library/Application Support/lastseen/`
    /// - Windows: `C:\Users\<user>\AppData\Roaming\lastseen\`
    pub fn default_location() -> Option<Self> {
        dirs::data_dir().map(|d| Self::new(d.join(APP_NAME)))
    }

    /// Get the base directory path.
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Directory handed to the store; the store owns the files inside.
    pub fn state_dir(&self) -> PathBuf {
        self.base.join("state")
    }

    /// Default roster file location.
    pub fn roster_file(&self) -> PathBuf {
        self.base.join("roster.txt")
    }

    /// Ensure base and state directories exist.
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.base)?;
        std::fs::create_dir_all(self.state_dir())?;
        Ok(())
    }
}

impl Default for DataDir {
    fn default() -> Self {
        Self::default_location().unwrap_or_else(|| Self::new("./data"))
    }
}
