//! Clock abstraction for testable time
//!
//! Provides a trait for getting the current time, with implementations
//! for real system time and a settable mock for tests.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Trait for getting the current wall clock time in milliseconds
pub trait Clock: Send + Sync {
    /// Get the current time in milliseconds since Unix epoch
    fn now_ms(&self) -> u64;
}

/// Real system clock implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("Time went backwards")
            .as_millis() as u64
    }
}

/// Mock clock for testing.
///
/// Clones share the same underlying time, so a test can keep one handle
/// and advance it while the tracker reads through another.
#[derive(Debug, Clone, Default)]
pub struct MockClock {
    time_ms: Arc<AtomicU64>,
}

impl MockClock {
    pub fn new(time_ms: u64) -> Self {
        Self { time_ms: Arc::new(AtomicU64::new(time_ms)) }
    }

    pub fn set(&self, time_ms: u64) {
        self.time_ms.store(time_ms, Ordering::SeqCst);
    }

    pub fn advance(&self, delta_ms: u64) {
        self.time_ms.fetch_add(delta_ms, Ordering::SeqCst);
    }
}

impl Clock for MockClock {
    fn now_ms(&self) -> u64 {
        self.time_ms.load(Ordering::SeqCst)
    }
}
