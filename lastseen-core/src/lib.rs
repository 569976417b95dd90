//! lastseen-core - presence tracking with write-behind persistence
//!
//! Heartbeats from a [`PresenceSource`] stamp every online identity into a
//! [`WriteBehindBuffer`]; the [`PresenceTracker`] drains that buffer into a
//! [`LastSeenStore`](lastseen_store::LastSeenStore) every
//! `flush_interval_ticks` heartbeats and whenever the session ends.
//!
//! - `IdentityLifecycle` forwards renames and removals to the store
//! - `LookupService` answers "last seen" from buffer, then store
//!
//! All three share one buffer and one store, so lookups can run from a
//! different thread than the heartbeat.

pub mod buffer;
pub mod config;
pub mod lifecycle;
pub mod lookup;
pub mod online;
pub mod source;
pub mod tracker;

pub use buffer::WriteBehindBuffer;
pub use config::TrackerConfig;
pub use lifecycle::IdentityLifecycle;
pub use lookup::LookupService;
pub use online::OnlineView;
pub use source::PresenceSource;
pub use tracker::{FlushReport, PresenceTracker};
