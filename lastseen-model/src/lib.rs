//! Lastseen Model
//!
//! Plain data types shared by the durable store, the presence tracker and
//! host processes. Nothing here touches storage or the network.

pub mod clock;
pub mod data_dir;
pub mod identity;
pub mod presence;
pub mod storage_config;

// Re-exports
pub use clock::{Clock, MockClock, SystemClock};
pub use data_dir::DataDir;
pub use identity::{normalize_display_name, Identity};
pub use presence::{OnlineMember, PresenceStatus, SessionState};
pub use storage_config::StorageConfig;
