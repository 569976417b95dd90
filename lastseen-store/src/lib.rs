//! lastseen-store - durable storage for last-seen records
//!
//! - `LastSeenStore` is the contract the tracker consumes
//! - `LastSeenDb` implements it on redb (file-backed or in-memory)
//! - `ReadCache` is the short-lived read cache every mutation invalidates

pub mod cache;
pub mod db;
pub mod error;
pub mod traits;

pub use cache::ReadCache;
pub use db::{LastSeenDb, StoreOptions};
pub use error::StoreError;
pub use traits::LastSeenStore;
