//! Local cache for API responses
//!
//! A process-wide, in-memory store with a TTL, a hard size cap, and key-pattern
//! exclusion. Used by the fleet store to avoid repeating network fetches.

pub mod key;
pub mod storage;
pub mod sweep;

// Re-export main types
pub use key::cache_key;
#[allow(unused_imports)]
pub use storage::{CacheConfig, CacheConfigUpdate, CacheEntry, CacheStats, ResponseCache};
pub use sweep::{SWEEP_INTERVAL, spawn_sweep_task};
