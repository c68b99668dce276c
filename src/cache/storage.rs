//! In-memory response cache with TTL expiry and FIFO eviction
//!
//! Entries expire lazily: an entry past its TTL is removed the next time `get`/`has`
//! touches it, or when the periodic sweep runs. When the cache is full the entry
//! inserted first is evicted, regardless of how recently it was read.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use log::debug;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::time::Instant;

/// Default time-to-live for cached responses
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// Default maximum number of cached responses
pub const DEFAULT_MAX_ENTRIES: usize = 100;

/// A single cached payload.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub key: String,
    pub value: Value,
    pub inserted_at: Instant,
    /// Insertion order, breaks ties between entries inserted at the same instant
    seq: u64,
}

/// Live cache configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheConfig {
    /// Entries at least this old are treated as absent
    pub ttl: Duration,
    /// Hard cap on the number of entries
    pub max_entries: usize,
    /// Keys containing any of these substrings are never cached
    pub excluded_key_patterns: Vec<String>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_TTL,
            max_entries: DEFAULT_MAX_ENTRIES,
            excluded_key_patterns: vec!["/auth".to_string()],
        }
    }
}

/// Partial update merged into the live [`CacheConfig`].
#[derive(Debug, Clone, Default)]
pub struct CacheConfigUpdate {
    pub ttl: Option<Duration>,
    pub max_entries: Option<usize>,
    pub excluded_key_patterns: Option<Vec<String>>,
}

/// Statistics about cache state
#[derive(Debug, Clone, PartialEq)]
pub struct CacheStats {
    pub total_entries: usize,
    pub valid_entries: usize,
    pub expired_entries: usize,
    pub oldest_entry_age: Option<Duration>,
    pub newest_entry_age: Option<Duration>,
}

#[derive(Debug, Default)]
struct CacheInner {
    entries: HashMap<String, CacheEntry>,
    config: CacheConfig,
    next_seq: u64,
}

impl CacheInner {
    fn is_expired(&self, entry: &CacheEntry, now: Instant) -> bool {
        now.saturating_duration_since(entry.inserted_at) >= self.config.ttl
    }

    fn is_excluded(&self, key: &str) -> bool {
        self.config
            .excluded_key_patterns
            .iter()
            .any(|pattern| key.contains(pattern.as_str()))
    }

    /// Remove the entry with the oldest insertion time.
    fn evict_oldest(&mut self) -> Option<String> {
        let oldest = self
            .entries
            .values()
            .min_by_key(|e| (e.inserted_at, e.seq))
            .map(|e| e.key.clone())?;
        self.entries.remove(&oldest);
        Some(oldest)
    }

    /// Look up a key, dropping it if expired.
    fn live_entry(&mut self, key: &str) -> Option<&CacheEntry> {
        let now = Instant::now();
        let expired = match self.entries.get(key) {
            Some(entry) => self.is_expired(entry, now),
            None => return None,
        };

        if expired {
            debug!("Cache expired: {}", key);
            self.entries.remove(key);
            return None;
        }
        self.entries.get(key)
    }
}

/// Process-wide response cache.
///
/// All mutation goes through `&self` methods guarded by an internal mutex, so a single
/// instance can be shared via `Arc` between the store and the sweep task. None of the
/// operations fail; absence is reported as `None`/`false`.
#[derive(Debug, Default)]
pub struct ResponseCache {
    inner: Mutex<CacheInner>,
}

impl ResponseCache {
    /// Create a cache with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache with a specific configuration.
    pub fn with_config(config: CacheConfig) -> Self {
        Self {
            inner: Mutex::new(CacheInner {
                config,
                ..CacheInner::default()
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, CacheInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Merge the provided fields into the live configuration.
    ///
    /// No validation is applied; `max_entries = 0` turns every `set` into a no-op.
    #[allow(dead_code)]
    pub fn configure(&self, update: CacheConfigUpdate) {
        let mut inner = self.lock();
        if let Some(ttl) = update.ttl {
            inner.config.ttl = ttl;
        }
        if let Some(max_entries) = update.max_entries {
            inner.config.max_entries = max_entries;
        }
        if let Some(patterns) = update.excluded_key_patterns {
            inner.config.excluded_key_patterns = patterns;
        }
    }

    /// Snapshot of the live configuration.
    pub fn config(&self) -> CacheConfig {
        self.lock().config.clone()
    }

    /// Get a cached value if present and not expired.
    pub fn get(&self, key: &str) -> Option<Value> {
        let mut inner = self.lock();
        inner.live_entry(key).map(|e| e.value.clone())
    }

    /// Get a cached value and deserialize it.
    ///
    /// A payload that no longer deserializes into `T` is reported as a miss.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.get(key)
            .and_then(|value| serde_json::from_value(value).ok())
    }

    /// Whether a live entry exists for `key`.
    pub fn has(&self, key: &str) -> bool {
        let mut inner = self.lock();
        inner.live_entry(key).is_some()
    }

    /// Store a value.
    ///
    /// Keys matching an excluded pattern are silently dropped. When the cache is full
    /// the oldest entry is evicted first.
    pub fn set(&self, key: &str, value: Value) {
        let mut inner = self.lock();

        if inner.is_excluded(key) {
            debug!("Cache skip (excluded): {}", key);
            return;
        }

        // Replacing an existing key never needs to make room
        inner.entries.remove(key);

        while !inner.entries.is_empty() && inner.entries.len() >= inner.config.max_entries {
            if let Some(evicted) = inner.evict_oldest() {
                debug!("Cache evicted: {}", evicted);
            }
        }

        if inner.config.max_entries == 0 {
            return;
        }

        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.entries.insert(
            key.to_string(),
            CacheEntry {
                key: key.to_string(),
                value,
                inserted_at: Instant::now(),
                seq,
            },
        );
    }

    /// Delete a specific entry. Missing keys are ignored.
    pub fn remove(&self, key: &str) {
        self.lock().entries.remove(key);
    }

    /// Delete every entry whose key contains `pattern`.
    pub fn remove_by_pattern(&self, pattern: &str) -> usize {
        let mut inner = self.lock();
        let before = inner.entries.len();
        inner.entries.retain(|key, _| !key.contains(pattern));
        let removed = before - inner.entries.len();
        if removed > 0 {
            debug!("Cache invalidated {} entries matching {}", removed, pattern);
        }
        removed
    }

    /// Drop all entries.
    pub fn clear(&self) -> usize {
        let mut inner = self.lock();
        let count = inner.entries.len();
        inner.entries.clear();
        count
    }

    /// Remove every entry past its TTL.
    pub fn sweep_expired(&self) -> usize {
        let mut inner = self.lock();
        let now = Instant::now();
        let ttl = inner.config.ttl;
        let before = inner.entries.len();
        inner
            .entries
            .retain(|_, e| now.saturating_duration_since(e.inserted_at) < ttl);
        before - inner.entries.len()
    }

    /// Keys currently held, including expired entries not yet swept.
    pub fn keys(&self) -> Vec<String> {
        let mut entries: Vec<(u64, String)> = self
            .lock()
            .entries
            .values()
            .map(|e| (e.seq, e.key.clone()))
            .collect();
        entries.sort();
        entries.into_iter().map(|(_, key)| key).collect()
    }

    /// Number of entries currently held, including expired entries not yet swept.
    pub fn size(&self) -> usize {
        self.lock().entries.len()
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        let inner = self.lock();
        let now = Instant::now();

        let total_entries = inner.entries.len();
        let expired_entries = inner
            .entries
            .values()
            .filter(|e| inner.is_expired(e, now))
            .count();
        let ages = inner
            .entries
            .values()
            .map(|e| now.saturating_duration_since(e.inserted_at));

        CacheStats {
            total_entries,
            valid_entries: total_entries - expired_entries,
            expired_entries,
            oldest_entry_age: ages.clone().max(),
            newest_entry_age: ages.min(),
        }
    }
}
