//! Time-expiring cache for remotely sourced icon data.
//!
//! Entries are stored as JSON `{ "data": ..., "timestamp": <ms> }` documents
//! in a [`KeyValueStore`]. A lookup older than the expiry window is treated
//! as absent and evicted. Storage failures never reach the caller: a failed
//! write simply leaves nothing cached.
//!
//! Access is single-threaded; the cache takes `&mut self` for every lookup
//! because reads may evict.

pub mod store;

pub use store::{FileStore, KeyValueStore, MemoryStore};

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::StorageError;

/// Namespace prefix shared by every cache key.
pub const CACHE_PREFIX: &str = "iconify_cache_";

/// Entries older than this are considered stale.
pub const CACHE_EXPIRY: Duration = Duration::from_secs(24 * 60 * 60);

// ============================================================================
// Clock
// ============================================================================

/// Source of the current time in milliseconds since the Unix epoch.
pub trait Clock {
    fn now_millis(&self) -> u64;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock(Rc<Cell<u64>>);

impl ManualClock {
    pub fn new(start_millis: u64) -> Self {
        Self(Rc::new(Cell::new(start_millis)))
    }

    pub fn set(&self, millis: u64) {
        self.0.set(millis);
    }

    pub fn advance(&self, by: Duration) {
        self.0.set(self.0.get() + by.as_millis() as u64);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> u64 {
        self.0.get()
    }
}

// ============================================================================
// CacheKey
// ============================================================================

/// The two key spaces the cache serves.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// Icon names of one collection.
    IconList { prefix: String },
    /// Markup of one icon.
    IconMarkup { prefix: String, name: String },
}

impl CacheKey {
    pub fn icon_list(prefix: impl Into<String>) -> Self {
        Self::IconList {
            prefix: prefix.into(),
        }
    }

    pub fn icon_markup(prefix: impl Into<String>, name: impl Into<String>) -> Self {
        Self::IconMarkup {
            prefix: prefix.into(),
            name: name.into(),
        }
    }

    /// The key under which the entry is persisted.
    pub fn storage_key(&self) -> String {
        match self {
            Self::IconList { prefix } => format!("{CACHE_PREFIX}list_{prefix}"),
            Self::IconMarkup { prefix, name } => format!("{CACHE_PREFIX}{prefix}_{name}"),
        }
    }
}

// ============================================================================
// ResourceCache
// ============================================================================

#[derive(Serialize, Deserialize)]
struct CacheEntry<T> {
    data: T,
    timestamp: u64,
}

/// Expiring cache in front of the icon data provider.
pub struct ResourceCache {
    store: Box<dyn KeyValueStore>,
    clock: Box<dyn Clock>,
    expiry: Duration,
}

impl ResourceCache {
    /// Creates a cache over `store` using the system clock.
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Box::new(store),
            clock: Box::new(SystemClock),
            expiry: CACHE_EXPIRY,
        }
    }

    /// Creates a cache backed by a fresh [`MemoryStore`].
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    /// Replaces the clock used to stamp and age entries.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn expiry(&self) -> Duration {
        self.expiry
    }

    /// Returns the cached payload, or `None` if it is missing, unreadable,
    /// or older than the expiry window. Expired entries are evicted.
    pub fn get<T: DeserializeOwned>(&mut self, key: &CacheKey) -> Option<T> {
        let storage_key = key.storage_key();
        let Some(raw) = self.store.read(&storage_key) else {
            log::debug!("cache miss `{storage_key}`");
            return None;
        };

        let entry: CacheEntry<T> = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(err) => {
                log::debug!("ignoring unreadable cache entry `{storage_key}`: {err}");
                return None;
            }
        };

        let age = self.clock.now_millis().saturating_sub(entry.timestamp);
        if age > self.expiry.as_millis() as u64 {
            log::debug!("cache entry `{storage_key}` expired");
            if let Err(err) = self.store.remove(&storage_key) {
                log::warn!("failed to evict cache entry `{storage_key}`: {err}");
            }
            return None;
        }

        log::debug!("cache hit `{storage_key}`");
        Some(entry.data)
    }

    /// Stores `payload`, overwriting any existing entry. Failures are logged
    /// and otherwise ignored.
    pub fn put<T: Serialize>(&mut self, key: &CacheKey, payload: &T) {
        let storage_key = key.storage_key();
        let entry = CacheEntry {
            data: payload,
            timestamp: self.clock.now_millis(),
        };

        let result = serde_json::to_string(&entry)
            .map_err(StorageError::from)
            .and_then(|json| self.store.write(&storage_key, &json));

        if let Err(err) = result {
            log::warn!("discarding cache write for `{storage_key}`: {err}");
        }
    }
}
