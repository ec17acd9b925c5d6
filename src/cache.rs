//! Pluggable cache capability for the read path.
//!
//! Services receive a [`Cache`] at construction instead of reaching for a
//! process-wide instance. [`NoopCache`] is the default and turns every read
//! into a miss; [`MemoryCache`] keeps entries in-process with a TTL. Values
//! are JSON strings so any backend that stores text can implement the trait.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

pub const BLOG_LIST: &str = "blogs:list";
pub const BLOG_DETAIL: &str = "blogs:detail";
pub const BLOG_RELATED: &str = "blogs:related";
pub const CATEGORIES: &str = "blogs:categories";
pub const TAGS: &str = "blogs:tags";

/// Build a namespaced key, e.g. `blogs:detail:my-post`.
pub fn cache_key(prefix: &str, id: &str) -> String {
    format!("{}:{}", prefix, id)
}

/// Key-value store with expiry and prefix deletion.
///
/// Failures are never fatal: a backend that cannot answer returns a miss
/// from `get` and `false` from the write operations.
pub trait Cache: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: String, ttl: Duration) -> bool;

    fn delete(&self, key: &str) -> bool;

    /// Remove every key starting with `prefix`. Returns how many were removed.
    fn delete_prefix(&self, prefix: &str) -> usize;
}

/// Read a JSON value from the cache. Undecodable entries count as misses.
pub fn get_json<T: DeserializeOwned>(cache: &dyn Cache, key: &str) -> Option<T> {
    let raw = cache.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(key, error = %err, "discarding undecodable cache entry");
            None
        }
    }
}

pub fn set_json<T: Serialize>(cache: &dyn Cache, key: &str, value: &T, ttl: Duration) -> bool {
    match serde_json::to_string(value) {
        Ok(raw) => cache.set(key, raw, ttl),
        Err(err) => {
            tracing::warn!(key, error = %err, "could not encode cache entry");
            false
        }
    }
}

/// A cache that stores nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCache;

impl Cache for NoopCache {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&self, _key: &str, _value: String, _ttl: Duration) -> bool {
        false
    }

    fn delete(&self, _key: &str) -> bool {
        false
    }

    fn delete_prefix(&self, _prefix: &str) -> usize {
        0
    }
}

#[derive(Debug)]
struct Entry {
    value: String,
    expires_at: Instant,
}

/// In-process cache guarded by a mutex. Expired entries are dropped lazily.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, Entry>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries()
            .values()
            .filter(|entry| entry.expires_at > now)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Cache for MemoryCache {
    fn get(&self, key: &str) -> Option<String> {
        let mut entries = self.entries();
        match entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    fn set(&self, key: &str, value: String, ttl: Duration) -> bool {
        let entry = Entry {
            value,
            expires_at: Instant::now() + ttl,
        };
        self.entries().insert(key.to_string(), entry);
        true
    }

    fn delete(&self, key: &str) -> bool {
        self.entries().remove(key).is_some()
    }

    fn delete_prefix(&self, prefix: &str) -> usize {
        let mut entries = self.entries();
        let before = entries.len();
        entries.retain(|key, _| !key.starts_with(prefix));
        before - entries.len()
    }
}
