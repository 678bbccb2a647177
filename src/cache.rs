use crate::clock::Clock;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tracing::{debug, info};

#[derive(Debug)]
struct CacheEntry<V> {
    value: V,
    created_at: Instant,
    ttl: Duration,
}

impl<V> CacheEntry<V> {
    fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) > self.ttl
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub size: usize,
    pub oldest_age: Duration,
    pub newest_age: Duration,
}

/// In-memory key/value store where every entry carries its own time-to-live.
///
/// Expired entries are dropped lazily by `get`, or in bulk by `sweep` for
/// keys that are written once and never read again.
pub struct TtlCache<V> {
    entries: Mutex<HashMap<String, CacheEntry<V>>>,
    default_ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(default_ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        TtlCache {
            entries: Mutex::new(HashMap::new()),
            default_ttl,
            clock,
        }
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, CacheEntry<V>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, key: &str) -> Option<V> {
        let mut entries = self.entries();
        let now = self.clock.now();

        let entry = match entries.get(key) {
            Some(entry) => entry,
            None => {
                debug!(key, "cache miss");
                return None;
            }
        };

        if !entry.is_expired(now) {
            debug!(key, "cache hit");
            return Some(entry.value.clone());
        }

        debug!(key, "cache entry expired");
        entries.remove(key);
        None
    }

    #[allow(dead_code)]
    pub fn set(&self, key: impl Into<String>, value: V) {
        self.set_with_ttl(key, value, self.default_ttl);
    }

    pub fn set_with_ttl(&self, key: impl Into<String>, value: V, ttl: Duration) {
        let key = key.into();
        debug!(key = %key, ttl_secs = ttl.as_secs(), "cache set");
        let entry = CacheEntry {
            value,
            created_at: self.clock.now(),
            ttl,
        };
        self.entries().insert(key, entry);
    }

    #[allow(dead_code)]
    pub fn delete(&self, key: &str) -> bool {
        let removed = self.entries().remove(key).is_some();
        if removed {
            debug!(key, "cache entry deleted");
        }
        removed
    }

    #[allow(dead_code)]
    pub fn clear(&self) {
        self.entries().clear();
        info!("cache cleared");
    }

    /// Removes every expired entry and returns how many were dropped.
    pub fn sweep(&self) -> usize {
        let mut entries = self.entries();
        let now = self.clock.now();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        let removed = before - entries.len();
        if removed > 0 {
            info!(removed, "swept expired cache entries");
        }
        removed
    }

    pub fn stats(&self) -> CacheStats {
        let entries = self.entries();
        let now = self.clock.now();
        let ages: Vec<Duration> = entries
            .values()
            .map(|entry| now.saturating_duration_since(entry.created_at))
            .collect();

        CacheStats {
            size: ages.len(),
            oldest_age: ages.iter().max().copied().unwrap_or_default(),
            newest_age: ages.iter().min().copied().unwrap_or_default(),
        }
    }
}
