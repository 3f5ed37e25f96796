//! In-memory TTL cache with explicit construction and lifecycle.
//!
//! Deliberately not a process-wide singleton: callers construct an
//! instance and pass it through their own context.

use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::clock::{Clock, SystemClock};

struct Entry<T> {
    value: T,
    expires_at: Instant,
    inserted: u64,
}

/// Bounded TTL cache. At capacity the oldest entry (by first insertion)
/// is evicted; expired entries are swept lazily.
pub struct MemoryCache<T, C: Clock = SystemClock> {
    entries: HashMap<String, Entry<T>>,
    max_size: usize,
    default_ttl: Duration,
    clock: C,
    sequence: u64,
}

impl<T: Clone> MemoryCache<T, SystemClock> {
    pub fn new(max_size: usize, default_ttl: Duration) -> Self {
        Self::with_clock(max_size, default_ttl, SystemClock)
    }
}

impl<T: Clone, C: Clock> MemoryCache<T, C> {
    pub fn with_clock(max_size: usize, default_ttl: Duration, clock: C) -> Self {
        Self {
            entries: HashMap::new(),
            max_size,
            default_ttl,
            clock,
            sequence: 0,
        }
    }

    pub fn set(&mut self, key: &str, value: T) {
        self.set_with_ttl(key, value, self.default_ttl);
    }

    pub fn set_with_ttl(&mut self, key: &str, value: T, ttl: Duration) {
        self.sweep_expired();

        if self.entries.len() >= self.max_size && !self.entries.contains_key(key) {
            if let Some(oldest) = self
                .entries
                .iter()
                .min_by_key(|(_, e)| e.inserted)
                .map(|(k, _)| k.clone())
            {
                debug!(key = %oldest, "evicting oldest cache entry");
                self.entries.remove(&oldest);
            }
        }

        // Overwrites keep the key's original age, like a map that
        // preserves insertion order.
        let inserted = match self.entries.get(key) {
            Some(existing) => existing.inserted,
            None => {
                self.sequence += 1;
                self.sequence
            }
        };
        let expires_at = self.clock.now() + ttl;
        self.entries
            .insert(key.to_string(), Entry { value, expires_at, inserted });
    }

    pub fn get(&mut self, key: &str) -> Option<T> {
        let now = self.clock.now();
        match self.entries.get(key) {
            Some(entry) if now <= entry.expires_at => Some(entry.value.clone()),
            Some(_) => {
                self.entries.remove(key);
                None
            }
            None => None,
        }
    }

    pub fn contains(&mut self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn remove(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Live entry count; sweeps expired entries first.
    pub fn len(&mut self) -> usize {
        self.sweep_expired();
        self.entries.len()
    }

    pub fn is_empty(&mut self) -> bool {
        self.len() == 0
    }

    /// Release everything. The instance stays usable but empty.
    pub fn close(&mut self) {
        self.clear();
    }

    fn sweep_expired(&mut self) {
        let now = self.clock.now();
        self.entries.retain(|_, e| now <= e.expires_at);
    }
}

/// Build a namespaced cache key.
pub fn cache_key(prefix: &str, parts: &[&str]) -> String {
    format!("{}:{}", prefix, parts.join(":"))
}
