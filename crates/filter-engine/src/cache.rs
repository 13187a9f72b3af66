//! TTL cache of whole compiled predicates keyed by filter text.
//!
//! Entries are evicted after being idle longer than the TTL. Sweeps run
//! lazily on cache traffic once the sweep interval has elapsed; only one
//! sweep runs at a time.

use crate::{naming::NamingConvention, predicate::PredicateNode, settings::PredicateCacheSettings};
use dashmap::DashMap;
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicU64, Ordering},
    },
    time::{Duration, Instant},
};
use tracing::{debug, trace};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PredicateKey {
    pub entity: String,
    pub filter: String,
    pub convention: NamingConvention,
}

impl PredicateKey {
    pub fn new(entity: &str, filter: &str, convention: NamingConvention) -> Self {
        Self {
            entity: entity.to_string(),
            filter: filter.to_string(),
            convention,
        }
    }
}

#[derive(Debug)]
struct CacheEntry {
    predicate: Arc<PredicateNode>,
    // Milliseconds since the cache epoch.
    last_access: AtomicU64,
}

impl CacheEntry {
    fn new(predicate: Arc<PredicateNode>, now: u64) -> Self {
        Self {
            predicate,
            last_access: AtomicU64::new(now),
        }
    }

    fn touch(&self, now: u64) {
        self.last_access.store(now, Ordering::Relaxed);
    }

    fn is_expired(&self, now: u64, ttl: u64) -> bool {
        now.saturating_sub(self.last_access.load(Ordering::Relaxed)) > ttl
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub entries: usize,
}

#[derive(Debug)]
pub struct PredicateCache {
    entries: DashMap<PredicateKey, CacheEntry>,
    ttl_ms: u64,
    sweep_interval_ms: u64,
    epoch: Instant,
    last_sweep: AtomicU64,
    sweep_running: AtomicBool,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl PredicateCache {
    pub fn new(ttl: Duration, sweep_interval: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl_ms: duration_ms(ttl),
            sweep_interval_ms: duration_ms(sweep_interval),
            epoch: Instant::now(),
            last_sweep: AtomicU64::new(0),
            sweep_running: AtomicBool::new(false),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    pub fn from_settings(settings: &PredicateCacheSettings) -> Self {
        Self::new(
            Duration::from_secs(settings.ttl_secs),
            Duration::from_secs(settings.sweep_interval_secs),
        )
    }

    fn now(&self) -> u64 {
        duration_ms(self.epoch.elapsed())
    }

    /// Cached predicate for `key`, refreshing its last access time. An
    /// entry idle past the TTL counts as a miss and is dropped.
    pub fn get(&self, key: &PredicateKey) -> Option<Arc<PredicateNode>> {
        self.maybe_sweep();
        let now = self.now();

        let found = self.entries.get(key).and_then(|entry| {
            if entry.is_expired(now, self.ttl_ms) {
                None
            } else {
                entry.touch(now);
                Some(Arc::clone(&entry.predicate))
            }
        });

        match found {
            Some(predicate) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                trace!("Predicate cache hit for {}: {}", key.entity, key.filter);
                Some(predicate)
            }
            None => {
                if self
                    .entries
                    .remove_if(key, |_, entry| entry.is_expired(now, self.ttl_ms))
                    .is_some()
                {
                    self.evictions.fetch_add(1, Ordering::Relaxed);
                }
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Stores `predicate` unless another caller got there first; returns
    /// whichever value the cache holds afterwards.
    pub fn insert(&self, key: PredicateKey, predicate: PredicateNode) -> Arc<PredicateNode> {
        let now = self.now();
        let entry = self
            .entries
            .entry(key)
            .or_insert_with(|| CacheEntry::new(Arc::new(predicate), now));
        entry.touch(now);
        Arc::clone(&entry.predicate)
    }

    /// Looks `key` up and, on a miss, runs `compute` without holding any
    /// map lock. Errors are returned as-is and never cached.
    pub fn get_or_insert_with<E, F>(
        &self,
        key: PredicateKey,
        compute: F,
    ) -> Result<Arc<PredicateNode>, E>
    where
        F: FnOnce() -> Result<PredicateNode, E>,
    {
        if let Some(hit) = self.get(&key) {
            return Ok(hit);
        }
        let predicate = compute()?;
        Ok(self.insert(key, predicate))
    }

    /// Drops every entry idle longer than the TTL. Returns the number of
    /// evicted entries, or 0 if another sweep is already running.
    pub fn sweep_expired(&self) -> usize {
        if self
            .sweep_running
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            return 0;
        }

        let now = self.now();
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| !entry.is_expired(now, self.ttl_ms));
        let evicted = before.saturating_sub(self.entries.len());

        self.evictions.fetch_add(evicted as u64, Ordering::Relaxed);
        self.last_sweep.store(now, Ordering::Relaxed);
        self.sweep_running.store(false, Ordering::Release);

        if evicted > 0 {
            debug!(
                "Evicted {} idle predicate(s), {} cached",
                evicted,
                self.entries.len()
            );
        }
        evicted
    }

    fn maybe_sweep(&self) {
        let now = self.now();
        let last = self.last_sweep.load(Ordering::Relaxed);
        if now.saturating_sub(last) >= self.sweep_interval_ms {
            self.sweep_expired();
        }
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            entries: self.entries.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
