//! Time-bounded memoization of externally supplied market indicators
//!
//! Rate lookups (Selic, IPCA) are external collaborators: whatever fetches
//! them owns this cache and hands the engines plain numbers. Entries are
//! keyed by indicator name and expire after a fixed TTL; an expired or
//! missing entry falls back to whatever value the caller supplies. The
//! engines themselves stay cache-free and side-effect-free.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use log::debug;

/// One cached indicator value
#[derive(Debug, Clone)]
struct CachedRate {
    value: f64,
    fetched_at: DateTime<Utc>,
}

/// TTL-bounded cache of indicator values, keyed by indicator name
#[derive(Debug, Clone)]
pub struct RateCache {
    entries: HashMap<String, CachedRate>,
    ttl: Duration,

    /// Statistics
    pub cache_hits: u64,
    pub cache_misses: u64,
}

impl RateCache {
    /// Cache with a one-hour TTL, matching the refresh cadence of the
    /// central-bank series this fronts.
    pub fn new() -> Self {
        Self::with_ttl(Duration::hours(1))
    }

    /// Cache with a custom TTL.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
            cache_hits: 0,
            cache_misses: 0,
        }
    }

    /// Store a freshly fetched value.
    pub fn insert(&mut self, indicator: &str, value: f64) {
        self.insert_at(indicator, value, Utc::now());
    }

    /// Store a value with an explicit fetch time.
    pub fn insert_at(&mut self, indicator: &str, value: f64, fetched_at: DateTime<Utc>) {
        self.entries
            .insert(indicator.to_string(), CachedRate { value, fetched_at });
    }

    /// Fresh value for an indicator, if one is cached and unexpired.
    pub fn get(&mut self, indicator: &str) -> Option<f64> {
        self.get_at(indicator, Utc::now())
    }

    /// Freshness check against an explicit clock.
    pub fn get_at(&mut self, indicator: &str, now: DateTime<Utc>) -> Option<f64> {
        match self.entries.get(indicator) {
            Some(entry) if now - entry.fetched_at <= self.ttl => {
                self.cache_hits += 1;
                Some(entry.value)
            }
            Some(_) => {
                debug!("rate cache: {indicator} expired");
                self.cache_misses += 1;
                None
            }
            None => {
                self.cache_misses += 1;
                None
            }
        }
    }

    /// Resolve an indicator: cached value if fresh, otherwise `fetch` (a
    /// collaborator-supplied lookup that may fail), otherwise `fallback`.
    /// Always produces a number, so the engines never see a lookup failure.
    pub fn resolve<F>(&mut self, indicator: &str, fetch: F, fallback: f64) -> f64
    where
        F: FnOnce() -> Option<f64>,
    {
        if let Some(value) = self.get(indicator) {
            return value;
        }
        match fetch() {
            Some(value) => {
                self.insert(indicator, value);
                value
            }
            None => {
                debug!("rate cache: {indicator} unavailable, using fallback {fallback}");
                fallback
            }
        }
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cache_hits = 0;
        self.cache_misses = 0;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for RateCache {
    fn default() -> Self {
        Self::new()
    }
}
