use crate::response::ResultRecord;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::sync::Arc;

#[cfg(feature = "graphql")]
use async_graphql::SimpleObject;

/// Configuration for the cache system
#[derive(Clone, Debug)]
pub struct CacheConfig {
    /// How long a stored result set counts as fresh
    pub ttl: Duration,
    /// Maximum number of cached entries; 0 disables the cache
    pub max_entries: usize,
    /// Whether caching is enabled
    pub enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::minutes(5),
            max_entries: 1000,
            enabled: true,
        }
    }
}

impl CacheConfig {
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            ttl,
            max_entries,
            enabled: true,
        }
    }
}

/// Cached result set with the time it was stored
#[derive(Clone, Debug, PartialEq)]
pub struct CachedResult {
    pub results: Vec<ResultRecord>,
    pub stored_at: DateTime<Utc>,
    pub ttl: Duration,
}

impl CachedResult {
    pub fn new(results: Vec<ResultRecord>, stored_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            results,
            stored_at,
            ttl,
        }
    }

    /// Fresh for exactly one TTL window after `stored_at`
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now - self.stored_at < self.ttl
    }
}

/// Cache key for one organisation's query text
#[derive(Hash, Eq, PartialEq, Clone, Debug)]
pub struct CacheKey(String);

impl CacheKey {
    /// Only the org and the raw query text take part in the key; filters and
    /// result limits do not.
    pub fn new(org_id: &str, query: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(org_id.as_bytes());
        hasher.update([0u8]);
        hasher.update(query.as_bytes());

        CacheKey(hex::encode(hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// In-memory cache implementation using DashMap for thread safety
pub struct SearchCache {
    cache: DashMap<CacheKey, CachedResult>,
    pub config: CacheConfig,
}

impl SearchCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            cache: DashMap::new(),
            config,
        }
    }

    /// Get a cached result if one exists and is still fresh.
    ///
    /// Expired entries are left in place: they still serve as a fallback
    /// through [`SearchCache::get_stale`] until overwritten or evicted.
    pub fn get(&self, key: &CacheKey, now: DateTime<Utc>) -> Option<CachedResult> {
        if !self.is_active() {
            return None;
        }

        if let Some(cached) = self.cache.get(key) {
            if cached.is_fresh(now) {
                log::debug!("Cache hit for key: {}", key.as_str());
                return Some(cached.clone());
            }
            log::debug!("Cache expired for key: {}", key.as_str());
            return None;
        }

        log::debug!("Cache miss for key: {}", key.as_str());
        None
    }

    /// Get whatever is stored for `key`, fresh or not
    pub fn get_stale(&self, key: &CacheKey) -> Option<CachedResult> {
        if !self.is_active() {
            return None;
        }

        self.cache.get(key).map(|cached| cached.clone())
    }

    /// Store results, replacing any previous entry for the key
    pub fn put(&self, key: CacheKey, results: Vec<ResultRecord>, now: DateTime<Utc>) {
        if !self.is_active() {
            return;
        }

        // Make room for a new key, and only as much as it needs
        if !self.cache.contains_key(&key) && self.cache.len() >= self.config.max_entries {
            self.evict_oldest(self.cache.len() + 1 - self.config.max_entries);
        }

        log::debug!(
            "Stored {} results in cache with key: {}",
            results.len(),
            key.as_str()
        );
        let cached_result = CachedResult::new(results, now, self.config.ttl);
        self.cache.insert(key, cached_result);
    }

    /// Remove expired entries from cache
    pub fn evict_expired(&self, now: DateTime<Utc>) {
        let before = self.cache.len();
        self.cache.retain(|_, cached| cached.is_fresh(now));
        log::debug!(
            "Evicted {} expired cache entries",
            before.saturating_sub(self.cache.len())
        );
    }

    fn is_active(&self) -> bool {
        self.config.enabled && self.config.max_entries > 0
    }

    /// Remove the `count` oldest entries; expired ones are always the oldest
    fn evict_oldest(&self, count: usize) {
        let mut entries: Vec<_> = self
            .cache
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().stored_at))
            .collect();

        // Sort by store time (oldest first)
        entries.sort_by_key(|(_, stored_at)| *stored_at);

        for (key, _) in entries.into_iter().take(count) {
            self.cache.remove(&key);
        }

        log::debug!("Evicted {} oldest cache entries", count);
    }

    /// Clear all cache entries
    pub fn clear(&self) {
        self.cache.clear();
        log::info!("Search cache cleared");
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Get cache statistics
    pub fn stats(&self, now: DateTime<Utc>) -> CacheStats {
        let total_entries = self.cache.len();
        let expired_entries = self
            .cache
            .iter()
            .filter(|entry| !entry.value().is_fresh(now))
            .count();

        CacheStats {
            total_entries,
            valid_entries: total_entries.saturating_sub(expired_entries),
            expired_entries,
            max_entries: self.config.max_entries,
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "graphql", derive(SimpleObject))]
pub struct CacheStats {
    pub total_entries: usize,
    pub valid_entries: usize,
    pub expired_entries: usize,
    pub max_entries: usize,
}

/// Thread-safe wrapper for the cache
pub type SharedSearchCache = Arc<SearchCache>;
