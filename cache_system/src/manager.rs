//! Cache manager implementation
//!
//! This module provides the main CacheManager struct holding
//! the in-memory response entries and their expiry bookkeeping.

use crate::errors::CacheError;
use chrono::{DateTime, Utc};
use config::CacheConfig;
use mockable::{Clock, DefaultClock};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use type_mapping::ParamMap;

#[derive(Debug, Clone)]
struct CacheEntry {
    payload: Value,
    stored_at: DateTime<Utc>,
}

/// Time source shared by every clone of a cache
pub type SharedClock = Arc<dyn Clock + Send + Sync>;

/// Hit/miss counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Client-wide response cache with a fixed expiry window.
///
/// Cloning is cheap; clones share the same entries.
#[derive(Clone)]
pub struct CacheManager {
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
    config: Arc<CacheConfig>,
    clock: SharedClock,
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
}

impl Debug for CacheManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let entry_count = match self.entries.try_read() {
            Ok(entries) => entries.len().to_string(),
            Err(_) => "locked".to_string(),
        };

        f.debug_struct("CacheManager")
            .field("config", &self.config)
            .field("entries", &entry_count)
            .finish()
    }
}

impl CacheManager {
    /// Create a new cache manager on the system clock
    pub fn new(config: CacheConfig) -> Result<Self, CacheError> {
        Self::with_clock(config, Arc::new(DefaultClock))
    }

    /// Create a new cache manager reading time from `clock`
    pub fn with_clock(config: CacheConfig, clock: SharedClock) -> Result<Self, CacheError> {
        if config.enabled && config.ttl_seconds == 0 {
            return Err(CacheError::InvalidTtl(config.ttl_seconds));
        }

        Ok(Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            config: Arc::new(config),
            clock,
            hits: Arc::new(AtomicU64::new(0)),
            misses: Arc::new(AtomicU64::new(0)),
        })
    }

    /// Generate cache key for a request: URL plus serialized parameters
    pub fn build_key(url: &str, params: &ParamMap) -> String {
        format!("{}?{}", url, params.to_json())
    }

    fn ttl(&self) -> Duration {
        self.config.ttl_duration()
    }

    fn is_fresh(&self, entry: &CacheEntry, now: DateTime<Utc>) -> bool {
        // A clock that went backwards yields a negative age, still fresh
        match now.signed_duration_since(entry.stored_at).to_std() {
            Ok(age) => age < self.ttl(),
            Err(_) => true,
        }
    }

    /// Get a cached payload if it is younger than the expiry window.
    /// Expired entries are removed on read.
    pub async fn get(&self, key: &str) -> Option<Value> {
        if !self.config.enabled {
            return None;
        }

        let now = self.clock.utc();
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if self.is_fresh(entry, now) => {
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    tracing::debug!(key, "response cache hit");
                    return Some(entry.payload.clone());
                }
                Some(_) => {}
                None => {
                    self.misses.fetch_add(1, Ordering::Relaxed);
                    return None;
                }
            }
        }

        // Entry exists but has expired
        let mut entries = self.entries.write().await;
        if entries
            .get(key)
            .is_some_and(|entry| !self.is_fresh(entry, now))
        {
            entries.remove(key);
            tracing::debug!(key, "response cache entry expired");
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    /// Get a cached payload decoded into `T`
    pub async fn get_as<T>(&self, key: &str) -> Result<Option<T>, CacheError>
    where
        T: DeserializeOwned,
    {
        match self.get(key).await {
            Some(payload) => Ok(Some(serde_json::from_value(payload)?)),
            None => Ok(None),
        }
    }

    /// Store a payload, overwriting any prior entry for the key
    pub async fn set(&self, key: &str, payload: Value) {
        if !self.config.enabled {
            return;
        }

        let entry = CacheEntry {
            payload,
            stored_at: self.clock.utc(),
        };
        self.entries.write().await.insert(key.to_string(), entry);
    }

    /// Delete a specific entry
    pub async fn invalidate(&self, key: &str) -> bool {
        self.entries.write().await.remove(key).is_some()
    }

    /// Drop every expired entry, returning how many were removed
    pub async fn purge_expired(&self) -> usize {
        let now = self.clock.utc();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| self.is_fresh(entry, now));
        before - entries.len()
    }

    /// Drop every entry
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    /// Number of stored entries, fresh or not
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.len().await,
        }
    }

    /// Get current configuration
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }
}
