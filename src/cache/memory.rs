use super::CacheEngine;
use crate::rates::RatesCollection;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;

struct CacheValue {
    rates: RatesCollection,
    expires_at: Instant,
}

/// In-process cache engine backed by a HashMap.
///
/// Expiry is checked lazily on read; expired entries are not evicted
/// eagerly. Concurrent writes to the same key race and the last one wins.
pub struct MemoryCacheEngine {
    inner: Arc<Mutex<HashMap<String, CacheValue>>>,
}

impl MemoryCacheEngine {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl Default for MemoryCacheEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheEngine for MemoryCacheEngine {
    async fn set(&self, key: &str, rates: &RatesCollection, ttl: Duration) {
        let value = CacheValue {
            rates: rates.clone(),
            expires_at: Instant::now() + ttl,
        };

        let mut cache = self.inner.lock().await;
        debug!("Cache PUT for key: {}", key);
        cache.insert(key.to_string(), value);
    }

    async fn get(&self, key: &str) -> Option<RatesCollection> {
        let cache = self.inner.lock().await;
        if let Some(entry) = cache.get(key) {
            if entry.expires_at < Instant::now() {
                debug!("Cache entry expired for key: {}", key);
                return None;
            }
            debug!("Cache HIT for key: {}", key);
            return Some(entry.rates.clone());
        }
        debug!("Cache MISS for key: {}", key);
        None
    }
}
