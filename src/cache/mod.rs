//! Cache engine contract and key derivation.

pub mod memory;
pub mod redis;

use crate::rates::RatesCollection;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::time::Duration;

pub use self::memory::MemoryCacheEngine;
pub use self::redis::{RedisCacheConfig, RedisCacheEngine};

/// Namespace prefix shared by all engines, so implementations backed by the
/// same store never collide with other users of that store.
const KEY_PREFIX: &str = "fx-convert";

/// Default expiry for latest rates.
pub const DEFAULT_TTL: Duration = Duration::from_secs(86_400);

/// Expiry for historical rates. Rates for a past date never change.
pub const HISTORICAL_TTL: Duration = Duration::from_secs(86_400 * 180);

/// Key-value storage for resolved rates collections.
///
/// Engines do not surface their own I/O failures through this contract: a
/// value that cannot be read or decoded is reported as absent and the
/// pipeline falls back to a fresh fetch.
#[async_trait]
pub trait CacheEngine: Send + Sync {
    /// Stores `rates` under `key`, expiring `ttl` from now.
    async fn set(&self, key: &str, rates: &RatesCollection, ttl: Duration);

    /// Returns the cached collection, or `None` when the key was never set
    /// or its TTL elapsed.
    async fn get(&self, key: &str) -> Option<RatesCollection>;
}

/// Derives the cache key for a source's main-currency rates.
///
/// Format: `<namespace>_<source_id>_<MAIN>_<YYYY-MM-DD|latest>`. Identical
/// inputs always produce the identical key; distinct dates never collide
/// with each other or with the latest entry.
pub fn rates_cache_key(source_id: &str, main_currency: &str, date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => format!(
            "{KEY_PREFIX}_{source_id}_{main_currency}_{}",
            date.format("%Y-%m-%d")
        ),
        None => format!("{KEY_PREFIX}_{source_id}_{main_currency}_latest"),
    }
}
