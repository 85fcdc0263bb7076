//! Currency conversion backed by pluggable forex rate providers.
//!
//! A [`ForexProvider`] wraps a remote rate source (implementing
//! [`RateSource`]) together with a [`CacheEngine`] and handles the
//! fetch → cache → base-currency recomputation pipeline. The
//! [`CurrencyConverter`] sits on top and turns resolved rates into rounded
//! amounts.

pub mod cache;
pub mod converter;
pub mod error;
pub mod provider;
pub mod providers;
pub mod rates;

// Re-export the main types for cleaner imports
pub use cache::{CacheEngine, MemoryCacheEngine, RedisCacheConfig, RedisCacheEngine};
pub use converter::CurrencyConverter;
pub use error::{ForexError, Result};
pub use provider::{ForexProvider, RateSource, SourceConfig};
pub use rates::RatesCollection;
