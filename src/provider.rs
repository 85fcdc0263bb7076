//! Rate source abstraction and the fetch → cache → recompute pipeline.

use crate::cache::{self, CacheEngine, DEFAULT_TTL, HISTORICAL_TTL};
use crate::error::{ForexError, Result};
use crate::rates::RatesCollection;
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Fixed identity of a rate source: a stable cache-key id, the currency the
/// upstream feed is denominated in, and the set of codes it can serve.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// Stable identifier used in cache keys. Must not change between
    /// releases, or cached entries are orphaned.
    pub id: String,
    pub main_currency: String,
    pub supported_currencies: HashSet<String>,
}

impl SourceConfig {
    pub fn new<I, S>(id: &str, main_currency: &str, supported_currencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.to_string(),
            main_currency: main_currency.to_string(),
            supported_currencies: supported_currencies
                .into_iter()
                .map(Into::into)
                .collect(),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(ForexError::Configuration(
                "source id not configured".to_string(),
            ));
        }
        if self.main_currency.is_empty() {
            return Err(ForexError::Configuration(format!(
                "main currency not configured for {}",
                self.id
            )));
        }
        if self.supported_currencies.is_empty() {
            return Err(ForexError::Configuration(format!(
                "supported currencies not configured for {}",
                self.id
            )));
        }
        Ok(())
    }
}

/// A remote source of exchange rates denominated in its main currency.
///
/// Implementations perform the network I/O and wire-format parsing, and must
/// fail with [`ForexError::InvalidRates`] on malformed responses. Retry is a
/// per-source policy, not enforced here.
#[async_trait]
pub trait RateSource: Send + Sync {
    fn config(&self) -> &SourceConfig;

    /// Fetches the latest rates from the upstream feed.
    async fn fetch_latest(&self) -> Result<RatesCollection>;

    /// Fetches rates for a specific past date from the upstream feed.
    async fn fetch_historical(&self, date: NaiveDate) -> Result<RatesCollection>;
}

/// Resolves rates through a source, caching the source's main-currency
/// collections and recomputing them relative to the requested base currency.
pub struct ForexProvider<S> {
    source: S,
    cache: Arc<dyn CacheEngine>,
}

impl<S> std::fmt::Debug for ForexProvider<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForexProvider").finish_non_exhaustive()
    }
}

impl<S: RateSource> ForexProvider<S> {
    /// Wraps `source`, validating its configuration eagerly.
    pub fn new(source: S, cache: Arc<dyn CacheEngine>) -> Result<Self> {
        source.config().validate()?;
        Ok(Self { source, cache })
    }

    /// Fails with [`ForexError::UnsupportedCurrency`] unless `currency` is
    /// in the source's supported set. Expects an already-uppercased code.
    pub fn validate_currency(&self, currency: &str) -> Result<()> {
        if self
            .source
            .config()
            .supported_currencies
            .contains(currency)
        {
            Ok(())
        } else {
            Err(ForexError::UnsupportedCurrency(currency.to_string()))
        }
    }

    /// Uppercases and validates a currency code.
    pub fn transform_currency(&self, currency: &str) -> Result<String> {
        let currency = currency.to_uppercase();
        self.validate_currency(&currency)?;
        Ok(currency)
    }

    /// Latest rates relative to `base_currency`.
    pub async fn fetch_latest_rates(&self, base_currency: &str) -> Result<RatesCollection> {
        let base_currency = self.transform_currency(base_currency)?;

        let config = self.source.config();
        let key = cache::rates_cache_key(&config.id, &config.main_currency, None);

        let main_rates = match self.cache.get(&key).await {
            Some(rates) => rates,
            None => {
                let rates = self.source.fetch_latest().await?;
                self.cache.set(&key, &rates, DEFAULT_TTL).await;
                rates
            }
        };

        self.compute_base_currency_rates(&base_currency, main_rates)
    }

    /// Rates for `date` relative to `base_currency`.
    ///
    /// A lookup for today resolves as latest. Dates after today fail with
    /// [`ForexError::FutureDate`].
    pub async fn fetch_historical_rates(
        &self,
        base_currency: &str,
        date: NaiveDate,
    ) -> Result<RatesCollection> {
        let base_currency = self.transform_currency(base_currency)?;
        let today = Utc::now().date_naive();

        if date == today {
            debug!("Historical lookup for today, resolving as latest");
            return self.fetch_latest_rates(&base_currency).await;
        }
        if date > today {
            return Err(ForexError::FutureDate(date));
        }

        let config = self.source.config();
        let key = cache::rates_cache_key(&config.id, &config.main_currency, Some(date));

        let main_rates = match self.cache.get(&key).await {
            Some(rates) => rates,
            None => {
                let rates = self.source.fetch_historical(date).await?;
                self.cache.set(&key, &rates, HISTORICAL_TTL).await;
                rates
            }
        };

        self.compute_base_currency_rates(&base_currency, main_rates)
    }

    /// Recomputes the source's main-currency rates relative to
    /// `base_currency`.
    ///
    /// The main currency's identity rate is injected when the feed omits it.
    /// Fails with [`ForexError::MissingRate`] when `base_currency` has no
    /// rate to divide by.
    fn compute_base_currency_rates(
        &self,
        base_currency: &str,
        mut main_rates: RatesCollection,
    ) -> Result<RatesCollection> {
        let main_currency = &self.source.config().main_currency;

        // 1 main currency = 1 main currency
        if !main_rates.contains(main_currency) {
            main_rates.insert(main_currency.clone(), 1.0);
        }

        if base_currency == main_currency {
            return Ok(main_rates);
        }

        let base_rate = main_rates.get(base_currency)?;
        Ok(main_rates
            .iter()
            .map(|(currency, rate)| (currency.to_string(), rate / base_rate))
            .collect())
    }
}
