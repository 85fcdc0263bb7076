//! Thin orchestration over a provider: resolve the rate, multiply, round.

use crate::error::Result;
use crate::provider::{ForexProvider, RateSource};
use crate::rates::RatesCollection;
use chrono::NaiveDate;

/// Decimal digits used by [`CurrencyConverter::convert`].
pub const DEFAULT_PRECISION: u32 = 2;

pub struct CurrencyConverter<S> {
    provider: ForexProvider<S>,
}

impl<S: RateSource> CurrencyConverter<S> {
    pub fn new(provider: ForexProvider<S>) -> Self {
        Self { provider }
    }

    /// Converts `value` from one currency to another at the latest rate,
    /// rounded to two decimal places.
    pub async fn convert(&self, from: &str, to: &str, value: f64) -> Result<f64> {
        self.convert_with(from, to, value, DEFAULT_PRECISION, None)
            .await
    }

    /// Converts with explicit rounding precision and an optional historical
    /// date.
    pub async fn convert_with(
        &self,
        from: &str,
        to: &str,
        value: f64,
        precision: u32,
        date: Option<NaiveDate>,
    ) -> Result<f64> {
        if value == 0.0 {
            // No need to resolve rates for zero values
            return Ok(0.0);
        }

        let from = self.provider.transform_currency(from)?;
        let to = self.provider.transform_currency(to)?;

        let rates = match date {
            Some(date) => self.provider.fetch_historical_rates(&from, date).await?,
            None => self.provider.fetch_latest_rates(&from).await?,
        };

        Ok(round_to(value * rates.get(&to)?, precision))
    }

    /// Rates relative to `currency`, latest or for a specific date.
    pub async fn rates(
        &self,
        currency: &str,
        date: Option<NaiveDate>,
    ) -> Result<RatesCollection> {
        let currency = self.provider.transform_currency(currency)?;

        match date {
            Some(date) => self.provider.fetch_historical_rates(&currency, date).await,
            None => self.provider.fetch_latest_rates(&currency).await,
        }
    }
}

/// Half-away-from-zero rounding to `precision` decimal digits.
fn round_to(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision as i32);
    (value * factor).round() / factor
}
