//! Fixer.io rate source (JSON, denominated in EUR).

use crate::error::{ForexError, Result};
use crate::provider::{RateSource, SourceConfig};
use crate::rates::RatesCollection;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;

/// Production API base. Tests point `base_url` at a mock server instead.
pub const FIXER_API_BASE: &str = "https://data.fixer.io/api";

const SUPPORTED_CURRENCIES: [&str; 33] = [
    "AUD", "BGN", "BRL", "CAD", "CHF", "CNY", "CZK", "DKK", "EUR", "GBP", "HKD", "HRK", "HUF",
    "IDR", "ILS", "INR", "ISK", "JPY", "KRW", "MXN", "MYR", "NOK", "NZD", "PHP", "PLN", "RON",
    "RUB", "SEK", "SGD", "THB", "TRY", "USD", "ZAR",
];

#[derive(Debug, Deserialize)]
struct FixerResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    rates: HashMap<String, f64>,
}

pub struct FixerSource {
    base_url: String,
    api_key: String,
    config: SourceConfig,
}

impl FixerSource {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            config: SourceConfig::new("fixer", "EUR", SUPPORTED_CURRENCIES),
        }
    }

    async fn call_api(&self, endpoint: &str) -> Result<RatesCollection> {
        let url = format!(
            "{}/{}?base={}&access_key={}",
            self.base_url, endpoint, self.config.main_currency, self.api_key
        );
        debug!("Requesting rates from {}/{}", self.base_url, endpoint);

        let client = reqwest::Client::builder()
            .user_agent("fx-convert/0.2")
            .build()?;
        let response = client.get(&url).send().await?.error_for_status()?;
        let body = response.text().await?;

        let payload: FixerResponse = serde_json::from_str(&body)
            .map_err(|e| ForexError::InvalidRates(format!("Fixer payload did not parse: {e}")))?;

        if !payload.success || payload.rates.is_empty() {
            return Err(ForexError::InvalidRates(
                "Fixer reported an unsuccessful rates response".to_string(),
            ));
        }

        Ok(payload.rates.into())
    }
}

#[async_trait]
impl RateSource for FixerSource {
    fn config(&self) -> &SourceConfig {
        &self.config
    }

    async fn fetch_latest(&self) -> Result<RatesCollection> {
        self.call_api("latest").await
    }

    async fn fetch_historical(&self, date: NaiveDate) -> Result<RatesCollection> {
        self.call_api(&date.format("%Y-%m-%d").to_string()).await
    }
}
