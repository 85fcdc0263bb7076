//! National Bank of Romania rate source (XML, denominated in RON).
//!
//! The feed publishes RON-per-unit values with optional per-currency
//! multipliers; both are inverted into units-per-RON here. Historical rates
//! come from yearly files, one cube per publication day.

use crate::error::{ForexError, Result};
use crate::provider::{RateSource, SourceConfig};
use crate::providers::util::with_retry;
use crate::rates::RatesCollection;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;

/// Production feed base. Tests point `base_url` at a mock server instead.
pub const BNR_API_BASE: &str = "https://bnr.ro";

// The feed rejects default library user agents
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/100.0.4896.127 Safari/537.36";

const LATEST_PATH: &str = "/nbrfxrates.xml";
const LATEST_RETRIES: usize = 5;
const RETRY_DELAY_MS: u64 = 500;

const SUPPORTED_CURRENCIES: [&str; 33] = [
    "AED", "AUD", "BGN", "BRL", "CAD", "CHF", "CNY", "CZK", "DKK", "EGP", "EUR", "GBP", "HRK",
    "HUF", "INR", "JPY", "KRW", "MDL", "MXN", "NOK", "NZD", "PLN", "RON", "RSD", "RUB", "SEK",
    "THB", "TRY", "UAH", "USD", "XAU", "XDR", "ZAR",
];

// The following structs mirror the feed's DataSet/Body/Cube/Rate layout.

#[derive(Debug, Deserialize)]
struct XmlDataSet {
    #[serde(rename = "Body")]
    body: XmlBody,
}

#[derive(Debug, Deserialize)]
struct XmlBody {
    #[serde(rename = "Cube", default)]
    cubes: Vec<XmlCube>,
}

#[derive(Debug, Deserialize)]
struct XmlCube {
    date: String,
    #[serde(rename = "Rate", default)]
    rates: Vec<XmlRate>,
}

#[derive(Debug, Deserialize)]
struct XmlRate {
    currency: String,
    multiplier: Option<f64>,
    #[serde(rename = "$value")]
    value: f64,
}

pub struct BnrSource {
    base_url: String,
    config: SourceConfig,
}

impl BnrSource {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            config: SourceConfig::new("bnr", "RON", SUPPORTED_CURRENCIES),
        }
    }

    async fn fetch_document(&self, path: &str) -> Result<String> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Requesting rates from {}", url);

        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        let response = client.get(&url).send().await?.error_for_status()?;

        Ok(response.text().await?)
    }

    fn parse_rates(document: &str, date: Option<NaiveDate>) -> Result<RatesCollection> {
        let data: XmlDataSet = serde_xml_rs::from_str(document)
            .map_err(|e| ForexError::InvalidRates(format!("Invalid rates XML: {e}")))?;

        let cube = match date {
            Some(date) => Self::cube_for_date(&data.body.cubes, date)?,
            None => data.body.cubes.first().ok_or_else(|| {
                ForexError::InvalidRates("Rates XML contains no cube".to_string())
            })?,
        };

        let mut rates = RatesCollection::new();
        for rate in &cube.rates {
            let per_unit_ron = rate.value / rate.multiplier.unwrap_or(1.0);
            if per_unit_ron <= 0.0 {
                return Err(ForexError::InvalidRates(format!(
                    "Non-positive rate for {}",
                    rate.currency
                )));
            }
            rates.insert(rate.currency.clone(), 1.0 / per_unit_ron);
        }

        Ok(rates)
    }

    /// Cube for `date`, or the closest earlier publication day. Dates before
    /// the first cube fall back to the first one.
    fn cube_for_date(cubes: &[XmlCube], date: NaiveDate) -> Result<&XmlCube> {
        let mut selected = None;
        for cube in cubes {
            let cube_date = NaiveDate::parse_from_str(&cube.date, "%Y-%m-%d").map_err(|e| {
                ForexError::InvalidRates(format!("Unparseable cube date {}: {e}", cube.date))
            })?;
            if cube_date > date {
                return Ok(selected.unwrap_or(cube));
            }
            selected = Some(cube);
        }

        selected.ok_or_else(|| ForexError::InvalidRates("Rates XML contains no cube".to_string()))
    }
}

#[async_trait]
impl RateSource for BnrSource {
    fn config(&self) -> &SourceConfig {
        &self.config
    }

    async fn fetch_latest(&self) -> Result<RatesCollection> {
        let document = with_retry(
            || self.fetch_document(LATEST_PATH),
            LATEST_RETRIES,
            RETRY_DELAY_MS,
        )
        .await?;

        Self::parse_rates(&document, None)
    }

    async fn fetch_historical(&self, date: NaiveDate) -> Result<RatesCollection> {
        let path = format!("/files/xml/years/nbrfxrates{}.xml", date.format("%Y"));
        let document = self.fetch_document(&path).await?;

        Self::parse_rates(&document, Some(date))
    }
}
