//! Exchange rate collections.

use crate::error::{ForexError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Rates keyed by uppercase currency code, all relative to a single base.
///
/// Lookup is strict: a missing currency is an error, never a silent zero.
/// Currency codes are not validated at this layer; sources vet them before a
/// collection is ever resolved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RatesCollection {
    rates: HashMap<String, f64>,
}

impl RatesCollection {
    pub fn new() -> Self {
        Self {
            rates: HashMap::new(),
        }
    }

    /// Rate for `currency`, failing loudly when absent.
    pub fn get(&self, currency: &str) -> Result<f64> {
        self.rates
            .get(currency)
            .copied()
            .ok_or_else(|| ForexError::MissingRate(currency.to_string()))
    }

    pub fn contains(&self, currency: &str) -> bool {
        self.rates.contains_key(currency)
    }

    pub fn insert(&mut self, currency: impl Into<String>, rate: f64) {
        self.rates.insert(currency.into(), rate);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.rates.iter().map(|(currency, rate)| (currency.as_str(), *rate))
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl From<HashMap<String, f64>> for RatesCollection {
    fn from(rates: HashMap<String, f64>) -> Self {
        Self { rates }
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for RatesCollection {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self {
            rates: iter
                .into_iter()
                .map(|(currency, rate)| (currency.into(), rate))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_existing_rate() {
        let rates: RatesCollection = [("USD", 1.0), ("EUR", 0.9)].into_iter().collect();

        assert_eq!(rates.get("USD").unwrap(), 1.0);
        assert_eq!(rates.get("EUR").unwrap(), 0.9);
    }

    #[test]
    fn test_get_missing_rate_fails() {
        let rates: RatesCollection = [("USD", 1.0)].into_iter().collect();

        let err = rates.get("RON").unwrap_err();
        assert!(matches!(err, ForexError::MissingRate(code) if code == "RON"));
    }

    #[test]
    fn test_insert_overwrites() {
        let mut rates = RatesCollection::new();
        rates.insert("USD", 1.0);
        rates.insert("USD", 2.0);

        assert_eq!(rates.len(), 1);
        assert_eq!(rates.get("USD").unwrap(), 2.0);
    }

    #[test]
    fn test_serde_round_trip_is_plain_map() {
        let rates: RatesCollection = [("USD", 1.0), ("RON", 4.5)].into_iter().collect();

        let json = serde_json::to_string(&rates).unwrap();
        let parsed: RatesCollection = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, rates);

        // Stored payloads are plain currency->rate maps
        let raw: HashMap<String, f64> = serde_json::from_str(&json).unwrap();
        assert_eq!(raw.get("RON"), Some(&4.5));
    }
}
