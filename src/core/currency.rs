//! Currency catalog and rate provider abstractions

use super::error::FxError;
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Supported currency codes mapped to display names, ordered by code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrencyCatalog {
    currencies: BTreeMap<String, String>,
}

impl CurrencyCatalog {
    pub fn new(currencies: BTreeMap<String, String>) -> Self {
        Self { currencies }
    }

    pub fn contains(&self, code: &str) -> bool {
        self.currencies.contains_key(code)
    }

    pub fn name(&self, code: &str) -> Option<&str> {
        self.currencies.get(code).map(String::as_str)
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.currencies.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.currencies
            .iter()
            .map(|(code, name)| (code.as_str(), name.as_str()))
    }

    pub fn len(&self) -> usize {
        self.currencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.currencies.is_empty()
    }

    /// `"USD - United States Dollar"`, or the bare code when it has no name.
    pub fn label(&self, code: &str) -> String {
        match self.name(code) {
            Some(name) => format!("{code} - {name}"),
            None => code.to_string(),
        }
    }

    /// Picks the preferred codes when listed, otherwise the first code of the catalog.
    pub fn default_pair(
        &self,
        preferred_from: &str,
        preferred_to: &str,
    ) -> Option<(String, String)> {
        let first = self.codes().next()?;
        let pick = |preferred: &str| {
            if self.contains(preferred) {
                preferred.to_string()
            } else {
                first.to_string()
            }
        };
        Some((pick(preferred_from), pick(preferred_to)))
    }
}

/// Amount returned by the rate service for one conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct RateQuote {
    pub amount: Decimal,
    pub date: Option<NaiveDate>,
}

#[async_trait]
pub trait CurrencyRateProvider: Send + Sync {
    async fn fetch_currencies(&self) -> Result<CurrencyCatalog, FxError>;

    /// Converts `amount` of `from` into `to` with a single request.
    async fn fetch_conversion(
        &self,
        amount: Decimal,
        from: &str,
        to: &str,
    ) -> Result<RateQuote, FxError>;
}
