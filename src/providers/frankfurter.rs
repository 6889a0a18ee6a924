use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;
use tracing::{debug, error, instrument};

use crate::core::{CurrencyCatalog, CurrencyRateProvider, FxError, RateQuote};

#[derive(Debug, Deserialize)]
struct LatestResponse {
    rates: HashMap<String, Decimal>,
    date: Option<NaiveDate>,
}

/// Client for the Frankfurter exchange-rate API.
pub struct FrankfurterProvider {
    base_url: String,
    timeout: Duration,
}

impl FrankfurterProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        FrankfurterProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, FxError> {
        debug!(?query, "Requesting {}", url);

        let client = reqwest::Client::builder()
            .user_agent("fxc/1.0")
            .timeout(self.timeout)
            .build()
            .map_err(|e| FxError::Network(format!("Failed to build HTTP client: {e}")))?;

        let response = client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| FxError::Network(format!("Request error: {e} for URL: {url}")))?;

        if !response.status().is_success() {
            return Err(FxError::Network(format!(
                "HTTP error: {} for URL: {}",
                response.status(),
                url
            )));
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            error!(error = ?e, response = %text, "Failed to parse response");
            FxError::Format(format!("Failed to parse JSON response from {url}: {e}"))
        })
    }
}

#[async_trait]
impl CurrencyRateProvider for FrankfurterProvider {
    #[instrument(name = "FrankfurterCurrencies", skip(self))]
    async fn fetch_currencies(&self) -> Result<CurrencyCatalog, FxError> {
        let url = format!("{}/currencies", self.base_url);
        let currencies: BTreeMap<String, String> = self.get_json(&url, &[]).await?;

        if currencies.is_empty() {
            return Err(FxError::Format(format!("No currencies listed by {url}")));
        }
        Ok(CurrencyCatalog::new(currencies))
    }

    #[instrument(name = "FrankfurterConvert", skip(self))]
    async fn fetch_conversion(
        &self,
        amount: Decimal,
        from: &str,
        to: &str,
    ) -> Result<RateQuote, FxError> {
        let url = format!("{}/latest", self.base_url);
        let query = [
            ("amount", amount.to_string()),
            ("from", from.to_string()),
            ("to", to.to_string()),
        ];
        let data: LatestResponse = self.get_json(&url, &query).await?;

        let converted = data
            .rates
            .get(to)
            .copied()
            .ok_or_else(|| FxError::MissingRate {
                from: from.to_string(),
                currency: to.to_string(),
            })?;

        Ok(RateQuote {
            amount: converted,
            date: data.date,
        })
    }
}
