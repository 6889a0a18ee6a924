//! Direct and two-hop currency conversion

use super::currency::{CurrencyCatalog, CurrencyRateProvider, RateQuote};
use super::error::FxError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, instrument};

/// Trims and upper-cases a currency code, checking it against the catalog when one is given.
pub fn normalize_code(code: &str, catalog: Option<&CurrencyCatalog>) -> Result<String, FxError> {
    let code = code.trim().to_uppercase();
    match catalog {
        Some(catalog) if !catalog.contains(&code) => Err(FxError::UnknownCurrency(code)),
        _ => Ok(code),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub amount: Decimal,
    pub from: String,
    pub to: String,
}

impl ConversionRequest {
    pub fn new(
        amount: Decimal,
        from: &str,
        to: &str,
        catalog: Option<&CurrencyCatalog>,
    ) -> Result<Self, FxError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(FxError::InvalidAmount(amount));
        }
        Ok(Self {
            amount,
            from: normalize_code(from, catalog)?,
            to: normalize_code(to, catalog)?,
        })
    }
}

/// How a request travels from source to target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Direct,
    /// Through an intermediary currency, reporting the intermediate amount.
    Via(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionResult {
    pub amount: Decimal,
    pub from: String,
    pub to: String,
    pub converted_amount: Decimal,
    /// Intermediary code and amount; only set for two-hop conversions.
    pub intermediate: Option<(String, Decimal)>,
    pub date: Option<NaiveDate>,
}

impl ConversionResult {
    pub fn intermediate_amount(&self) -> Option<Decimal> {
        self.intermediate.as_ref().map(|(_, amount)| *amount)
    }
}

pub struct RateConverter<'a> {
    provider: &'a dyn CurrencyRateProvider,
}

impl<'a> RateConverter<'a> {
    pub fn new(provider: &'a dyn CurrencyRateProvider) -> Self {
        Self { provider }
    }

    /// Fetches the currency catalog. No retries.
    pub async fn load_currencies(&self) -> Result<CurrencyCatalog, FxError> {
        let catalog = self.provider.fetch_currencies().await?;
        debug!(count = catalog.len(), "Loaded currency catalog");
        Ok(catalog)
    }

    pub async fn convert(&self, amount: Decimal, from: &str, to: &str) -> Result<Decimal, FxError> {
        Ok(self.quote(amount, from, to).await?.amount)
    }

    /// Converts `from -> base -> to`. The second hop only runs if the first succeeds.
    #[instrument(skip(self))]
    pub async fn convert_via(
        &self,
        amount: Decimal,
        from: &str,
        base: &str,
        to: &str,
    ) -> Result<ConversionResult, FxError> {
        let mid = self.quote(amount, from, base).await?;
        debug!(intermediate = %mid.amount, "First hop done");
        let last = self.quote(mid.amount, base, to).await?;

        Ok(ConversionResult {
            amount,
            from: from.to_string(),
            to: to.to_string(),
            converted_amount: last.amount,
            intermediate: Some((base.to_string(), mid.amount)),
            date: last.date.or(mid.date),
        })
    }

    pub async fn convert_request(
        &self,
        request: &ConversionRequest,
        route: &Route,
    ) -> Result<ConversionResult, FxError> {
        if request.from == request.to {
            // Same currency never routes through a base.
            return Ok(ConversionResult {
                amount: request.amount,
                from: request.from.clone(),
                to: request.to.clone(),
                converted_amount: request.amount,
                intermediate: None,
                date: None,
            });
        }

        match route {
            Route::Direct => {
                let quote = self
                    .quote(request.amount, &request.from, &request.to)
                    .await?;
                Ok(ConversionResult {
                    amount: request.amount,
                    from: request.from.clone(),
                    to: request.to.clone(),
                    converted_amount: quote.amount,
                    intermediate: None,
                    date: quote.date,
                })
            }
            Route::Via(base) => {
                self.convert_via(request.amount, &request.from, base, &request.to)
                    .await
            }
        }
    }

    async fn quote(&self, amount: Decimal, from: &str, to: &str) -> Result<RateQuote, FxError> {
        if from == to {
            debug!(currency = from, "Same currency, skipping request");
            return Ok(RateQuote { amount, date: None });
        }
        if amount.is_zero() {
            debug!("Zero amount, skipping request");
            return Ok(RateQuote {
                amount: Decimal::ZERO,
                date: None,
            });
        }
        self.provider.fetch_conversion(amount, from, to).await
    }
}
