//! Error taxonomy for catalog loading and conversion

use rust_decimal::Decimal;
use thiserror::Error;

/// Message shown to users when a conversion fails and details are hidden.
pub const GENERIC_FAILURE_MESSAGE: &str = "Unable to fetch live rates. Please try again later.";

#[derive(Debug, Error)]
pub enum FxError {
    /// Service unreachable, timed out, or answered with a non-success status.
    #[error("Network error: {0}")]
    Network(String),

    /// Response body could not be read as the expected shape.
    #[error("Format error: {0}")]
    Format(String),

    /// The response had no rate for the requested currency.
    #[error("Missing rate for {currency} in response for {from}->{currency}")]
    MissingRate { from: String, currency: String },

    #[error("Invalid amount: {0} (must not be negative)")]
    InvalidAmount(Decimal),

    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),
}

impl FxError {
    /// Text to show the user. Details are opt-in; the default is one message for every failure.
    pub fn user_message(&self, show_details: bool) -> String {
        if show_details {
            format!("{GENERIC_FAILURE_MESSAGE} ({self})")
        } else {
            GENERIC_FAILURE_MESSAGE.to_string()
        }
    }
}

impl From<reqwest::Error> for FxError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            FxError::Format(e.to_string())
        } else {
            FxError::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for FxError {
    fn from(e: serde_json::Error) -> Self {
        FxError::Format(e.to_string())
    }
}
