use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// A tracked symbol with quote data. Not counted in portfolio value.
///
/// The optional metrics are display-only and are never recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistItem {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pe_ratio: Option<f64>,

    /// Pre-formatted, e.g. "1.2T" or "285.3B"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<String>,

    /// Pre-formatted, e.g. "32.5M"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_volume: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dividend: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dividend_yield: Option<f64>,
}

impl WatchlistItem {
    /// Create an item with the quote fields only. Symbol is uppercased.
    pub fn new(
        id: impl Into<String>,
        symbol: impl Into<String>,
        name: impl Into<String>,
        price: f64,
        change: f64,
        change_percent: f64,
    ) -> Self {
        Self {
            id: id.into(),
            symbol: symbol.into().trim().to_uppercase(),
            name: name.into(),
            price,
            change,
            change_percent,
            pe_ratio: None,
            market_cap: None,
            volume: None,
            avg_volume: None,
            dividend: None,
            dividend_yield: None,
        }
    }

    /// Attach the display-only metrics.
    #[must_use]
    pub fn with_metrics(
        mut self,
        pe_ratio: f64,
        market_cap: impl Into<String>,
        volume: impl Into<String>,
        avg_volume: impl Into<String>,
        dividend: f64,
        dividend_yield: f64,
    ) -> Self {
        self.pe_ratio = Some(pe_ratio);
        self.market_cap = Some(market_cap.into());
        self.volume = Some(volume.into());
        self.avg_volume = Some(avg_volume.into());
        self.dividend = Some(dividend);
        self.dividend_yield = Some(dividend_yield);
        self
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.id.trim().is_empty() {
            return Err(CoreError::ValidationError("Watchlist item id must not be empty".into()));
        }
        if self.symbol.trim().is_empty() {
            return Err(CoreError::ValidationError("Symbol is required".into()));
        }
        if self.name.trim().is_empty() {
            return Err(CoreError::ValidationError("Company name is required".into()));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Invalid price for {}: {} (must be finite and non-negative)",
                self.symbol, self.price
            )));
        }
        Ok(())
    }

    /// True when the day's change is positive.
    #[must_use]
    pub fn is_up(&self) -> bool {
        self.change_percent > 0.0
    }
}
