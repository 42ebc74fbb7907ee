use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Longest ticker accepted for a position.
pub const MAX_SYMBOL_LEN: usize = 5;

/// A single holding in the portfolio.
///
/// `value`, `gain`, `gain_percent` and `allocation` are derived fields.
/// They are recomputed by the portfolio store after every price refresh
/// or list mutation and should never be edited by hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    /// Unique identifier, immutable once assigned
    pub id: String,

    /// Ticker symbol, uppercased (e.g., "AAPL")
    pub symbol: String,

    /// Company display name
    pub name: String,

    /// Number of shares held (always positive)
    pub shares: f64,

    /// Cost basis per share (always positive)
    pub avg_cost: f64,

    /// Last fetched market price, 0 until the first refresh
    #[serde(default)]
    pub current_price: f64,

    /// shares × current_price
    #[serde(default)]
    pub value: f64,

    /// shares × (current_price − avg_cost)
    #[serde(default)]
    pub gain: f64,

    /// (current_price − avg_cost) / avg_cost × 100
    #[serde(default)]
    pub gain_percent: f64,

    /// This position's share of total portfolio value, in percent
    #[serde(default)]
    pub allocation: f64,
}

impl Position {
    /// Create an unpriced position. Symbol is uppercased.
    pub fn new(
        id: impl Into<String>,
        symbol: impl Into<String>,
        name: impl Into<String>,
        shares: f64,
        avg_cost: f64,
    ) -> Self {
        Self {
            id: id.into(),
            symbol: symbol.into().trim().to_uppercase(),
            name: name.into(),
            shares,
            avg_cost,
            current_price: 0.0,
            value: 0.0,
            gain: 0.0,
            gain_percent: 0.0,
            allocation: 0.0,
        }
    }

    /// Apply a market price and recompute the per-position derived fields.
    /// Allocation is left alone; it depends on the whole collection.
    pub fn apply_price(&mut self, price: f64) {
        self.current_price = price;
        self.value = self.shares * price;
        self.gain = self.shares * (price - self.avg_cost);
        self.gain_percent = if self.avg_cost > 0.0 {
            (price - self.avg_cost) / self.avg_cost * 100.0
        } else {
            0.0
        };
    }

    /// Builder-style variant of [`Position::apply_price`].
    #[must_use]
    pub fn priced(mut self, price: f64) -> Self {
        self.apply_price(price);
        self
    }

    /// Total amount paid for this position (shares × avg_cost).
    #[must_use]
    pub fn cost_basis(&self) -> f64 {
        self.shares * self.avg_cost
    }

    /// Check the user-entered fields.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.id.trim().is_empty() {
            return Err(CoreError::ValidationError("Position id must not be empty".into()));
        }
        validate_holding_fields(&self.symbol, &self.name, self.shares, self.avg_cost)
    }
}

/// Form payload for opening or amending a position.
///
/// Carries only what a user types in; the store fetches the price and
/// assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionDraft {
    pub symbol: String,
    pub name: String,
    pub shares: f64,
    pub avg_cost: f64,
}

impl PositionDraft {
    pub fn new(symbol: impl Into<String>, name: impl Into<String>, shares: f64, avg_cost: f64) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            shares,
            avg_cost,
        }
    }

    /// Normalized ticker (trimmed, uppercased).
    #[must_use]
    pub fn normalized_symbol(&self) -> String {
        self.symbol.trim().to_uppercase()
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        validate_holding_fields(&self.normalized_symbol(), &self.name, self.shares, self.avg_cost)
    }

    /// Turn the draft into an unpriced position with the given id.
    pub fn into_position(self, id: impl Into<String>) -> Position {
        Position::new(id, self.symbol, self.name.trim(), self.shares, self.avg_cost)
    }
}

fn validate_holding_fields(symbol: &str, name: &str, shares: f64, avg_cost: f64) -> Result<(), CoreError> {
    let symbol = symbol.trim();
    if symbol.is_empty() {
        return Err(CoreError::ValidationError("Symbol is required".into()));
    }
    if symbol.chars().count() > MAX_SYMBOL_LEN {
        return Err(CoreError::ValidationError(format!(
            "Symbol '{symbol}' is too long (max {MAX_SYMBOL_LEN} characters)"
        )));
    }
    if name.trim().is_empty() {
        return Err(CoreError::ValidationError("Company name is required".into()));
    }
    if !shares.is_finite() || shares <= 0.0 {
        return Err(CoreError::ValidationError(
            "Shares must be greater than 0".into(),
        ));
    }
    if !avg_cost.is_finite() || avg_cost <= 0.0 {
        return Err(CoreError::ValidationError(
            "Average cost must be greater than 0".into(),
        ));
    }
    Ok(())
}

/// Aggregate figures for the whole portfolio, computed from store state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioTotals {
    pub position_count: usize,
    pub total_value: f64,
    pub total_cost: f64,
    pub total_return: f64,
    pub total_return_percent: f64,
}
