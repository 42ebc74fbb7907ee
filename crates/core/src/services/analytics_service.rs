use std::collections::{HashMap, HashSet};

use crate::errors::CoreError;
use crate::models::analytics::PortfolioPerformance;
use crate::models::position::{PortfolioTotals, Position};

/// Mock year-to-date return, in percent.
pub const MOCK_YTD_RETURN_PCT: f64 = 15.0;

/// Mock annualized return, in percent.
pub const MOCK_ANNUALIZED_RETURN_PCT: f64 = 12.5;

/// Computes position-level and portfolio-level figures: value, gain/loss,
/// allocation and performance.
///
/// Pure business logic: no I/O, no randomness.
pub struct AnalyticsService;

impl AnalyticsService {
    pub fn new() -> Self {
        Self
    }

    /// Unique uppercased symbols, in first-seen order.
    pub fn unique_symbols(&self, positions: &[Position]) -> Vec<String> {
        let mut seen = HashSet::new();
        positions
            .iter()
            .map(|p| p.symbol.to_uppercase())
            .filter(|s| seen.insert(s.clone()))
            .collect()
    }

    /// Merge fetched prices into positions and recompute value/gain/gain%.
    ///
    /// Every position's symbol must be present in `prices`; a missing quote
    /// fails the whole batch so a partially priced list never leaks out.
    /// `provider` names the quote source in the returned error.
    pub fn apply_prices(
        &self,
        positions: &[Position],
        prices: &HashMap<String, f64>,
        provider: &str,
    ) -> Result<Vec<Position>, CoreError> {
        positions
            .iter()
            .map(|position| {
                let symbol = position.symbol.to_uppercase();
                let price = prices.get(&symbol).copied().ok_or_else(|| CoreError::MarketData {
                    provider: provider.to_string(),
                    message: format!("No price returned for {symbol}"),
                })?;
                if !price.is_finite() || price < 0.0 {
                    return Err(CoreError::MarketData {
                        provider: provider.to_string(),
                        message: format!(
                            "Invalid price returned for {symbol}: {price} (must be finite and non-negative)"
                        ),
                    });
                }
                let mut priced = position.clone();
                priced.symbol = symbol;
                priced.apply_price(price);
                Ok(priced)
            })
            .collect()
    }

    /// Recompute every position's allocation as its share of total value.
    /// A zero total gives every position an allocation of 0.
    pub fn calculate_allocations(&self, positions: &mut [Position]) {
        let total_value: f64 = positions.iter().map(|p| p.value).sum();
        for position in positions.iter_mut() {
            position.allocation = if total_value > 0.0 {
                (position.value / total_value) * 100.0
            } else {
                0.0
            };
        }
    }

    /// Portfolio totals from the positions as they are (no re-pricing).
    pub fn totals(&self, positions: &[Position]) -> PortfolioTotals {
        let total_value: f64 = positions.iter().map(|p| p.value).sum();
        let total_cost: f64 = positions.iter().map(Position::cost_basis).sum();
        let total_return = total_value - total_cost;
        PortfolioTotals {
            position_count: positions.len(),
            total_value,
            total_cost,
            total_return,
            total_return_percent: percent_of(total_return, total_cost),
        }
    }

    /// `(symbol, allocation)` pairs, largest allocation first.
    pub fn allocation_breakdown(&self, positions: &[Position]) -> Vec<(String, f64)> {
        let mut breakdown: Vec<(String, f64)> = positions
            .iter()
            .map(|p| (p.symbol.clone(), p.allocation))
            .collect();
        breakdown.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        breakdown
    }

    /// Performance figures for freshly priced positions.
    ///
    /// `day_change_fraction` is the simulated move since yesterday
    /// (e.g. `0.013` for +1.3%). YTD and annualized figures are the mock
    /// constants above.
    pub fn performance(&self, priced: &[Position], day_change_fraction: f64) -> PortfolioPerformance {
        let totals = self.totals(priced);
        let day_change = totals.total_value * day_change_fraction;

        PortfolioPerformance {
            total_value: totals.total_value,
            total_cost: totals.total_cost,
            total_return: totals.total_return,
            total_return_percent: totals.total_return_percent,
            day_change,
            day_change_percent: percent_of(day_change, totals.total_value),
            ytd_return: totals.total_value * MOCK_YTD_RETURN_PCT / 100.0,
            ytd_return_percent: MOCK_YTD_RETURN_PCT,
            annualized_return_percent: MOCK_ANNUALIZED_RETURN_PCT,
        }
    }
}

impl Default for AnalyticsService {
    fn default() -> Self {
        Self::new()
    }
}

fn percent_of(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        (part / whole) * 100.0
    } else {
        0.0
    }
}

