use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

use crate::errors::CoreError;

/// Configuration injected into the mock market at construction.
///
/// Every field has a default, so a partial JSON document is enough to
/// override a single knob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketSettings {
    /// Reference prices for known tickers. Quotes fluctuate around these.
    pub base_prices: BTreeMap<String, f64>,

    /// Maximum random deviation from the base price, in percent
    pub fluctuation_pct: f64,

    /// Price range for tickers missing from `base_prices`
    pub unknown_price_min: f64,
    pub unknown_price_max: f64,

    /// Number of generated filler companies appended to the directory
    pub filler_companies: usize,

    /// Simulated network delays
    pub latency: LatencySettings,

    /// Last date of every generated series. Today (UTC) when unset.
    pub as_of: Option<NaiveDate>,

    /// Seed for the random source. Entropy when unset.
    pub seed: Option<u64>,
}

impl Default for MarketSettings {
    fn default() -> Self {
        let base_prices = [
            ("AAPL", 194.68),
            ("MSFT", 374.51),
            ("GOOGL", 133.32),
            ("AMZN", 147.03),
            ("TSLA", 234.3),
            ("NVDA", 487.21),
            ("JNJ", 155.16),
            ("V", 258.03),
            ("PG", 148.85),
            ("AMD", 176.52),
            ("INTC", 42.87),
            ("META", 472.22),
            ("DIS", 111.45),
            ("NFLX", 602.78),
            ("PYPL", 62.34),
            ("ADBE", 474.63),
            ("CSCO", 49.12),
            ("CRM", 273.8),
            ("CMCSA", 42.56),
            ("XOM", 113.49),
        ]
        .into_iter()
        .map(|(symbol, price)| (symbol.to_string(), price))
        .collect();

        Self {
            base_prices,
            fluctuation_pct: 2.0,
            unknown_price_min: 10.0,
            unknown_price_max: 500.0,
            filler_companies: 450,
            latency: LatencySettings::default(),
            as_of: None,
            seed: None,
        }
    }
}

impl MarketSettings {
    /// Defaults with no simulated latency and a fixed seed. Handy in tests.
    pub fn instant(seed: u64) -> Self {
        Self {
            latency: LatencySettings::none(),
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Parse settings from JSON, filling missing fields with defaults.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.normalize_symbols();
        settings.validate()?;
        Ok(settings)
    }

    /// Trim and uppercase the `base_prices` keys so lookups match
    /// regardless of how the config spelled them.
    pub fn normalize_symbols(&mut self) {
        self.base_prices = std::mem::take(&mut self.base_prices)
            .into_iter()
            .map(|(symbol, price)| (symbol.trim().to_uppercase(), price))
            .collect();
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.fluctuation_pct.is_finite() || !(0.0..100.0).contains(&self.fluctuation_pct) {
            return Err(CoreError::ValidationError(format!(
                "fluctuation_pct must be within [0, 100), got {}",
                self.fluctuation_pct
            )));
        }
        if !(self.unknown_price_min > 0.0 && self.unknown_price_min < self.unknown_price_max) {
            return Err(CoreError::ValidationError(format!(
                "unknown price range [{}, {}] is invalid",
                self.unknown_price_min, self.unknown_price_max
            )));
        }
        if let Some((symbol, price)) = self
            .base_prices
            .iter()
            .find(|(_, p)| !p.is_finite() || **p <= 0.0)
        {
            return Err(CoreError::ValidationError(format!(
                "Base price for {symbol} must be positive, got {price}"
            )));
        }
        Ok(())
    }

    /// Look up the reference price of a ticker (case-insensitive).
    #[must_use]
    pub fn base_price(&self, symbol: &str) -> Option<f64> {
        self.base_prices.get(&symbol.to_uppercase()).copied()
    }
}

/// Simulated latency per market data call, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatencySettings {
    pub prices_ms: u64,
    pub historical_ms: u64,
    pub benchmark_series_ms: u64,
    pub benchmark_summary_ms: u64,
    pub performance_ms: u64,
    pub search_ms: u64,
    pub company_detail_ms: u64,
}

impl Default for LatencySettings {
    fn default() -> Self {
        Self {
            prices_ms: 800,
            historical_ms: 600,
            benchmark_series_ms: 500,
            benchmark_summary_ms: 400,
            performance_ms: 300,
            search_ms: 500,
            company_detail_ms: 300,
        }
    }
}

impl LatencySettings {
    pub fn none() -> Self {
        Self {
            prices_ms: 0,
            historical_ms: 0,
            benchmark_series_ms: 0,
            benchmark_summary_ms: 0,
            performance_ms: 0,
            search_ms: 0,
            company_detail_ms: 0,
        }
    }

    pub(crate) fn duration(ms: u64) -> Duration {
        Duration::from_millis(ms)
    }
}
