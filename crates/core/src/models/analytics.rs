use serde::{Deserialize, Serialize};

/// Performance figures for the whole portfolio.
///
/// `ytd_return_percent` and `annualized_return_percent` are fixed mock
/// figures. They are not derived from the historical series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioPerformance {
    /// Sum of position values at freshly fetched prices
    pub total_value: f64,

    /// Sum of shares × avg_cost
    pub total_cost: f64,

    /// total_value − total_cost
    pub total_return: f64,

    /// total_return / total_cost × 100 (0 when there is no cost basis)
    pub total_return_percent: f64,

    /// Simulated change since yesterday
    pub day_change: f64,
    pub day_change_percent: f64,

    pub ytd_return: f64,
    pub ytd_return_percent: f64,
    pub annualized_return_percent: f64,
}

/// Trailing returns of one index (or of the portfolio), in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexPerformance {
    pub name: String,
    pub ytd: f64,
    pub one_year: f64,
    pub three_year: f64,
    pub five_year: f64,
}

impl IndexPerformance {
    fn new(name: &str, ytd: f64, one_year: f64, three_year: f64, five_year: f64) -> Self {
        Self {
            name: name.to_string(),
            ytd,
            one_year,
            three_year,
            five_year,
        }
    }
}

/// Portfolio returns compared against the three benchmark indices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkSummary {
    pub portfolio: IndexPerformance,
    pub sp500: IndexPerformance,
    pub nasdaq: IndexPerformance,
    pub dow: IndexPerformance,
}

impl Default for BenchmarkSummary {
    fn default() -> Self {
        Self {
            portfolio: IndexPerformance::new("Your Portfolio", 35.0, 38.5, 62.3, 112.7),
            sp500: IndexPerformance::new("S&P 500", 20.0, 22.5, 45.8, 78.2),
            nasdaq: IndexPerformance::new("NASDAQ", 32.0, 35.7, 58.9, 105.3),
            dow: IndexPerformance::new("Dow Jones", 18.0, 19.8, 38.2, 65.7),
        }
    }
}
