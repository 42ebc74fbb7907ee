use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Which synthetic history granularity to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeRange {
    /// 30 daily points
    #[serde(rename = "1M")]
    OneMonth,
    /// 12 weekly points
    #[serde(rename = "3M")]
    ThreeMonths,
    /// Last 6 monthly points
    #[serde(rename = "6M")]
    SixMonths,
    /// 12 monthly points
    #[default]
    #[serde(rename = "1Y")]
    OneYear,
    /// 60 monthly points with market cycles
    #[serde(rename = "5Y")]
    FiveYears,
    /// 120 monthly points with market cycles
    #[serde(rename = "All")]
    All,
}

impl TimeRange {
    pub const ALL_RANGES: [TimeRange; 6] = [
        TimeRange::OneMonth,
        TimeRange::ThreeMonths,
        TimeRange::SixMonths,
        TimeRange::OneYear,
        TimeRange::FiveYears,
        TimeRange::All,
    ];

    /// Number of points a series for this range contains.
    #[must_use]
    pub fn point_count(&self) -> usize {
        match self {
            TimeRange::OneMonth => 30,
            TimeRange::ThreeMonths => 12,
            TimeRange::SixMonths => 6,
            TimeRange::OneYear => 12,
            TimeRange::FiveYears => 60,
            TimeRange::All => 120,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::OneMonth => "1M",
            TimeRange::ThreeMonths => "3M",
            TimeRange::SixMonths => "6M",
            TimeRange::OneYear => "1Y",
            TimeRange::FiveYears => "5Y",
            TimeRange::All => "All",
        }
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TimeRange {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1M" => Ok(TimeRange::OneMonth),
            "3M" => Ok(TimeRange::ThreeMonths),
            "6M" => Ok(TimeRange::SixMonths),
            "1Y" => Ok(TimeRange::OneYear),
            "5Y" => Ok(TimeRange::FiveYears),
            "All" | "ALL" | "all" => Ok(TimeRange::All),
            other => Err(CoreError::ValidationError(format!(
                "Unknown time range '{other}' (expected 1M, 3M, 6M, 1Y, 5Y or All)"
            ))),
        }
    }
}

/// One row of the unscaled base history: an index-like portfolio track
/// next to the three benchmark index tracks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkPoint {
    pub date: NaiveDate,

    /// Axis label, e.g. "3/14", "Week 4", "Mar" or "Mar 2024"
    pub label: String,

    pub portfolio: f64,
    pub sp500: f64,
    pub nasdaq: f64,
    pub dow: f64,
}

/// A point of the portfolio history scaled to the current total value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformancePoint {
    pub date: NaiveDate,
    pub label: String,
    pub value: f64,
    pub benchmark_value: f64,
}
