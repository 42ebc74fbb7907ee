use chrono::{Datelike, Duration, Months, NaiveDate};
use rand::Rng;

use crate::models::chart::{BenchmarkPoint, PerformancePoint, TimeRange};
use crate::models::position::Position;

/// Length of one simulated bull/bear market cycle, in months.
const CYCLE_MONTHS: usize = 24;
/// Rising months at the start of each cycle.
const UP_MONTHS: usize = 16;
/// Monthly probability of a market-wide shock.
const SHOCK_PROBABILITY: f64 = 0.015;
/// Monthly probability that the portfolio beats the market.
const OUTPERFORMANCE_PROBABILITY: f64 = 0.1;
/// The scaled benchmark line tracks the S&P 500 at this fraction.
const BENCHMARK_WEIGHT: f64 = 0.8;

/// Synthetic history tables, built once per market instance.
///
/// Short ranges are gentle linear uptrends with noise; the multi-year
/// tables simulate market cycles with shocks.
#[derive(Debug, Clone)]
pub struct HistoricalTables {
    pub daily: Vec<BenchmarkPoint>,
    pub weekly: Vec<BenchmarkPoint>,
    pub monthly: Vec<BenchmarkPoint>,
    pub five_year: Vec<BenchmarkPoint>,
    pub all_time: Vec<BenchmarkPoint>,
}

/// Per-track growth range: (up_min, up_spread, down_min, down_spread).
type GrowthProfile = (f64, f64, f64, f64);

const PORTFOLIO_GROWTH: GrowthProfile = (0.015, 0.01, 0.005, 0.015);
const SP500_GROWTH: GrowthProfile = (0.01, 0.008, 0.004, 0.012);
const NASDAQ_GROWTH: GrowthProfile = (0.012, 0.013, 0.006, 0.018);
const DOW_GROWTH: GrowthProfile = (0.008, 0.007, 0.003, 0.01);

/// Generates chart-ready history: synthetic base tables and their scaling
/// to the live portfolio value.
pub struct ChartService;

impl ChartService {
    pub fn new() -> Self {
        Self
    }

    /// Build every base table, ending at `as_of`.
    pub fn generate_tables<R: Rng + ?Sized>(&self, rng: &mut R, as_of: NaiveDate) -> HistoricalTables {
        HistoricalTables {
            daily: self.generate_daily(rng, as_of),
            weekly: self.generate_weekly(rng, as_of),
            monthly: self.generate_monthly(rng, as_of),
            five_year: self.generate_market_cycles(rng, as_of, 5),
            all_time: self.generate_market_cycles(rng, as_of, 10),
        }
    }

    /// Select the base rows for a time range.
    pub fn base_series<'a>(&self, tables: &'a HistoricalTables, range: TimeRange) -> &'a [BenchmarkPoint] {
        match range {
            TimeRange::OneMonth => tail(&tables.daily, 30),
            TimeRange::ThreeMonths => tail(&tables.weekly, 12),
            TimeRange::SixMonths => tail(&tables.monthly, 6),
            TimeRange::OneYear => &tables.monthly,
            TimeRange::FiveYears => &tables.five_year,
            TimeRange::All => &tables.all_time,
        }
    }

    /// Scale a base series so its last point equals the portfolio's
    /// current total value.
    ///
    /// The benchmark line is the S&P track under the same scale factor,
    /// weighted down to 80%. An empty or zero-valued portfolio yields a
    /// flat zero series.
    pub fn scale_to_portfolio(&self, base: &[BenchmarkPoint], positions: &[Position]) -> Vec<PerformancePoint> {
        let total_value: f64 = positions.iter().map(|p| p.value).sum();
        let last = base.last().map(|p| p.portfolio).unwrap_or(0.0);
        let scale = if last > 0.0 && total_value.is_finite() {
            total_value / (last * 100.0)
        } else {
            0.0
        };

        base.iter()
            .map(|point| PerformancePoint {
                date: point.date,
                label: point.label.clone(),
                value: round_cents(point.portfolio * 100.0 * scale),
                benchmark_value: round_cents(point.sp500 * 100.0 * scale * BENCHMARK_WEIGHT),
            })
            .collect()
    }

    /// 30 daily points ending at `as_of`, labeled "M/D".
    fn generate_daily<R: Rng + ?Sized>(&self, rng: &mut R, as_of: NaiveDate) -> Vec<BenchmarkPoint> {
        (0..30)
            .map(|i| {
                let date = as_of - Duration::days(29 - i as i64);
                let step = i as f64;
                BenchmarkPoint {
                    date,
                    label: format!("{}/{}", date.month(), date.day()),
                    portfolio: round_cents(130.0 + step * 0.5 + rng.gen::<f64>() * 1.5),
                    sp500: round_cents(125.0 + step * 0.3 + rng.gen::<f64>()),
                    nasdaq: round_cents(128.0 + step * 0.4 + rng.gen::<f64>() * 1.2),
                    dow: round_cents(122.0 + step * 0.25 + rng.gen::<f64>() * 0.8),
                }
            })
            .collect()
    }

    /// 12 weekly points ending at `as_of`, labeled "Week N".
    fn generate_weekly<R: Rng + ?Sized>(&self, rng: &mut R, as_of: NaiveDate) -> Vec<BenchmarkPoint> {
        (0..12)
            .map(|i| {
                let date = as_of - Duration::days((11 - i as i64) * 7);
                let step = i as f64;
                BenchmarkPoint {
                    date,
                    label: format!("Week {}", i + 1),
                    portfolio: round_cents(120.0 + step * 1.5 + rng.gen::<f64>() * 3.0),
                    sp500: round_cents(115.0 + step + rng.gen::<f64>() * 2.0),
                    nasdaq: round_cents(118.0 + step * 1.2 + rng.gen::<f64>() * 2.5),
                    dow: round_cents(112.0 + step * 0.9 + rng.gen::<f64>() * 1.8),
                }
            })
            .collect()
    }

    /// 12 monthly points ending at `as_of`, labeled with the month name.
    fn generate_monthly<R: Rng + ?Sized>(&self, rng: &mut R, as_of: NaiveDate) -> Vec<BenchmarkPoint> {
        (0..12)
            .map(|i| {
                let date = months_before(as_of, 11 - i as u32);
                let step = i as f64;
                BenchmarkPoint {
                    date,
                    label: date.format("%b").to_string(),
                    portfolio: round_cents(100.0 + step * 3.0 + rng.gen::<f64>() * 5.0),
                    sp500: round_cents(100.0 + step * 2.0 + rng.gen::<f64>() * 3.0),
                    nasdaq: round_cents(100.0 + step * 2.5 + rng.gen::<f64>() * 4.0),
                    dow: round_cents(100.0 + step * 1.8 + rng.gen::<f64>() * 2.0),
                }
            })
            .collect()
    }

    /// Monthly points over `years` years with a repeating 24-month cycle:
    /// 16 rising months, 8 falling. Occasional shocks hit every track;
    /// occasional outperformance lifts only the portfolio.
    pub fn generate_market_cycles<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        as_of: NaiveDate,
        years: usize,
    ) -> Vec<BenchmarkPoint> {
        let months = years * 12;
        let mut portfolio = 100.0;
        let mut sp500 = 100.0;
        let mut nasdaq = 100.0;
        let mut dow = 100.0;

        let mut points = Vec::with_capacity(months);
        for i in 0..months {
            let date = months_before(as_of, (months - 1 - i) as u32);
            let rising = i % CYCLE_MONTHS < UP_MONTHS;

            portfolio *= growth_factor(rng, rising, PORTFOLIO_GROWTH);
            sp500 *= growth_factor(rng, rising, SP500_GROWTH);
            nasdaq *= growth_factor(rng, rising, NASDAQ_GROWTH);
            dow *= growth_factor(rng, rising, DOW_GROWTH);

            if rng.gen_bool(SHOCK_PROBABILITY) {
                // 5 to 15% drop across the board
                let shock = 0.85 + rng.gen::<f64>() * 0.1;
                portfolio *= shock;
                sp500 *= shock;
                nasdaq *= shock;
                dow *= shock;
            }

            if rng.gen_bool(OUTPERFORMANCE_PROBABILITY) {
                portfolio *= 1.0 + rng.gen::<f64>() * 0.02;
            }

            points.push(BenchmarkPoint {
                date,
                label: date.format("%b %Y").to_string(),
                portfolio: round_cents(portfolio),
                sp500: round_cents(sp500),
                nasdaq: round_cents(nasdaq),
                dow: round_cents(dow),
            });
        }
        points
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}

fn growth_factor<R: Rng + ?Sized>(rng: &mut R, rising: bool, profile: GrowthProfile) -> f64 {
    let (up_min, up_spread, down_min, down_spread) = profile;
    if rising {
        1.0 + (up_min + rng.gen::<f64>() * up_spread)
    } else {
        1.0 - (down_min + rng.gen::<f64>() * down_spread)
    }
}

fn months_before(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(months)).unwrap_or(date)
}

fn tail(rows: &[BenchmarkPoint], n: usize) -> &[BenchmarkPoint] {
    &rows[rows.len().saturating_sub(n)..]
}

/// Round to two decimal places.
pub(crate) fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
