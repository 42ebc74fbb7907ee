use async_trait::async_trait;
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::errors::CoreError;
use crate::models::analytics::{BenchmarkSummary, PortfolioPerformance};
use crate::models::chart::{BenchmarkPoint, PerformancePoint, TimeRange};
use crate::models::company::{Company, CompanyDetail, SearchPage};
use crate::models::position::Position;
use crate::models::settings::{LatencySettings, MarketSettings};
use crate::services::analytics_service::AnalyticsService;
use crate::services::chart_service::{round_cents, ChartService, HistoricalTables};

use super::directory::build_directory;
use super::traits::QuoteProvider;

type SharedRng = Mutex<Box<dyn RngCore + Send>>;

/// In-process market simulator.
///
/// - **No I/O**: every figure is synthesized; calls only sleep to mimic
///   network latency.
/// - **Read-only tables**: base prices, history tables and the company
///   directory are fixed at construction.
/// - **Injectable randomness**: pass a seeded RNG (or set
///   `MarketSettings::seed`) for reproducible output.
///
/// Quotes fluctuate around a stable base, while company details are
/// re-randomized on every call. The two are intentionally not reconciled.
pub struct MockMarket {
    settings: MarketSettings,
    tables: HistoricalTables,
    directory: Vec<Company>,
    rng: SharedRng,
    chart_service: ChartService,
    analytics_service: AnalyticsService,
}

impl std::fmt::Debug for MockMarket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockMarket")
            .field("base_prices", &self.settings.base_prices.len())
            .field("companies", &self.directory.len())
            .field("latency", &self.settings.latency)
            .finish()
    }
}

impl MockMarket {
    /// Build a market from settings. Uses `settings.seed` when present,
    /// OS entropy otherwise.
    pub fn new(settings: MarketSettings) -> Result<Self, CoreError> {
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(settings, rng)
    }

    /// Build a market driven by a caller-supplied random source.
    pub fn with_rng(mut settings: MarketSettings, rng: impl RngCore + Send + 'static) -> Result<Self, CoreError> {
        settings.normalize_symbols();
        settings.validate()?;

        let mut rng: Box<dyn RngCore + Send> = Box::new(rng);
        let as_of = settings.as_of.unwrap_or_else(|| chrono::Utc::now().date_naive());
        let chart_service = ChartService::new();
        let tables = chart_service.generate_tables(rng.as_mut(), as_of);
        let directory = build_directory(rng.as_mut(), settings.filler_companies);

        Ok(Self {
            settings,
            tables,
            directory,
            rng: Mutex::new(rng),
            chart_service,
            analytics_service: AnalyticsService::new(),
        })
    }

    #[must_use]
    pub fn settings(&self) -> &MarketSettings {
        &self.settings
    }

    /// The full searchable directory, named companies first.
    #[must_use]
    pub fn directory(&self) -> &[Company] {
        &self.directory
    }

    #[must_use]
    pub fn tables(&self) -> &HistoricalTables {
        &self.tables
    }

    // ── Quotes ──────────────────────────────────────────────────────

    /// Current prices, keyed by uppercase symbol.
    ///
    /// Known tickers move at most ±`fluctuation_pct` around their base
    /// price; unknown tickers get a uniform price in the configured range.
    pub async fn fetch_prices<I, S>(&self, symbols: I) -> HashMap<String, f64>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let symbols: Vec<String> = symbols
            .into_iter()
            .map(|s| s.as_ref().trim().to_uppercase())
            .collect();
        self.simulate_latency(self.settings.latency.prices_ms).await;

        let prices = self.using_rng(|rng| {
            symbols
                .iter()
                .map(|symbol| (symbol.clone(), self.quote(rng, symbol)))
                .collect::<HashMap<_, _>>()
        });
        debug!("Quoted {} symbol(s)", prices.len());
        prices
    }

    fn quote(&self, rng: &mut dyn RngCore, symbol: &str) -> f64 {
        match self.settings.base_price(symbol) {
            Some(base) => {
                let spread = self.settings.fluctuation_pct;
                let pct = rng.gen_range(-spread..=spread);
                round_cents(base * (1.0 + pct / 100.0))
            }
            None => round_cents(
                rng.gen_range(self.settings.unknown_price_min..self.settings.unknown_price_max),
            ),
        }
    }

    // ── History & Benchmarks ────────────────────────────────────────

    /// Portfolio history for a range, scaled so the last point equals the
    /// positions' current total value.
    pub async fn fetch_historical_series(&self, range: TimeRange, positions: &[Position]) -> Vec<PerformancePoint> {
        self.simulate_latency(self.settings.latency.historical_ms).await;
        let base = self.chart_service.base_series(&self.tables, range);
        self.chart_service.scale_to_portfolio(base, positions)
    }

    /// The unscaled base rows for a range, with all index tracks.
    pub async fn fetch_benchmark_series(&self, range: TimeRange) -> Vec<BenchmarkPoint> {
        self.simulate_latency(self.settings.latency.benchmark_series_ms).await;
        self.chart_service.base_series(&self.tables, range).to_vec()
    }

    /// Fixed trailing-return figures for the portfolio and each index.
    pub async fn fetch_benchmark_summary(&self) -> BenchmarkSummary {
        self.simulate_latency(self.settings.latency.benchmark_summary_ms).await;
        BenchmarkSummary::default()
    }

    /// Re-price the positions and compute performance figures.
    ///
    /// Day change is a random ±2% move; YTD and annualized returns are
    /// fixed mock figures unrelated to the historical series.
    pub async fn compute_portfolio_performance(&self, positions: &[Position]) -> Result<PortfolioPerformance, CoreError> {
        self.simulate_latency(self.settings.latency.performance_ms).await;

        let symbols = self.analytics_service.unique_symbols(positions);
        let prices = self.fetch_prices(&symbols).await;
        let priced = self.analytics_service.apply_prices(positions, &prices, self.name())?;

        let day_change_fraction = self.using_rng(|rng| rng.gen_range(-0.02..=0.02));
        Ok(self.analytics_service.performance(&priced, day_change_fraction))
    }

    // ── Company Directory ───────────────────────────────────────────

    /// Case-insensitive substring search over symbol and name.
    ///
    /// Pages are 1-based; page 0 is read as page 1.
    pub async fn search_companies(&self, query: &str, page: usize, page_size: usize) -> SearchPage {
        self.simulate_latency(self.settings.latency.search_ms).await;

        let needle = query.trim().to_lowercase();
        let matches: Vec<&Company> = self
            .directory
            .iter()
            .filter(|c| c.matches_lowercase(&needle))
            .collect();

        let start = page.max(1).saturating_sub(1).saturating_mul(page_size);
        let end = start.saturating_add(page_size);
        let results = matches
            .iter()
            .skip(start)
            .take(page_size)
            .map(|c| (*c).clone())
            .collect();

        SearchPage {
            results,
            has_more: end < matches.len(),
        }
    }

    /// Synthesize a quote for a directory company, or `None` if the symbol
    /// is not listed. Every call draws fresh numbers.
    pub async fn get_company_detail(&self, symbol: &str) -> Option<CompanyDetail> {
        self.simulate_latency(self.settings.latency.company_detail_ms).await;

        let wanted = symbol.trim().to_lowercase();
        let company = self
            .directory
            .iter()
            .find(|c| c.symbol.to_lowercase() == wanted)?
            .clone();

        Some(self.using_rng(|rng| synthesize_detail(rng, company)))
    }

    // ── Internal ────────────────────────────────────────────────────

    async fn simulate_latency(&self, ms: u64) {
        if ms > 0 {
            tokio::time::sleep(LatencySettings::duration(ms)).await;
        }
    }

    /// Run `f` with exclusive access to the random source.
    /// The lock is never held across an await point.
    fn using_rng<T>(&self, f: impl FnOnce(&mut dyn RngCore) -> T) -> T {
        let mut guard = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut **guard)
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl QuoteProvider for MockMarket {
    fn name(&self) -> &str {
        "Mock Market"
    }

    async fn fetch_quotes(&self, symbols: &[String]) -> Result<HashMap<String, f64>, CoreError> {
        Ok(self.fetch_prices(symbols).await)
    }
}

fn synthesize_detail(rng: &mut dyn RngCore, company: Company) -> CompanyDetail {
    let price = round_cents(50.0 + rng.gen::<f64>() * 450.0);
    let change_percent = round_cents(rng.gen::<f64>() * 10.0 - 5.0);
    let change = round_cents(price * change_percent / 100.0);
    let pe_ratio = ((10.0 + rng.gen::<f64>() * 40.0) * 10.0).round() / 10.0;

    // in billions
    let market_cap_value = rng.gen::<f64>() * 2000.0;
    let market_cap = if market_cap_value >= 1000.0 {
        format!("{:.1}T", market_cap_value / 1000.0)
    } else {
        format!("{market_cap_value:.1}B")
    };

    // in millions
    let volume_value = rng.gen::<f64>() * 100.0;
    let avg_volume_value = volume_value * (0.8 + rng.gen::<f64>() * 0.4);

    let pays_dividend = rng.gen_bool(0.5);
    let dividend = if pays_dividend {
        round_cents(rng.gen::<f64>() * 5.0)
    } else {
        0.0
    };
    // Stored as a fraction, unlike the percentage-style seed watchlist data.
    let dividend_yield = if pays_dividend {
        round_cents(dividend / price * 100.0) / 100.0
    } else {
        0.0
    };

    CompanyDetail {
        symbol: company.symbol,
        name: company.name,
        price,
        change,
        change_percent,
        pe_ratio,
        market_cap,
        volume: format!("{volume_value:.1}M"),
        avg_volume: format!("{avg_volume_value:.1}M"),
        dividend,
        dividend_yield,
    }
}
