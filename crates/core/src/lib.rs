pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod stores;

use models::{
    analytics::{BenchmarkSummary, PortfolioPerformance},
    chart::{BenchmarkPoint, PerformancePoint, TimeRange},
    company::{CompanyDetail, SearchPage},
    notification::{Notification, StoreKind, UndoToken},
    position::{PortfolioTotals, Position, PositionDraft},
    settings::MarketSettings,
    watchlist::WatchlistItem,
};
use providers::{mock_market::MockMarket, traits::QuoteProvider};
use serde::Serialize;
use std::sync::Arc;
use stores::{portfolio_store::PortfolioStore, watchlist_store::WatchlistStore};

use errors::CoreError;

/// Number of watchlist rows shown on the dashboard card.
pub const WATCHLIST_PREVIEW_LEN: usize = 3;

/// Main entry point for the stock dashboard core.
/// Owns both stores and the market generator they read from.
#[must_use]
pub struct StockDashboard {
    market: Arc<MockMarket>,
    portfolio: PortfolioStore,
    watchlist: WatchlistStore,
}

impl std::fmt::Debug for StockDashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StockDashboard")
            .field("market", &self.market)
            .field("portfolio", &self.portfolio)
            .field("watchlist", &self.watchlist.len())
            .finish()
    }
}

/// Read-only export of both lists.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DashboardSnapshot<'a> {
    positions: &'a [Position],
    totals: PortfolioTotals,
    watchlist: &'a [WatchlistItem],
}

impl StockDashboard {
    /// Create a dashboard whose portfolio is priced by the mock market.
    /// Nothing is loaded until [`initialize`](Self::initialize) runs.
    pub fn new(settings: MarketSettings) -> Result<Self, CoreError> {
        let market = Arc::new(MockMarket::new(settings)?);
        let provider: Arc<dyn QuoteProvider> = market.clone();
        Ok(Self::build(market, provider))
    }

    /// Create a dashboard whose portfolio quotes come from `provider`
    /// while charts and search still use `market`.
    pub fn with_quote_provider(market: Arc<MockMarket>, provider: Arc<dyn QuoteProvider>) -> Self {
        Self::build(market, provider)
    }

    /// Load both seed lists. Returns the portfolio's failure notice, if
    /// its first pricing failed.
    pub async fn initialize(&mut self) -> Option<Notification> {
        self.watchlist.initialize();
        self.portfolio.initialize().await
    }

    #[must_use]
    pub fn market(&self) -> &MockMarket {
        &self.market
    }

    // ── Portfolio ───────────────────────────────────────────────────

    #[must_use]
    pub fn portfolio(&self) -> &PortfolioStore {
        &self.portfolio
    }

    pub fn portfolio_mut(&mut self) -> &mut PortfolioStore {
        &mut self.portfolio
    }

    pub async fn refresh_portfolio(&mut self) -> Option<Notification> {
        self.portfolio.refresh().await
    }

    pub async fn open_position(&mut self, draft: PositionDraft) -> Result<Notification, CoreError> {
        self.portfolio.open_position(draft).await
    }

    pub async fn amend_position(&mut self, id: &str, draft: PositionDraft) -> Result<Notification, CoreError> {
        self.portfolio.amend_position(id, draft).await
    }

    pub fn remove_position(&mut self, id: &str) -> Option<Notification> {
        self.portfolio.remove(id)
    }

    // ── Watchlist ───────────────────────────────────────────────────

    #[must_use]
    pub fn watchlist(&self) -> &WatchlistStore {
        &self.watchlist
    }

    pub fn watchlist_mut(&mut self) -> &mut WatchlistStore {
        &mut self.watchlist
    }

    /// The rows shown on the dashboard card.
    #[must_use]
    pub fn watchlist_preview(&self) -> &[WatchlistItem] {
        self.watchlist.preview(WATCHLIST_PREVIEW_LEN)
    }

    /// Look up a listed company and add it to the watchlist with a fresh
    /// quote. Symbols that are already watched are rejected.
    pub async fn watch_company(&mut self, symbol: &str) -> Result<Notification, CoreError> {
        if self.watchlist.contains_symbol(symbol) {
            return Err(CoreError::ValidationError(format!(
                "{} is already in your watchlist",
                symbol.trim().to_uppercase()
            )));
        }
        let detail = self
            .market
            .get_company_detail(symbol)
            .await
            .ok_or_else(|| CoreError::ValidationError(format!("Unknown symbol: {}", symbol.trim())))?;
        self.watchlist
            .add(detail.into_watchlist_item(uuid::Uuid::new_v4().to_string()))
    }

    pub fn remove_watchlist_item(&mut self, id: &str) -> Option<Notification> {
        self.watchlist.remove(id)
    }

    // ── Undo ────────────────────────────────────────────────────────

    /// Restore whatever the token refers to, in the store that issued it.
    pub async fn undo(&mut self, token: &UndoToken) -> Option<Notification> {
        match token.store {
            StoreKind::Portfolio => self.portfolio.restore(token).await,
            StoreKind::Watchlist => self.watchlist.restore(token),
        }
    }

    // ── Charts & Analytics ──────────────────────────────────────────

    /// Portfolio value history for a range, ending at today's total.
    pub async fn historical_performance(&self, range: TimeRange) -> Vec<PerformancePoint> {
        self.market
            .fetch_historical_series(range, self.portfolio.positions())
            .await
    }

    pub async fn benchmark_series(&self, range: TimeRange) -> Vec<BenchmarkPoint> {
        self.market.fetch_benchmark_series(range).await
    }

    pub async fn benchmark_summary(&self) -> BenchmarkSummary {
        self.market.fetch_benchmark_summary().await
    }

    pub async fn performance(&self) -> Result<PortfolioPerformance, CoreError> {
        self.market
            .compute_portfolio_performance(self.portfolio.positions())
            .await
    }

    // ── Company Directory ───────────────────────────────────────────

    pub async fn search_companies(&self, query: &str, page: usize, page_size: usize) -> SearchPage {
        self.market.search_companies(query, page, page_size).await
    }

    pub async fn company_detail(&self, symbol: &str) -> Option<CompanyDetail> {
        self.market.get_company_detail(symbol).await
    }

    // ── Export ──────────────────────────────────────────────────────

    /// Both lists plus portfolio totals as pretty-printed JSON.
    pub fn snapshot_json(&self) -> Result<String, CoreError> {
        let snapshot = DashboardSnapshot {
            positions: self.portfolio.positions(),
            totals: self.portfolio.totals(),
            watchlist: self.watchlist.items(),
        };
        serde_json::to_string_pretty(&snapshot).map_err(|e| CoreError::Serialization(e.to_string()))
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(market: Arc<MockMarket>, provider: Arc<dyn QuoteProvider>) -> Self {
        Self {
            market,
            portfolio: PortfolioStore::new(provider),
            watchlist: WatchlistStore::new(),
        }
    }
}
