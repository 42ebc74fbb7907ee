use log::{debug, info, warn};
use std::collections::HashMap;
use std::sync::Arc;

use crate::errors::CoreError;
use crate::models::notification::{Notification, PendingRestore, StoreKind, UndoToken};
use crate::models::position::{PortfolioTotals, Position, PositionDraft};
use crate::providers::traits::QuoteProvider;
use crate::services::analytics_service::AnalyticsService;

/// Starting holdings loaded by [`PortfolioStore::initialize`], unpriced.
pub fn seed_positions() -> Vec<Position> {
    vec![
        Position::new("1", "AAPL", "Apple Inc.", 15.0, 145.75),
        Position::new("2", "MSFT", "Microsoft Corporation", 10.0, 287.65),
        Position::new("3", "GOOGL", "Alphabet Inc.", 8.0, 115.22),
        Position::new("4", "AMZN", "Amazon.com Inc.", 12.0, 120.35),
        Position::new("5", "TSLA", "Tesla Inc.", 20.0, 190.75),
    ]
}

/// Owns the list of positions and keeps its derived fields current.
///
/// Every mutation recomputes allocations across the whole list. Removed
/// positions wait in a pending-restore slot (one per id) until they are
/// restored through the returned [`UndoToken`] or overwritten by a later
/// removal of the same id.
///
/// Mutating methods take `&mut self`, so operations on one store never
/// interleave. Callers sharing a store across tasks wrap it in a
/// `tokio::sync::Mutex`; whichever operation finishes last wins.
pub struct PortfolioStore {
    positions: Vec<Position>,
    pending: HashMap<String, PendingRestore<Position>>,
    provider: Arc<dyn QuoteProvider>,
    analytics_service: AnalyticsService,
    initialized: bool,
    next_seq: u64,
}

impl std::fmt::Debug for PortfolioStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortfolioStore")
            .field("positions", &self.positions.len())
            .field("pending_restores", &self.pending.len())
            .field("provider", &self.provider.name())
            .field("initialized", &self.initialized)
            .finish()
    }
}

impl PortfolioStore {
    /// Create an empty, uninitialized store.
    pub fn new(provider: Arc<dyn QuoteProvider>) -> Self {
        Self {
            positions: Vec::new(),
            pending: HashMap::new(),
            provider,
            analytics_service: AnalyticsService::new(),
            initialized: false,
            next_seq: 0,
        }
    }

    /// Create a store pre-filled with positions (e.g. from a snapshot).
    /// The store counts as initialized; no prices are fetched.
    pub fn with_positions(provider: Arc<dyn QuoteProvider>, positions: Vec<Position>) -> Result<Self, CoreError> {
        let mut store = Self::new(provider);
        for position in positions {
            store.insert_checked(position)?;
        }
        store.analytics_service.calculate_allocations(&mut store.positions);
        store.initialized = true;
        Ok(store)
    }

    // ── Lifecycle ───────────────────────────────────────────────────

    /// Load the seed holdings and price them. Runs once per store;
    /// later calls do nothing.
    ///
    /// If pricing fails the seed list is kept unpriced (all derived
    /// fields 0) and a `RefreshFailed` notification is returned.
    pub async fn initialize(&mut self) -> Option<Notification> {
        if self.initialized {
            return None;
        }
        self.initialized = true;

        let seed = seed_positions();
        let result = self.price(&seed).await;
        match result {
            Ok(priced) => {
                debug!("Portfolio initialized with {} priced positions", priced.len());
                self.positions = priced;
                None
            }
            Err(e) => {
                warn!("Error loading initial portfolio prices: {e}");
                self.positions = seed;
                Some(refresh_failed())
            }
        }
    }

    /// Re-price every position and recompute derived fields.
    ///
    /// On failure the current list is left untouched and a
    /// `RefreshFailed` notification is returned. An empty list is a no-op.
    pub async fn refresh(&mut self) -> Option<Notification> {
        if self.positions.is_empty() {
            return None;
        }

        let result = self.price(&self.positions).await;
        match result {
            Ok(priced) => {
                debug!("Refreshed prices for {} positions", priced.len());
                self.positions = priced;
                None
            }
            Err(e) => {
                warn!("Error refreshing portfolio: {e}");
                Some(refresh_failed())
            }
        }
    }

    // ── Mutations ───────────────────────────────────────────────────

    /// Append a position priced by the caller. Value and gain are
    /// recomputed from its `current_price`.
    pub fn add(&mut self, position: Position) -> Result<Notification, CoreError> {
        let notification = Notification::Added {
            symbol: position.symbol.to_uppercase(),
            shares: Some(position.shares),
            price: position.current_price,
        };
        self.insert_checked(position)?;
        self.analytics_service.calculate_allocations(&mut self.positions);
        info!("{notification}");
        Ok(notification)
    }

    /// Replace the position with the same id, recomputing its derived
    /// fields from `current_price`.
    pub fn update(&mut self, position: Position) -> Result<Notification, CoreError> {
        position.validate()?;
        let idx = self
            .index_of(&position.id)
            .ok_or_else(|| CoreError::PositionNotFound(position.id.clone()))?;

        let mut position = position;
        position.symbol = position.symbol.to_uppercase();
        position.apply_price(position.current_price);
        let notification = Notification::Updated {
            symbol: position.symbol.clone(),
            shares: Some(position.shares),
            price: position.current_price,
        };
        self.positions[idx] = position;
        self.analytics_service.calculate_allocations(&mut self.positions);
        info!("{notification}");
        Ok(notification)
    }

    /// Remove a position, keeping it restorable.
    ///
    /// Returns `None` when the id is not in the list; the pending slot of an
    /// earlier removal is left as it was.
    pub fn remove(&mut self, id: &str) -> Option<Notification> {
        let idx = self.index_of(id)?;
        let removed = self.positions.remove(idx);
        self.analytics_service.calculate_allocations(&mut self.positions);

        self.next_seq += 1;
        let undo = UndoToken {
            store: StoreKind::Portfolio,
            id: removed.id.clone(),
            symbol: removed.symbol.clone(),
            seq: self.next_seq,
        };
        let detail = format!("{} shares at ${:.2}", removed.shares, removed.avg_cost);
        let symbol = removed.symbol.clone();

        // A newer removal of the same id replaces the older slot.
        self.pending.insert(
            removed.id.clone(),
            PendingRestore {
                entry: removed,
                original_index: idx,
                seq: self.next_seq,
            },
        );

        info!("{symbol} removed from portfolio ({detail})");
        Some(Notification::Removed { symbol, detail, undo })
    }

    /// Put a removed position back where it was.
    ///
    /// The price is re-fetched first; if that fails the snapshot taken at
    /// removal is used instead. Either way the slot is cleared. Returns
    /// `None` when the token no longer matches a pending slot, or when a
    /// position with the same id has been added since.
    pub async fn restore(&mut self, token: &UndoToken) -> Option<Notification> {
        if token.store != StoreKind::Portfolio {
            return None;
        }
        match self.pending.get(&token.id) {
            Some(slot) if slot.seq == token.seq => {}
            _ => return None,
        }
        if self.index_of(&token.id).is_some() {
            warn!("Not restoring {}: id {} is already in the portfolio", token.symbol, token.id);
            return None;
        }
        let slot = self.pending.remove(&token.id)?;

        let repriced = self.reprice(std::slice::from_ref(&slot.entry)).await;
        let (entry, stale_price) = match repriced {
            Ok(mut priced) if !priced.is_empty() => (priced.remove(0), false),
            Ok(_) => (slot.entry, true),
            Err(e) => {
                warn!("Restoring {} with stale price data: {e}", slot.entry.symbol);
                (slot.entry, true)
            }
        };

        let symbol = entry.symbol.clone();
        let idx = slot.original_index.min(self.positions.len());
        self.positions.insert(idx, entry);
        self.analytics_service.calculate_allocations(&mut self.positions);

        info!("{symbol} restored to portfolio");
        Some(Notification::Restored { symbol, stale_price })
    }

    /// Open a new position from form input: fetch its price, assign an id
    /// and append it.
    pub async fn open_position(&mut self, draft: PositionDraft) -> Result<Notification, CoreError> {
        draft.validate()?;
        let price = self.current_price(&draft.normalized_symbol()).await?;
        let position = draft
            .into_position(uuid::Uuid::new_v4().to_string())
            .priced(price);
        self.add(position)
    }

    /// Replace an existing position's fields from form input, re-fetching
    /// its price. The id is kept.
    pub async fn amend_position(&mut self, id: &str, draft: PositionDraft) -> Result<Notification, CoreError> {
        draft.validate()?;
        if self.index_of(id).is_none() {
            return Err(CoreError::PositionNotFound(id.to_string()));
        }
        let price = self.current_price(&draft.normalized_symbol()).await?;
        self.update(draft.into_position(id).priced(price))
    }

    // ── Queries ─────────────────────────────────────────────────────

    #[must_use]
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Position> {
        self.positions.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// The pending-restore slot for an id, if any.
    #[must_use]
    pub fn pending_restore(&self, id: &str) -> Option<&PendingRestore<Position>> {
        self.pending.get(id)
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Total value, cost and return of the current list.
    #[must_use]
    pub fn totals(&self) -> PortfolioTotals {
        self.analytics_service.totals(&self.positions)
    }

    /// `(symbol, allocation %)`, largest first.
    #[must_use]
    pub fn allocation_breakdown(&self) -> Vec<(String, f64)> {
        self.analytics_service.allocation_breakdown(&self.positions)
    }

    // ── Internal ────────────────────────────────────────────────────

    fn index_of(&self, id: &str) -> Option<usize> {
        self.positions.iter().position(|p| p.id == id)
    }

    fn insert_checked(&mut self, mut position: Position) -> Result<(), CoreError> {
        position.validate()?;
        if self.index_of(&position.id).is_some() {
            return Err(CoreError::DuplicateId(position.id));
        }
        position.symbol = position.symbol.to_uppercase();
        position.apply_price(position.current_price);
        self.positions.push(position);
        Ok(())
    }

    /// Price a list and compute its allocations.
    async fn price(&self, positions: &[Position]) -> Result<Vec<Position>, CoreError> {
        let mut priced = self.reprice(positions).await?;
        self.analytics_service.calculate_allocations(&mut priced);
        Ok(priced)
    }

    /// Fetch quotes for the list's unique symbols and apply them.
    async fn reprice(&self, positions: &[Position]) -> Result<Vec<Position>, CoreError> {
        let symbols = self.analytics_service.unique_symbols(positions);
        let prices = self.provider.fetch_quotes(&symbols).await?;
        self.analytics_service.apply_prices(positions, &prices, self.provider.name())
    }

    async fn current_price(&self, symbol: &str) -> Result<f64, CoreError> {
        let symbols = [symbol.to_string()];
        let prices = self.provider.fetch_quotes(&symbols).await?;
        prices.get(symbol).copied().ok_or_else(|| CoreError::MarketData {
            provider: self.provider.name().to_string(),
            message: format!("No price returned for {symbol}"),
        })
    }
}

fn refresh_failed() -> Notification {
    Notification::RefreshFailed {
        message: "There was an error fetching current prices. Please try again.".into(),
    }
}
