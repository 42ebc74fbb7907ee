use log::{info, warn};
use std::collections::HashMap;

use crate::errors::CoreError;
use crate::models::notification::{Notification, PendingRestore, StoreKind, UndoToken};
use crate::models::watchlist::WatchlistItem;

/// Starting watchlist loaded by [`WatchlistStore::initialize`].
pub fn seed_items() -> Vec<WatchlistItem> {
    vec![
        seed("1", "NVDA", "NVIDIA Corporation", 487.21, 12.34, 2.6)
            .with_metrics(45.2, "1.2T", "32.5M", "45.2M", 0.16, 0.03),
        seed("2", "AMD", "Advanced Micro Devices", 176.52, -3.21, -1.78)
            .with_metrics(38.7, "285.3B", "45.8M", "62.3M", 0.0, 0.0),
        seed("3", "INTC", "Intel Corporation", 42.87, 0.54, 1.27)
            .with_metrics(22.1, "180.5B", "28.7M", "35.2M", 0.5, 1.17),
        seed("4", "AMZN", "Amazon.com Inc.", 147.03, 2.15, 1.48)
            .with_metrics(75.4, "1.5T", "35.2M", "42.8M", 0.0, 0.0),
        seed("5", "TSLA", "Tesla Inc.", 234.3, -5.67, -2.36)
            .with_metrics(84.2, "743.8B", "92.5M", "105.7M", 0.0, 0.0),
    ]
}

fn seed(id: &str, symbol: &str, name: &str, price: f64, change: f64, change_percent: f64) -> WatchlistItem {
    WatchlistItem::new(id, symbol, name, price, change, change_percent)
}

/// Owns the watchlist. No derived fields, no price fetching: items keep
/// the quote they were added with.
///
/// Removal and undo follow the same pending-restore rules as the
/// portfolio store, with an independent set of slots.
#[derive(Debug, Default)]
pub struct WatchlistStore {
    items: Vec<WatchlistItem>,
    pending: HashMap<String, PendingRestore<WatchlistItem>>,
    initialized: bool,
    next_seq: u64,
}

impl WatchlistStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the seed items. Runs once per store.
    pub fn initialize(&mut self) {
        if self.initialized {
            return;
        }
        self.items = seed_items();
        self.initialized = true;
    }

    /// Append an item. Ids must be unique.
    pub fn add(&mut self, mut item: WatchlistItem) -> Result<Notification, CoreError> {
        item.validate()?;
        if self.index_of(&item.id).is_some() {
            return Err(CoreError::DuplicateId(item.id));
        }
        item.symbol = item.symbol.trim().to_uppercase();
        let notification = Notification::Added {
            symbol: item.symbol.clone(),
            shares: None,
            price: item.price,
        };
        self.items.push(item);
        info!("{notification}");
        Ok(notification)
    }

    /// Replace the item with the same id.
    pub fn update(&mut self, mut item: WatchlistItem) -> Result<Notification, CoreError> {
        item.validate()?;
        let idx = self
            .index_of(&item.id)
            .ok_or_else(|| CoreError::WatchlistItemNotFound(item.id.clone()))?;
        item.symbol = item.symbol.trim().to_uppercase();
        let notification = Notification::Updated {
            symbol: item.symbol.clone(),
            shares: None,
            price: item.price,
        };
        self.items[idx] = item;
        info!("{notification}");
        Ok(notification)
    }

    /// Remove an item, keeping it restorable. `None` if the id is absent.
    pub fn remove(&mut self, id: &str) -> Option<Notification> {
        let idx = self.index_of(id)?;
        let removed = self.items.remove(idx);

        self.next_seq += 1;
        let undo = UndoToken {
            store: StoreKind::Watchlist,
            id: removed.id.clone(),
            symbol: removed.symbol.clone(),
            seq: self.next_seq,
        };
        let detail = format!("Current price: ${:.2}", removed.price);
        let symbol = removed.symbol.clone();

        self.pending.insert(
            removed.id.clone(),
            PendingRestore {
                entry: removed,
                original_index: idx,
                seq: self.next_seq,
            },
        );

        info!("{symbol} removed from watchlist");
        Some(Notification::Removed { symbol, detail, undo })
    }

    /// Reinsert a removed item at its old index (clamped to the current
    /// length) and clear its slot. `None` if the token is stale or the id
    /// is back in the list.
    pub fn restore(&mut self, token: &UndoToken) -> Option<Notification> {
        if token.store != StoreKind::Watchlist {
            return None;
        }
        match self.pending.get(&token.id) {
            Some(slot) if slot.seq == token.seq => {}
            _ => return None,
        }
        if self.index_of(&token.id).is_some() {
            warn!("Not restoring {}: id {} is already in the watchlist", token.symbol, token.id);
            return None;
        }
        let slot = self.pending.remove(&token.id)?;

        let symbol = slot.entry.symbol.clone();
        let idx = slot.original_index.min(self.items.len());
        self.items.insert(idx, slot.entry);

        info!("{symbol} restored to watchlist");
        Some(Notification::Restored {
            symbol,
            stale_price: false,
        })
    }

    // ── Queries ─────────────────────────────────────────────────────

    #[must_use]
    pub fn items(&self) -> &[WatchlistItem] {
        &self.items
    }

    /// The first `n` items, as shown on the dashboard card.
    #[must_use]
    pub fn preview(&self, n: usize) -> &[WatchlistItem] {
        &self.items[..n.min(self.items.len())]
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&WatchlistItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Case-insensitive symbol lookup.
    #[must_use]
    pub fn contains_symbol(&self, symbol: &str) -> bool {
        let upper = symbol.trim().to_uppercase();
        self.items.iter().any(|i| i.symbol == upper)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    #[must_use]
    pub fn pending_restore(&self, id: &str) -> Option<&PendingRestore<WatchlistItem>> {
        self.pending.get(id)
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|i| i.id == id)
    }
}
