use serde::{Deserialize, Serialize};

use super::watchlist::WatchlistItem;

/// A directory entry: ticker and company name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Company {
    pub symbol: String,
    pub name: String,
}

impl Company {
    pub fn new(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
        }
    }

    /// Case-insensitive substring match against symbol or name.
    /// `needle` must already be lowercased.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.symbol.to_lowercase().contains(needle) || self.name.to_lowercase().contains(needle)
    }
}

/// One page of company search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    pub results: Vec<Company>,
    pub has_more: bool,
}

/// A synthesized quote for a directory company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDetail {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub pe_ratio: f64,
    pub market_cap: String,
    pub volume: String,
    pub avg_volume: String,
    /// Annual dividend per share, 0 for non-payers
    pub dividend: f64,
    pub dividend_yield: f64,
}

impl CompanyDetail {
    /// Build a watchlist entry from this quote.
    pub fn into_watchlist_item(self, id: impl Into<String>) -> WatchlistItem {
        WatchlistItem::new(
            id,
            self.symbol,
            self.name,
            self.price,
            self.change,
            self.change_percent,
        )
        .with_metrics(
            self.pe_ratio,
            self.market_cap,
            self.volume,
            self.avg_volume,
            self.dividend,
            self.dividend_yield,
        )
    }
}
