use serde::{Deserialize, Serialize};

/// Which store produced an undo token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StoreKind {
    Portfolio,
    Watchlist,
}

impl std::fmt::Display for StoreKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreKind::Portfolio => write!(f, "portfolio"),
            StoreKind::Watchlist => write!(f, "watchlist"),
        }
    }
}

/// Handle for one pending-restore slot, handed out by `remove`.
///
/// The sequence number ties the token to the exact removal that produced
/// it. If the same id is re-added and removed again, the slot is
/// overwritten and older tokens stop matching.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UndoToken {
    pub store: StoreKind,
    pub id: String,
    pub symbol: String,
    pub seq: u64,
}

/// A removed entry waiting for a possible undo.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRestore<T> {
    pub entry: T,
    /// Index the entry had in the list when it was removed
    pub original_index: usize,
    pub seq: u64,
}

/// Non-fatal, user-facing outcome of a store operation.
///
/// The core never renders these; a frontend shows them as toasts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Notification {
    /// An entry was added
    Added {
        symbol: String,
        shares: Option<f64>,
        price: f64,
    },

    /// An entry was replaced in place
    Updated {
        symbol: String,
        shares: Option<f64>,
        price: f64,
    },

    /// An entry was removed; `undo` restores it
    Removed {
        symbol: String,
        detail: String,
        undo: UndoToken,
    },

    /// A removed entry was put back. `stale_price` is set when the
    /// re-fetch failed and the old snapshot was used.
    Restored { symbol: String, stale_price: bool },

    /// Prices could not be fetched; previous state was kept
    RefreshFailed { message: String },
}

impl Notification {
    /// The undo token carried by a `Removed` notification.
    #[must_use]
    pub fn undo_token(&self) -> Option<&UndoToken> {
        match self {
            Notification::Removed { undo, .. } => Some(undo),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Notification::RefreshFailed { .. })
    }
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notification::Added { symbol, shares: Some(shares), .. } => {
                write!(f, "Added {shares} shares of {symbol}")
            }
            Notification::Added { symbol, shares: None, .. } => write!(f, "Added {symbol}"),
            Notification::Updated { symbol, shares: Some(shares), .. } => {
                write!(f, "Updated {shares} shares of {symbol}")
            }
            Notification::Updated { symbol, shares: None, .. } => write!(f, "Updated {symbol}"),
            Notification::Removed { symbol, undo, .. } => {
                write!(f, "{symbol} removed from {}", undo.store)
            }
            Notification::Restored { symbol, stale_price: false } => write!(f, "{symbol} restored"),
            Notification::Restored { symbol, stale_price: true } => {
                write!(f, "{symbol} restored (price data may be outdated)")
            }
            Notification::RefreshFailed { message } => write!(f, "Failed to refresh: {message}"),
        }
    }
}
