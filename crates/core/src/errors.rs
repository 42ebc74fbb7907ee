use thiserror::Error;

/// Unified error type for the entire stock-dashboard-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Business Logic ──────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Position not found: {0}")]
    PositionNotFound(String),

    #[error("Watchlist item not found: {0}")]
    WatchlistItemNotFound(String),

    #[error("Duplicate id: {0}")]
    DuplicateId(String),

    // ── Market Data ─────────────────────────────────────────────────
    #[error("Market data error ({provider}): {message}")]
    MarketData {
        provider: String,
        message: String,
    },

    // ── Serialization ───────────────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}
