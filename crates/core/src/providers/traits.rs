use async_trait::async_trait;
use std::collections::HashMap;

use crate::errors::CoreError;

/// Trait abstraction for quote sources.
///
/// The stores only ever need current prices, so this is the one seam
/// between them and market data. `MockMarket` implements it; tests plug in
/// fixed or failing sources.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait QuoteProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Current prices for the given symbols, keyed by uppercase symbol.
    async fn fetch_quotes(&self, symbols: &[String]) -> Result<HashMap<String, f64>, CoreError>;
}
