pub mod portfolio_store;
pub mod watchlist_store;
