pub mod directory;
pub mod traits;

// Market data implementations
pub mod mock_market;
