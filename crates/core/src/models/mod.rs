pub mod analytics;
pub mod chart;
pub mod company;
pub mod notification;
pub mod position;
pub mod settings;
pub mod watchlist;
