pub mod analytics_service;
pub mod chart_service;
