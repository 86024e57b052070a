pub mod analysis_service;
pub mod fundamentals_service;
pub mod news_service;
pub mod sentiment;
pub mod ticker_resolver;

/// Round to two decimal places for presentation.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
