use async_trait::async_trait;

use crate::external::provider::ProviderError;

/// Cheap price snapshot from the quick quote endpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FastQuote {
    pub last_price: Option<f64>,
    pub market_cap: Option<f64>,
}

/// Complete quote summary; every metric may be missing for thinly covered tickers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FullQuote {
    pub current_price: Option<f64>,
    pub regular_market_price: Option<f64>,
    pub market_cap: Option<f64>,
    pub trailing_pe: Option<f64>,
    pub fifty_two_week_high: Option<f64>,
    pub fifty_two_week_low: Option<f64>,
    pub currency: Option<String>,
}

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    async fn fast_quote(&self, symbol: &str) -> Result<FastQuote, ProviderError>;

    async fn full_quote(&self, symbol: &str) -> Result<FullQuote, ProviderError>;
}
