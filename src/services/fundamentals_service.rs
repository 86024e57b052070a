use std::sync::Arc;

use tracing::{error, info, instrument, warn};

use crate::config::FundamentalsConfig;
use crate::external::market_data::{FullQuote, MarketDataProvider};
use crate::external::provider::ProviderError;
use crate::models::{Fundamentals, FundamentalsReport};

/// Builds the fundamentals block of an analysis from the market-data provider.
pub struct FundamentalsService {
    provider: Arc<dyn MarketDataProvider>,
    config: FundamentalsConfig,
}

impl FundamentalsService {
    pub fn new(provider: Arc<dyn MarketDataProvider>, config: FundamentalsConfig) -> Self {
        Self { provider, config }
    }

    /// Fast path first, then a single slow-path retry. Never fails; total
    /// failure yields [`FundamentalsReport::unavailable`].
    #[instrument(skip(self))]
    pub async fn fetch(&self, symbol: &str) -> FundamentalsReport {
        match self.fetch_fast(symbol).await {
            Ok(fundamentals) => {
                info!("Fetched fundamentals for {} via fast path", symbol);
                return FundamentalsReport::Available(fundamentals);
            }
            Err(e) => {
                warn!("Fast fundamentals path failed for {}: {}. Trying full quote.", symbol, e);
            }
        }

        match self.fetch_slow(symbol).await {
            Ok(fundamentals) => {
                info!("Fetched fundamentals for {} via full quote", symbol);
                FundamentalsReport::Available(fundamentals)
            }
            Err(e) => {
                error!("Error fetching fundamentals for {}: {}", symbol, e);
                FundamentalsReport::unavailable()
            }
        }
    }

    /// Price and market cap from the quick quote; descriptive fields always
    /// come from the full quote.
    async fn fetch_fast(&self, symbol: &str) -> Result<Fundamentals, ProviderError> {
        let fast = self.provider.fast_quote(symbol).await?;
        let last_price = fast
            .last_price
            .ok_or_else(|| ProviderError::NoData(format!("{} last price", symbol)))?;

        let full = self.provider.full_quote(symbol).await?;

        Ok(Fundamentals {
            current_price: Some(last_price),
            market_cap: fast.market_cap.or(full.market_cap),
            ..self.descriptive_fields(full)
        })
    }

    async fn fetch_slow(&self, symbol: &str) -> Result<Fundamentals, ProviderError> {
        let full = self.provider.full_quote(symbol).await?;

        Ok(Fundamentals {
            current_price: full.current_price.or(full.regular_market_price),
            market_cap: full.market_cap,
            ..self.descriptive_fields(full)
        })
    }

    fn descriptive_fields(&self, full: FullQuote) -> Fundamentals {
        Fundamentals {
            current_price: None,
            market_cap: None,
            pe_ratio: full.trailing_pe,
            high_52: full.fifty_two_week_high,
            low_52: full.fifty_two_week_low,
            currency: full
                .currency
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| self.config.default_currency.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::market_data::FastQuote;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct ScriptedProvider {
        fast: Option<FastQuote>,
        full: Vec<Option<FullQuote>>,
        full_calls: AtomicUsize,
    }

    impl ScriptedProvider {
        fn new(fast: Option<FastQuote>, full: Vec<Option<FullQuote>>) -> Arc<Self> {
            Arc::new(Self {
                fast,
                full,
                full_calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl MarketDataProvider for ScriptedProvider {
        async fn fast_quote(&self, symbol: &str) -> Result<FastQuote, ProviderError> {
            self.fast
                .clone()
                .ok_or_else(|| ProviderError::NoData(symbol.to_string()))
        }

        async fn full_quote(&self, symbol: &str) -> Result<FullQuote, ProviderError> {
            let call = self.full_calls.fetch_add(1, Ordering::SeqCst);
            self.full
                .get(call)
                .cloned()
                .flatten()
                .ok_or_else(|| ProviderError::Network(format!("{} unavailable", symbol)))
        }
    }

    fn full_quote() -> FullQuote {
        FullQuote {
            current_price: Some(3510.0),
            regular_market_price: Some(3512.4),
            market_cap: Some(1.27e13),
            trailing_pe: Some(28.1),
            fifty_two_week_high: Some(4592.25),
            fifty_two_week_low: None,
            currency: Some("INR".to_string()),
        }
    }

    #[tokio::test]
    async fn test_fast_path_price_with_full_descriptive_fields() {
        let provider = ScriptedProvider::new(
            Some(FastQuote { last_price: Some(3500.0), market_cap: None }),
            vec![Some(full_quote())],
        );
        let service = FundamentalsService::new(provider.clone(), FundamentalsConfig::default());

        let report = service.fetch("TCS.NS").await;
        assert_eq!(
            report,
            FundamentalsReport::Available(Fundamentals {
                current_price: Some(3500.0),
                market_cap: Some(1.27e13),
                pe_ratio: Some(28.1),
                high_52: Some(4592.25),
                low_52: None,
                currency: "INR".to_string(),
            })
        );
        assert_eq!(provider.full_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_fast_market_cap_wins_over_full() {
        let provider = ScriptedProvider::new(
            Some(FastQuote { last_price: Some(10.0), market_cap: Some(5.0e9) }),
            vec![Some(full_quote())],
        );
        let service = FundamentalsService::new(provider, FundamentalsConfig::default());

        match service.fetch("ABC").await {
            FundamentalsReport::Available(f) => assert_eq!(f.market_cap, Some(5.0e9)),
            other => panic!("unexpected report: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_slow_path_when_fast_unavailable() {
        let provider = ScriptedProvider::new(None, vec![Some(full_quote())]);
        let service = FundamentalsService::new(provider, FundamentalsConfig::default());

        match service.fetch("TCS.NS").await {
            FundamentalsReport::Available(f) => {
                assert_eq!(f.current_price, Some(3510.0));
                assert_eq!(f.market_cap, Some(1.27e13));
            }
            other => panic!("unexpected report: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_slow_path_uses_regular_market_price() {
        let provider = ScriptedProvider::new(
            Some(FastQuote { last_price: None, market_cap: None }),
            vec![Some(FullQuote { current_price: None, currency: None, ..full_quote() })],
        );
        let service = FundamentalsService::new(provider, FundamentalsConfig::default());

        match service.fetch("XYZ").await {
            FundamentalsReport::Available(f) => {
                assert_eq!(f.current_price, Some(3512.4));
                assert_eq!(f.currency, "INR");
            }
            other => panic!("unexpected report: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_full_quote_retried_once_after_fast_path_follow_up_fails() {
        let provider = ScriptedProvider::new(
            Some(FastQuote { last_price: Some(100.0), market_cap: None }),
            vec![None, Some(full_quote())],
        );
        let service = FundamentalsService::new(provider.clone(), FundamentalsConfig::default());

        match service.fetch("TCS.NS").await {
            FundamentalsReport::Available(f) => assert_eq!(f.current_price, Some(3510.0)),
            other => panic!("unexpected report: {:?}", other),
        }
        assert_eq!(provider.full_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_total_failure_returns_error_marker() {
        let provider = ScriptedProvider::new(None, vec![]);
        let service = FundamentalsService::new(provider.clone(), FundamentalsConfig::default());

        assert_eq!(service.fetch("NOPE.NS").await, FundamentalsReport::unavailable());
        assert_eq!(provider.full_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_configured_default_currency() {
        let provider = ScriptedProvider::new(None, vec![Some(FullQuote::default())]);
        let config = FundamentalsConfig {
            default_currency: "USD".to_string(),
            ..FundamentalsConfig::default()
        };
        let service = FundamentalsService::new(provider, config);

        match service.fetch("AAPL").await {
            FundamentalsReport::Available(f) => {
                assert_eq!(f.currency, "USD");
                assert_eq!(f.current_price, None);
            }
            other => panic!("unexpected report: {:?}", other),
        }
    }
}
