use std::sync::Arc;

use crate::config::ServiceConfig;
use crate::external::duckduckgo::DuckDuckGoNews;
use crate::external::market_data::MarketDataProvider;
use crate::external::news_search::NewsSearch;
use crate::external::symbol_search::SymbolSearch;
use crate::external::yahoo_quotes::YahooQuoteProvider;
use crate::external::yahoo_search::YahooSymbolSearch;
use crate::services::analysis_service::AnalysisService;
use crate::services::fundamentals_service::FundamentalsService;
use crate::services::news_service::NewsService;
use crate::services::sentiment::{LexiconScorer, SentimentScorer};
use crate::services::ticker_resolver::TickerResolver;

#[derive(Clone)]
pub struct AppState {
    pub analysis: Arc<AnalysisService>,
    pub news: Arc<NewsService>,
}

/// The four external collaborators of the aggregation service.
pub struct Collaborators {
    pub symbol_search: Arc<dyn SymbolSearch>,
    pub market_data: Arc<dyn MarketDataProvider>,
    pub news_search: Arc<dyn NewsSearch>,
    pub scorer: Arc<dyn SentimentScorer>,
}

impl Collaborators {
    /// Production wiring: Yahoo Finance, DuckDuckGo and the lexicon scorer.
    pub fn live(config: &ServiceConfig) -> Self {
        Self {
            symbol_search: Arc::new(YahooSymbolSearch::new(
                config.resolver.base_url.clone(),
                &config.resolver.user_agent,
            )),
            market_data: Arc::new(YahooQuoteProvider::new(&config.fundamentals)),
            news_search: Arc::new(DuckDuckGoNews::new(
                config.news.base_url.clone(),
                &config.news.user_agent,
            )),
            scorer: Arc::new(LexiconScorer::new()),
        }
    }
}

impl AppState {
    pub fn new(config: &ServiceConfig, collaborators: Collaborators) -> Self {
        let news = Arc::new(NewsService::new(
            collaborators.news_search,
            collaborators.scorer,
            config.news.clone(),
        ));
        let analysis = AnalysisService::new(
            TickerResolver::new(collaborators.symbol_search, config.resolver.clone()),
            FundamentalsService::new(collaborators.market_data, config.fundamentals.clone()),
            news.clone(),
        );

        Self {
            analysis: Arc::new(analysis),
            news,
        }
    }
}
