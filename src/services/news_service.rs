use std::sync::Arc;

use tracing::{error, info, instrument};

use crate::config::NewsConfig;
use crate::external::news_search::{NewsQuery, NewsSearch, RawArticle};
use crate::models::{NewsItem, MISSING_SOURCE, MISSING_TITLE, MISSING_URL};
use crate::services::round2;
use crate::services::sentiment::SentimentScorer;

/// A per-stock headline together with its unrounded polarity.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredArticle {
    pub item: NewsItem,
    pub polarity: f64,
}

/// Fetches headlines and, for per-stock analysis, scores their sentiment.
pub struct NewsService {
    provider: Arc<dyn NewsSearch>,
    scorer: Arc<dyn SentimentScorer>,
    config: NewsConfig,
}

impl NewsService {
    pub fn new(
        provider: Arc<dyn NewsSearch>,
        scorer: Arc<dyn SentimentScorer>,
        config: NewsConfig,
    ) -> Self {
        Self {
            provider,
            scorer,
            config,
        }
    }

    fn query(&self, keywords: String, max_results: usize) -> NewsQuery {
        NewsQuery {
            keywords,
            region: self.config.region.clone(),
            safesearch: self.config.safesearch,
            max_results,
            timeout: self.config.timeout,
        }
    }

    /// Headlines for `symbol` with sentiment. Empty on any provider failure.
    #[instrument(skip(self))]
    pub async fn fetch_stock_news(&self, symbol: &str) -> Vec<ScoredArticle> {
        let query = self.query(
            format!("{} stock news", symbol),
            self.config.stock_max_results,
        );

        let articles = match self.provider.search(&query).await {
            Ok(articles) => articles,
            Err(e) => {
                error!("Error fetching news for {}: {}", symbol, e);
                return Vec::new();
            }
        };

        let scored: Vec<ScoredArticle> = articles
            .into_iter()
            .take(query.max_results)
            .map(|article| {
                let headline = article.title.unwrap_or_else(|| MISSING_TITLE.to_string());
                let polarity = self.scorer.polarity(&headline).clamp(-1.0, 1.0);
                ScoredArticle {
                    item: NewsItem {
                        headline,
                        score: Some(round2(polarity)),
                        url: article.url.unwrap_or_else(|| MISSING_URL.to_string()),
                        source: None,
                        date: None,
                    },
                    polarity,
                }
            })
            .collect();

        info!("Scored {} headlines for {}", scored.len(), symbol);
        scored
    }

    /// Broad market headlines, unscored. Empty on any provider failure.
    #[instrument(skip(self))]
    pub async fn fetch_general_news(&self) -> Vec<NewsItem> {
        info!("Fetching general market news...");
        let query = self.query(
            self.config.general_query.clone(),
            self.config.general_max_results,
        );

        match self.provider.search(&query).await {
            Ok(articles) => articles
                .into_iter()
                .take(query.max_results)
                .map(feed_item)
                .collect(),
            Err(e) => {
                error!("Error fetching general news: {}", e);
                Vec::new()
            }
        }
    }
}

fn feed_item(article: RawArticle) -> NewsItem {
    NewsItem {
        headline: article.title.unwrap_or_else(|| MISSING_TITLE.to_string()),
        score: None,
        url: article.url.unwrap_or_else(|| MISSING_URL.to_string()),
        source: Some(article.source.unwrap_or_else(|| MISSING_SOURCE.to_string())),
        date: Some(article.date.unwrap_or_default()),
    }
}
