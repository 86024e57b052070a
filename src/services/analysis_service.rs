use std::sync::Arc;

use tracing::{info, instrument};

use crate::models::{StockAnalysis, Verdict};
use crate::services::fundamentals_service::FundamentalsService;
use crate::services::news_service::NewsService;
use crate::services::round2;
use crate::services::ticker_resolver::TickerResolver;

/// Averages above this are bullish, below its negation bearish.
pub const VERDICT_THRESHOLD: f64 = 0.05;

/// Mean of the headline polarities, 0 when there are none.
pub fn average_score(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    scores.iter().sum::<f64>() / scores.len() as f64
}

pub fn classify(average: f64) -> Verdict {
    if average > VERDICT_THRESHOLD {
        Verdict::Positive
    } else if average < -VERDICT_THRESHOLD {
        Verdict::Negative
    } else {
        Verdict::Neutral
    }
}

/// Verdict plus the average rounded for display.
pub fn summarize_sentiment(scores: &[f64]) -> (Verdict, f64) {
    let average = average_score(scores);
    (classify(average), round2(average))
}

/// Runs the per-stock pipeline: resolve, fundamentals, news, verdict.
pub struct AnalysisService {
    resolver: TickerResolver,
    fundamentals: FundamentalsService,
    news: Arc<NewsService>,
}

impl AnalysisService {
    pub fn new(
        resolver: TickerResolver,
        fundamentals: FundamentalsService,
        news: Arc<NewsService>,
    ) -> Self {
        Self {
            resolver,
            fundamentals,
            news,
        }
    }

    /// Always produces an analysis; degraded steps show up as fallback
    /// symbols, the fundamentals error marker, or an empty news list.
    #[instrument(skip(self))]
    pub async fn analyze(&self, query: &str) -> StockAnalysis {
        info!("User searched for: {}", query);

        let stock = self.resolver.resolve(query).await;
        info!("Resolved Ticker: {}", stock);

        let fundamentals = self.fundamentals.fetch(&stock).await;
        let scored = self.news.fetch_stock_news(&stock).await;

        let scores: Vec<f64> = scored.iter().map(|s| s.polarity).collect();
        let (verdict, average_sentiment_score) = summarize_sentiment(&scores);

        info!(
            "Analysis for {}: {} (avg {:.2} over {} headlines, fundamentals {})",
            stock,
            verdict,
            average_sentiment_score,
            scores.len(),
            if fundamentals.is_available() { "ok" } else { "unavailable" }
        );

        StockAnalysis {
            stock,
            verdict,
            average_sentiment_score,
            fundamentals,
            news_analysis: scored.into_iter().map(|s| s.item).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_scores_are_neutral() {
        assert_eq!(summarize_sentiment(&[]), (Verdict::Neutral, 0.0));
    }

    #[test]
    fn test_positive_average() {
        let (verdict, average) = summarize_sentiment(&[0.3, 0.4]);
        assert_eq!(verdict, Verdict::Positive);
        assert_eq!(average, 0.35);
    }

    #[test]
    fn test_negative_average() {
        let (verdict, average) = summarize_sentiment(&[-0.2, -0.3]);
        assert_eq!(verdict, Verdict::Negative);
        assert_eq!(average, -0.25);
    }

    #[test]
    fn test_cancelling_scores_are_neutral() {
        let (verdict, average) = summarize_sentiment(&[0.01, -0.01]);
        assert_eq!(verdict, Verdict::Neutral);
        assert_eq!(average, 0.0);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        assert_eq!(classify(0.05), Verdict::Neutral);
        assert_eq!(classify(-0.05), Verdict::Neutral);
        assert_eq!(classify(0.0501), Verdict::Positive);
        assert_eq!(classify(-0.0501), Verdict::Negative);
    }

    #[test]
    fn test_verdict_uses_unrounded_average() {
        // 0.054 rounds to 0.05 for display but is still above the threshold
        let (verdict, average) = summarize_sentiment(&[0.054]);
        assert_eq!(verdict, Verdict::Positive);
        assert_eq!(average, 0.05);
    }
}
