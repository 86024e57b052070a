use serde::{Deserialize, Serialize};

use crate::models::fundamentals::FundamentalsReport;
use crate::models::news::NewsItem;

/// Body of `POST /analyze`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub symbol: String,
}

/// Coarse classification of the average headline polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Positive,
    Neutral,
    Negative,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Positive => write!(f, "POSITIVE"),
            Verdict::Neutral => write!(f, "NEUTRAL"),
            Verdict::Negative => write!(f, "NEGATIVE"),
        }
    }
}

/// Combined result for one stock query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockAnalysis {
    pub stock: String,
    pub verdict: Verdict,
    pub average_sentiment_score: f64,
    pub fundamentals: FundamentalsReport,
    pub news_analysis: Vec<NewsItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_wire_format() {
        assert_eq!(serde_json::to_string(&Verdict::Positive).unwrap(), "\"POSITIVE\"");
        assert_eq!(serde_json::to_string(&Verdict::Neutral).unwrap(), "\"NEUTRAL\"");
        assert_eq!(serde_json::to_string(&Verdict::Negative).unwrap(), "\"NEGATIVE\"");
        assert_eq!(Verdict::Negative.to_string(), "NEGATIVE");
    }
}
