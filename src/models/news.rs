use serde::{Deserialize, Serialize};

pub const MISSING_TITLE: &str = "No Title";
pub const MISSING_URL: &str = "#";
pub const MISSING_SOURCE: &str = "News";

/// A single headline.
///
/// Per-stock analysis carries a sentiment `score`; the general market feed
/// carries `source` and `date` instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub headline: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// Body of `GET /general-news`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralNewsResponse {
    pub news: Vec<NewsItem>,
}
