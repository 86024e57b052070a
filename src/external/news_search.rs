use std::time::Duration;

use async_trait::async_trait;

use crate::config::SafeSearch;
use crate::external::provider::ProviderError;

/// One news-search request, fully described so fakes can assert on it.
#[derive(Debug, Clone, PartialEq)]
pub struct NewsQuery {
    pub keywords: String,
    pub region: String,
    pub safesearch: SafeSearch,
    pub max_results: usize,
    pub timeout: Duration,
}

/// Article as reported by the provider; any field may be missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawArticle {
    pub title: Option<String>,
    pub url: Option<String>,
    pub source: Option<String>,
    pub date: Option<String>,
}

#[async_trait]
pub trait NewsSearch: Send + Sync {
    /// At most `query.max_results` articles, most relevant first.
    async fn search(&self, query: &NewsQuery) -> Result<Vec<RawArticle>, ProviderError>;
}
