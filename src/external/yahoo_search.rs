use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::external::provider::{check_status, ProviderError};
use crate::external::symbol_search::{SearchParams, SymbolCandidate, SymbolSearch};

/// Yahoo Finance symbol search. No API key required.
pub struct YahooSymbolSearch {
    client: reqwest::Client,
    base_url: String,
}

impl YahooSymbolSearch {
    pub fn new(base_url: impl Into<String>, user_agent: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(user_agent)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct YahooSearchResponse {
    quotes: Option<Vec<SymbolCandidate>>,
}

#[async_trait]
impl SymbolSearch for YahooSymbolSearch {
    async fn search(
        &self,
        query: &str,
        params: &SearchParams,
    ) -> Result<Vec<SymbolCandidate>, ProviderError> {
        let url = format!("{}/v1/finance/search", self.base_url);
        let quotes_count = params.quotes_count.to_string();

        let resp = self
            .client
            .get(&url)
            .query(&[
                ("q", query),
                ("quotesCount", quotes_count.as_str()),
                ("newsCount", "0"),
            ])
            .timeout(params.timeout)
            .send()
            .await
            .map_err(ProviderError::from_send)?;

        let body: YahooSearchResponse = check_status(resp)?
            .json()
            .await
            .map_err(ProviderError::from_body)?;

        let quotes = body.quotes.unwrap_or_default();
        debug!("Symbol search for '{}' returned {} candidates", query, quotes.len());
        Ok(quotes)
    }
}
