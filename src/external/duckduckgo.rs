use async_trait::async_trait;
use chrono::DateTime;
use regex::Regex;
use serde::Deserialize;
use tracing::debug;

use crate::external::news_search::{NewsQuery, NewsSearch, RawArticle};
use crate::external::provider::{check_status, ProviderError};

/// DuckDuckGo news search.
///
/// Every search is a two-step exchange: the landing page is fetched to obtain
/// the `vqd` token, which must accompany the `news.js` JSON request.
pub struct DuckDuckGoNews {
    client: reqwest::Client,
    base_url: String,
}

impl DuckDuckGoNews {
    pub fn new(base_url: impl Into<String>, user_agent: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(user_agent)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn fetch_vqd(&self, query: &NewsQuery) -> Result<String, ProviderError> {
        let url = format!("{}/", self.base_url);
        let resp = self
            .client
            .get(&url)
            .query(&[("q", query.keywords.as_str())])
            .timeout(query.timeout)
            .send()
            .await
            .map_err(ProviderError::from_send)?;

        let html = check_status(resp)?
            .text()
            .await
            .map_err(ProviderError::from_body)?;

        extract_vqd(&html)
            .ok_or_else(|| ProviderError::BadResponse("vqd token not found".into()))
    }
}

#[derive(Debug, Deserialize)]
struct NewsResponse {
    #[serde(default)]
    results: Vec<NewsResult>,
}

#[derive(Debug, Deserialize)]
struct NewsResult {
    title: Option<String>,
    url: Option<String>,
    source: Option<String>,
    date: Option<serde_json::Value>,
}

fn extract_vqd(html: &str) -> Option<String> {
    let re = Regex::new(r#"vqd=["']?([0-9][0-9-]*)"#).ok()?;
    re.captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Strip markup and decode the handful of entities the endpoint emits.
fn clean_text(text: &str) -> String {
    let stripped = match Regex::new(r"<[^>]+>") {
        Ok(tag_re) => tag_re.replace_all(text, "").into_owned(),
        Err(_) => text.to_string(),
    };
    stripped
        .replace("&#x27;", "'")
        .replace("&#39;", "'")
        .replace("&quot;", "\"")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
        .trim()
        .to_string()
}

/// Dates arrive as unix seconds; render them as RFC 3339.
fn format_date(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Number(n) => n
            .as_i64()
            .and_then(|ts| DateTime::from_timestamp(ts, 0))
            .map(|dt| dt.to_rfc3339()),
        serde_json::Value::String(s) => Some(s),
        _ => None,
    }
}

#[async_trait]
impl NewsSearch for DuckDuckGoNews {
    async fn search(&self, query: &NewsQuery) -> Result<Vec<RawArticle>, ProviderError> {
        let vqd = self.fetch_vqd(query).await?;
        let url = format!("{}/news.js", self.base_url);

        let resp = self
            .client
            .get(&url)
            .query(&[
                ("l", query.region.as_str()),
                ("o", "json"),
                ("noamp", "1"),
                ("q", query.keywords.as_str()),
                ("vqd", vqd.as_str()),
                ("p", query.safesearch.as_param()),
                ("s", "0"),
            ])
            .timeout(query.timeout)
            .send()
            .await
            .map_err(ProviderError::from_send)?;

        let body: NewsResponse = check_status(resp)?
            .json()
            .await
            .map_err(ProviderError::from_body)?;

        let mut seen_urls = std::collections::HashSet::new();
        let articles: Vec<RawArticle> = body
            .results
            .into_iter()
            .filter(|item| match &item.url {
                Some(url) => seen_urls.insert(url.clone()),
                None => true,
            })
            .take(query.max_results)
            .map(|item| RawArticle {
                title: item.title.map(|t| clean_text(&t)),
                url: item.url,
                source: item.source,
                date: item.date.and_then(format_date),
            })
            .collect();

        debug!("News search '{}' returned {} articles", query.keywords, articles.len());
        Ok(articles)
    }
}
