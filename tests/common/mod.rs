#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tokio::net::TcpListener;
use tower::ServiceExt;

use stockpulse::config::ServiceConfig;
use stockpulse::external::market_data::{FastQuote, FullQuote, MarketDataProvider};
use stockpulse::external::news_search::{NewsQuery, NewsSearch, RawArticle};
use stockpulse::external::provider::ProviderError;
use stockpulse::external::symbol_search::{SearchParams, SymbolCandidate, SymbolSearch};
use stockpulse::services::sentiment::LexiconScorer;
use stockpulse::state::{AppState, Collaborators};

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn spawn_server(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Base URL of a port nothing listens on.
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, body)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub struct FailingSearch;

#[async_trait]
impl SymbolSearch for FailingSearch {
    async fn search(&self, _: &str, _: &SearchParams) -> Result<Vec<SymbolCandidate>, ProviderError> {
        Err(ProviderError::Timeout)
    }
}

pub struct FixedSearch(pub &'static str);

#[async_trait]
impl SymbolSearch for FixedSearch {
    async fn search(&self, _: &str, _: &SearchParams) -> Result<Vec<SymbolCandidate>, ProviderError> {
        Ok(vec![SymbolCandidate {
            symbol: self.0.to_string(),
            exchange: Some("NSI".to_string()),
            short_name: None,
            quote_type: Some("EQUITY".to_string()),
        }])
    }
}

pub struct FailingMarketData;

#[async_trait]
impl MarketDataProvider for FailingMarketData {
    async fn fast_quote(&self, symbol: &str) -> Result<FastQuote, ProviderError> {
        Err(ProviderError::NoData(symbol.to_string()))
    }

    async fn full_quote(&self, _: &str) -> Result<FullQuote, ProviderError> {
        Err(ProviderError::Network("connection refused".to_string()))
    }
}

pub struct FixedMarketData;

#[async_trait]
impl MarketDataProvider for FixedMarketData {
    async fn fast_quote(&self, _: &str) -> Result<FastQuote, ProviderError> {
        Ok(FastQuote {
            last_price: Some(3500.5),
            market_cap: None,
        })
    }

    async fn full_quote(&self, _: &str) -> Result<FullQuote, ProviderError> {
        Ok(FullQuote {
            current_price: Some(3501.0),
            regular_market_price: Some(3500.5),
            market_cap: Some(1.27e13),
            trailing_pe: Some(28.4),
            fifty_two_week_high: Some(4592.25),
            fifty_two_week_low: Some(3056.05),
            currency: Some("INR".to_string()),
        })
    }
}

pub struct FailingNews;

#[async_trait]
impl NewsSearch for FailingNews {
    async fn search(&self, _: &NewsQuery) -> Result<Vec<RawArticle>, ProviderError> {
        Err(ProviderError::RateLimited)
    }
}

/// Returns `max_results` copies of the given headlines, cycling as needed.
pub struct FixedNews(pub Vec<&'static str>);

#[async_trait]
impl NewsSearch for FixedNews {
    async fn search(&self, query: &NewsQuery) -> Result<Vec<RawArticle>, ProviderError> {
        Ok(self
            .0
            .iter()
            .cycle()
            .take(query.max_results.min(self.0.len() * 3))
            .enumerate()
            .map(|(i, title)| RawArticle {
                title: Some(title.to_string()),
                url: Some(format!("https://news.example/{}", i)),
                source: Some("Economic Times".to_string()),
                date: Some("2024-03-15T10:00:00+00:00".to_string()),
            })
            .collect())
    }
}

pub fn app_with(
    symbol_search: Arc<dyn SymbolSearch>,
    market_data: Arc<dyn MarketDataProvider>,
    news_search: Arc<dyn NewsSearch>,
) -> Router {
    let config = ServiceConfig::default();
    let state = AppState::new(
        &config,
        Collaborators {
            symbol_search,
            market_data,
            news_search,
            scorer: Arc::new(LexiconScorer::new()),
        },
    );
    stockpulse::app::create_app(state)
}

pub fn failing_app() -> Router {
    app_with(
        Arc::new(FailingSearch),
        Arc::new(FailingMarketData),
        Arc::new(FailingNews),
    )
}
