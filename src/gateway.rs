//! Browser-facing gateway.
//!
//! Fronts the aggregation service with the `/api/*` routes the web client
//! calls, validates input, and turns upstream outages into friendly JSON.

use axum::body::Bytes;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use http::StatusCode;
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::config::GatewayConfig;
use crate::errors::AppError;

const SYMBOL_REQUIRED: &str = "Stock symbol is required";
const ANALYZE_FAILED: &str = "Failed to analyze stock. Ensure AI service is running.";

#[derive(Clone)]
pub struct GatewayState {
    client: reqwest::Client,
    ai_service_url: String,
}

impl GatewayState {
    pub fn new(config: &GatewayConfig) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(config.request_timeout)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            ai_service_url: config.ai_service_url.trim_end_matches('/').to_string(),
        }
    }
}

pub fn create_gateway(state: GatewayState) -> Router {
    Router::<GatewayState>::new()
        .route("/", get(root))
        .route("/api/news", get(get_news))
        .route("/api/stock", post(analyze_stock))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn root() -> &'static str {
    "Backend is running!"
}

/// GET /api/news
///
/// Proxies the general news feed; any failure degrades to an empty list.
async fn get_news(State(state): State<GatewayState>) -> Json<Value> {
    info!("GET /api/news - Proxying general news");
    let url = format!("{}/general-news", state.ai_service_url);

    let result: Result<Value, reqwest::Error> = async {
        let resp = state.client.get(&url).send().await?.error_for_status()?;
        resp.json::<Value>().await
    }
    .await;

    match result {
        Ok(body) => Json(body),
        Err(e) => {
            error!("Error fetching general news: {}", e);
            Json(json!({ "news": [] }))
        }
    }
}

/// JavaScript-style truthiness of the submitted symbol.
fn present_symbol(body: &Value) -> Option<&Value> {
    let symbol = body.get("symbol")?;
    let truthy = match symbol {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::Array(_) | Value::Object(_) => true,
    };
    truthy.then_some(symbol)
}

/// POST /api/stock
///
/// Validates the symbol and forwards it to `/analyze`.
async fn analyze_stock(
    State(state): State<GatewayState>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let parsed: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let symbol = present_symbol(&parsed)
        .ok_or_else(|| AppError::Validation(SYMBOL_REQUIRED.to_string()))?;

    info!("POST /api/stock - Analyzing request for: {}", symbol);
    let url = format!("{}/analyze", state.ai_service_url);

    let resp = state
        .client
        .post(&url)
        .json(&json!({ "symbol": symbol }))
        .send()
        .await
        .map_err(|e| {
            error!("Error connecting to AI service: {}", e);
            upstream_error(StatusCode::INTERNAL_SERVER_ERROR)
        })?;

    let status = resp.status();
    if !status.is_success() {
        error!("AI service answered {} for {}", status, symbol);
        return Err(upstream_error(status));
    }

    let analysis = resp.json::<Value>().await.map_err(|e| {
        error!("Unreadable response from AI service: {}", e);
        upstream_error(StatusCode::INTERNAL_SERVER_ERROR)
    })?;

    Ok(Json(analysis))
}

fn upstream_error(status: StatusCode) -> AppError {
    AppError::Upstream {
        status,
        message: ANALYZE_FAILED.to_string(),
    }
}
