use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use tracing::info;

use crate::models::{AnalyzeRequest, StockAnalysis};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/analyze", post(analyze_stock))
}

/// POST /analyze
///
/// Resolve the query to a ticker, then combine fundamentals with headline
/// sentiment. Always 200 once the body parses; degraded collaborators show up
/// in the payload instead.
async fn analyze_stock(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Json<StockAnalysis> {
    info!("POST /analyze - Analyzing '{}'", request.symbol);
    Json(state.analysis.analyze(&request.symbol).await)
}
