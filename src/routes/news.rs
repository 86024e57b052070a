use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use tracing::info;

use crate::models::GeneralNewsResponse;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/general-news", get(get_general_news))
}

/// GET /general-news
///
/// Broad market headlines. Provider failures produce an empty list, never
/// an error status.
async fn get_general_news(State(state): State<AppState>) -> Json<GeneralNewsResponse> {
    info!("GET /general-news - Fetching general market news");
    let news = state.news.fetch_general_news().await;
    info!("Returning {} general news items", news.len());
    Json(GeneralNewsResponse { news })
}
