/// Gateway tests: the gateway router in-process, talking to a real
/// aggregation service (with fake collaborators) on a local port.
mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use serde_json::json;

use stockpulse::config::GatewayConfig;
use stockpulse::gateway::{create_gateway, GatewayState};

use common::*;

fn gateway_for(ai_service_url: String) -> axum::Router {
    create_gateway(GatewayState::new(&GatewayConfig {
        ai_service_url,
        request_timeout: Duration::from_secs(5),
        ..GatewayConfig::default()
    }))
}

#[tokio::test]
async fn test_gateway_root() {
    let (status, body) = send(gateway_for(unreachable_url()), get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("Backend is running!"));
}

#[tokio::test]
async fn test_gateway_requires_symbol() {
    for body in [r#"{}"#, r#"{"symbol": ""}"#, r#"{"symbol": null}"#, "not json"] {
        let (status, payload) =
            send(gateway_for(unreachable_url()), post_json("/api/stock", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {}", body);
        assert_eq!(payload, json!({ "error": "Stock symbol is required" }));
    }
}

#[tokio::test]
async fn test_gateway_proxies_analysis() {
    let upstream = spawn_server(app_with(
        Arc::new(FixedSearch("INFY.NS")),
        Arc::new(FixedMarketData),
        Arc::new(FixedNews(vec!["Infosys beats estimates"])),
    ))
    .await;

    let (status, body) =
        send(gateway_for(upstream), post_json("/api/stock", r#"{"symbol": "infosys"}"#)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stock"], "INFY.NS");
    assert_eq!(body["verdict"], "POSITIVE");
    assert_eq!(body["news_analysis"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_gateway_analysis_upstream_down() {
    let (status, body) = send(
        gateway_for(unreachable_url()),
        post_json("/api/stock", r#"{"symbol": "TCS"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({ "error": "Failed to analyze stock. Ensure AI service is running." })
    );
}

#[tokio::test]
async fn test_gateway_relays_upstream_status() {
    // `/analyze` rejects a numeric symbol during body extraction
    let upstream = spawn_server(failing_app()).await;

    let (status, body) =
        send(gateway_for(upstream), post_json("/api/stock", r#"{"symbol": 42}"#)).await;

    assert!(status.is_client_error());
    assert_eq!(
        body["error"],
        "Failed to analyze stock. Ensure AI service is running."
    );
}

#[tokio::test]
async fn test_gateway_news_proxy() {
    let upstream = spawn_server(app_with(
        Arc::new(FailingSearch),
        Arc::new(FailingMarketData),
        Arc::new(FixedNews(vec!["Markets rally"])),
    ))
    .await;

    let (status, body) = send(gateway_for(upstream), get("/api/news")).await;

    assert_eq!(status, StatusCode::OK);
    let news = body["news"].as_array().unwrap();
    assert_eq!(news.len(), 3);
    assert_eq!(news[0]["headline"], "Markets rally");
}

#[tokio::test]
async fn test_gateway_news_empty_when_upstream_down() {
    let (status, body) = send(gateway_for(unreachable_url()), get("/api/news")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "news": [] }));
}
