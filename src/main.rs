use anyhow::Context;
use tokio::net::TcpListener;

use stockpulse::app;
use stockpulse::config::ServiceConfig;
use stockpulse::logging::{init_logging, LoggingConfig};
use stockpulse::state::{AppState, Collaborators};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging FIRST
    init_logging(LoggingConfig::from_env("stockpulse"))
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))?;

    let config = ServiceConfig::from_env();
    config.validate().context("invalid service configuration")?;

    tracing::info!(
        "📰 News region {} (stock: {} items, general: {} items)",
        config.news.region,
        config.news.stock_max_results,
        config.news.general_max_results
    );

    let state = AppState::new(&config, Collaborators::live(&config));
    let app = app::create_app(state);

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    tracing::info!("🚀 StockPulse AI service running at http://{}/", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
