use anyhow::Context;
use tokio::net::TcpListener;

use stockpulse::config::GatewayConfig;
use stockpulse::gateway::{create_gateway, GatewayState};
use stockpulse::logging::{init_logging, LoggingConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    init_logging(LoggingConfig::from_env("stockpulse-gateway"))
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))?;

    let config = GatewayConfig::from_env();
    config.validate().context("invalid gateway configuration")?;

    let app = create_gateway(GatewayState::new(&config));

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    tracing::info!(
        "🚀 Gateway running at http://{}/ (AI service: {})",
        config.bind_addr,
        config.ai_service_url
    );
    axum::serve(listener, app).await?;

    Ok(())
}
