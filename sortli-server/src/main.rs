//! Server binary classifying waste photos and descriptions over HTTP.

use std::sync::Arc;

use anyhow::Result;
use reqwest::Client;
use sortli_core::ClassificationService;
use sortli_provider_gateway as gateway;
use sortli_server::{AppState, Config, app, init_logging};
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load();
    init_logging(&config.log_filter);

    // HTTP + service setup
    let client = Client::builder()
        .user_agent(concat!("sortli/", env!("CARGO_PKG_VERSION")))
        .build()?;

    let gateway_config = config.gateway();
    if gateway_config.api_key.is_none() {
        warn!("AI_GATEWAY_API_KEY not configured, every classification will fail");
    }
    info!(
        gateway = %gateway_config.base_url,
        image_model = %config.image_model,
        text_model = %config.text_model,
        max_body_bytes = config.max_body_bytes,
        "classification service configured"
    );

    let port = gateway::port(client, gateway_config);
    let service = Arc::new(ClassificationService::new(port, config.model_policy()));
    let router = app(AppState {
        service,
        max_body_bytes: config.max_body_bytes,
    });

    let listener = TcpListener::bind(config.bind).await?;
    info!("listening on http://{}", config.bind);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {err}");
        // keep serving until the process is killed
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
