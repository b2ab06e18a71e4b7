use anyhow::Context;
use std::sync::Arc;
use ticket_triage::{
    api::{build_router, AppState},
    config::Config,
    inference::ModelRegistry,
    reconcile::ReconciliationPipeline,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::load().context("Failed to load configuration")?;

    // Initialize tracing; RUST_LOG overrides the configured filter
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.observability.log_level));
    let registry = tracing_subscriber::registry().with(env_filter);
    if config.observability.json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!(
        service = %config.observability.service_name,
        "Starting Ticket Triage v{}",
        env!("CARGO_PKG_VERSION")
    );

    // Load models, encoders and rule configuration exactly once; any
    // failure aborts startup, there is no partial-availability mode
    let registry = ModelRegistry::load(&config.models)
        .context("Model startup failed. Re-export the model artifacts and restart the service")?;
    tracing::info!("✅ Models loaded successfully");

    let pipeline = Arc::new(ReconciliationPipeline::new(registry, &config.engine));
    let app_state = AppState::new(pipeline);

    // Build HTTP router
    let app = build_router(app_state);

    // Start HTTP server
    let http_addr = format!("{}:{}", config.server.host, config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .with_context(|| format!("Failed to bind {}", http_addr))?;

    tracing::info!("🚀 HTTP API server listening on http://{}", http_addr);
    tracing::info!("   Health check: http://{}/health", http_addr);
    tracing::info!("   Prediction: http://{}/v1/predict", http_addr);

    let http_handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(http_listener, app).await {
            tracing::error!("HTTP server error: {}", e);
        }
    });

    tokio::select! {
        _ = http_handle => {
            tracing::warn!("HTTP server stopped");
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    tracing::info!("Shutting down gracefully...");
    Ok(())
}
