mod api;
mod executor;
mod models;
mod settings;

use mast_model::prelude::BuilderConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rfem_service=debug,mast_model=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting RFEM Mast Model Service");

    let config = settings::load_builder_config(BuilderConfig::default())?;
    tracing::info!(
        "Model '{}', axis convention {:?}, {:?} supports, {} catalog entries",
        config.model_name,
        config.axis_convention,
        config.support_type,
        config.section_catalog.labels.len()
    );

    let executor = executor::RemoteExecutor::from_env()?;
    tracing::info!("Using model gateway: {}", executor.base_url());

    // Verify the gateway is reachable
    if executor.is_available().await {
        tracing::info!("Model gateway found and accessible");
    } else {
        tracing::warn!("Model gateway not reachable at {}", executor.base_url());
        tracing::warn!("Set RFEM_GATEWAY_URL to the correct address");
        tracing::warn!("Service will start but builds will fail until the gateway is available");
    }

    let app = api::create_router(api::AppState::new(executor, config));

    let addr = settings::resolve_bind_addr();
    tracing::info!("Listening on {}", addr);
    tracing::info!("API endpoints:");
    tracing::info!("  GET  /health");
    tracing::info!("  GET  /api/v1/version");
    tracing::info!("  POST /api/v1/validate");
    tracing::info!("  POST /api/v1/plan");
    tracing::info!("  POST /api/v1/build");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
