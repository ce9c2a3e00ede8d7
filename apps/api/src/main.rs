mod catalog;
mod config;
mod errors;
mod geo;
mod llm_client;
mod recommend;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::catalog::load_schools;
use crate::config::Config;
use crate::geo::ZipTable;
use crate::llm_client::OpenAiClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting OnRamp v{}", env!("CARGO_PKG_VERSION"));

    // Static datasets are loaded once and shared read-only
    let schools = load_schools(&config.schools_path)?;
    let zip_table = ZipTable::load(&config.zip_table_path).with_context(|| {
        format!(
            "Failed to load postal code table {}",
            config.zip_table_path.display()
        )
    })?;
    if zip_table.is_empty() {
        warn!("Postal code table is empty; every distance will be null");
    }

    // Initialize LLM client
    let llm = OpenAiClient::new(
        config.openai_api_key.clone(),
        config.openai_base_url.clone(),
        Duration::from_secs(config.llm_timeout_secs),
    )
    .context("Failed to build completion client")?;
    info!("LLM client initialized (model: {})", config.model);

    let state = AppState {
        llm: Arc::new(llm),
        geocoder: Arc::new(zip_table),
        schools: Arc::new(schools),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
