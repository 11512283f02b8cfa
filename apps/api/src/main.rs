mod config;
mod errors;
mod generation;
mod llm_client;
mod models;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::{AzureOpenAiClient, DisabledRemote, RemoteGenerator};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting RFP Wizard API v{}", env!("CARGO_PKG_VERSION"));

    // Remote generation: Azure OpenAI when configured, local generators only otherwise
    let remote: Arc<dyn RemoteGenerator> = match &config.azure {
        Some(settings) => {
            let client = AzureOpenAiClient::new(settings.clone(), config.remote_timeout)?;
            info!("Remote generation enabled (deployment: {})", client.deployment());
            Arc::new(client)
        }
        None => {
            warn!(
                "AZURE_OPENAI_ENDPOINT / AZURE_OPENAI_API_KEY not set; \
                all documents will come from the local fallback generators"
            );
            Arc::new(DisabledRemote)
        }
    };

    let state = AppState {
        remote,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
