mod config;
mod disclosure;
mod errors;
mod llm_client;
mod models;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::disclosure::history::HistoryStore;
use crate::llm_client::{CompletionProvider, LlmClient};
use crate::routes::{build_cors_layer, build_router};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ESG disclosure API v{}", env!("CARGO_PKG_VERSION"));

    // A missing key is not fatal: /health reports it and generation is refused.
    let llm: Option<Arc<dyn CompletionProvider>> = match &config.openai_api_key {
        Some(key) => {
            let client = LlmClient::new(
                key.clone(),
                config.openai_model.clone(),
                config.openai_base_url.clone(),
            )?;
            info!("LLM client initialized (model: {})", client.model());
            Some(Arc::new(client) as Arc<dyn CompletionProvider>)
        }
        None => {
            warn!("OPENAI_API_KEY is not set; disclosure generation is disabled");
            None
        }
    };

    let cors = build_cors_layer(&config.cors_allowed_origins)?;
    info!("CORS origins: {:?}", config.cors_allowed_origins);

    let state = AppState {
        llm,
        config: config.clone(),
        history: HistoryStore::new(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
