mod coaching;
mod config;
mod errors;
mod llm_client;
mod models;
mod routes;
mod session;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::coaching::dispatcher::Dispatcher;
use crate::coaching::registry::TemplateRegistry;
use crate::config::Config;
use crate::llm_client::GeminiClient;
use crate::routes::build_router;
use crate::session::SessionStore;
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

    info!("Starting CoachBot API v{}", env!("CARGO_PKG_VERSION"));

    // Compile prompt templates; a bad placeholder stops startup here
    let registry =
        Arc::new(TemplateRegistry::load().context("Prompt templates failed validation")?);
    info!("Loaded {} coaching templates", registry.template_count());

    // Initialize LLM client
    let llm = GeminiClient::new(&config.gemini_api_base).context("Failed to build HTTP client")?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let sessions = SessionStore::default();
    sessions.spawn_idle_sweeper(config.session_idle_ttl, config.session_sweep_interval);
    info!(
        "Idle sessions expire after {}s",
        config.session_idle_ttl.as_secs()
    );

    let state = AppState {
        dispatcher: Dispatcher::new(registry, Arc::new(llm)),
        sessions,
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
