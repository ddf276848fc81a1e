mod analysis;
mod config;
mod corpus;
mod errors;
mod extract;
mod extraction;
mod llm_client;
mod matching;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::availability::check_llm_availability;
use crate::config::Config;
use crate::corpus::JobCorpus;
use crate::llm_client::LlmHandler;
use crate::routes::build_router;
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

    info!("Starting SkillSnap API v{}", env!("CARGO_PKG_VERSION"));

    // Job corpus is required; refuse to start without it
    let jobs = JobCorpus::load(&config.jobs_path)?;

    // Provider registry: built once, shared read-only
    let llm = LlmHandler::from_config(&config)?;
    let status = check_llm_availability(&llm);
    if status.available {
        info!(
            "LLM providers available: {:?} (preferred: {}, fallback order: {:?}, timeout: {}s)",
            status.provider_info.available_providers,
            llm.preferred(),
            llm.fallback_order().collect::<Vec<_>>(),
            config.llm_timeout_secs
        );
    } else {
        warn!("No LLM provider configured; /api/llm endpoints will return 503");
    }

    let state = AppState {
        llm: Arc::new(llm),
        jobs: Arc::new(jobs),
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
