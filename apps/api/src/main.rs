mod config;
mod errors;
mod knowledge;
mod llm_client;
mod matching;
mod recommendation;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::knowledge::store::KnowledgeHandle;
use crate::llm_client::LlmClient;
use crate::recommendation::advisor::{Advisor, TextGenerator};
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

    info!("Starting orientation API v{}", env!("CARGO_PKG_VERSION"));

    // Knowledge snapshot (writes the example dataset if the file is missing)
    let path = config.knowledge_base_path.clone();
    let knowledge = tokio::task::spawn_blocking(move || KnowledgeHandle::load(path)).await?;
    {
        let snapshot = knowledge.snapshot();
        let report = snapshot.report();
        match &report.load_error {
            Some(error) => warn!("Serving without knowledge data: {error}"),
            None => info!(
                "Knowledge source {} loaded ({} entries dropped)",
                report.source,
                report.diagnostics.len()
            ),
        }
    }

    // Counselling model is optional
    let generator: Option<Arc<dyn TextGenerator>> = match &config.openrouter_api_key {
        Some(key) => {
            let client = LlmClient::new(key.clone(), config.llm_timeout)?;
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Some(Arc::new(client) as Arc<dyn TextGenerator>)
        }
        None => {
            warn!("OPENROUTER_API_KEY not set, advisor will use template analysis only");
            None
        }
    };

    let state = AppState {
        knowledge,
        advisor: Advisor::new(generator),
    };

    let cors = if config.cors_permissive {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
    };

    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
