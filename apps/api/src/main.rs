mod analysis;
mod config;
mod errors;
mod models;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::analyzer::{AnalyzerConfig, ResumeAnalyzer, ScoreWeights};
use crate::analysis::annotator::{Annotator, RuleAnnotator, WordVectors};
use crate::analysis::catalog::Catalogs;
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume scorer v{}", env!("CARGO_PKG_VERSION"));

    let annotator = build_annotator(&config);

    // An analyzer that fails to build leaves the service up; analysis requests get 503.
    let analyzer_config = AnalyzerConfig {
        max_clean_chars: config.max_clean_chars,
        weights: ScoreWeights::default(),
    };
    let analyzer = match ResumeAnalyzer::new(Arc::new(Catalogs::default()), annotator, analyzer_config) {
        Ok(a) => Some(Arc::new(a)),
        Err(e) => {
            error!("Failed to initialize resume analyzer: {e}");
            None
        }
    };

    let state = AppState {
        config: config.clone(),
        analyzer,
    };

    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Builds the rule annotator, attaching word vectors when a table is configured.
/// A vector table that fails to load disables semantic section detection only.
fn build_annotator(config: &Config) -> Option<Arc<dyn Annotator>> {
    if !config.annotator_enabled {
        warn!("Annotator disabled; scoring will use lexical checks only");
        return None;
    }

    let mut annotator = RuleAnnotator::new();
    if let Some(path) = &config.word_vectors_path {
        match WordVectors::load(path) {
            Ok(vectors) => annotator = annotator.with_vectors(Arc::new(vectors)),
            Err(e) => warn!(
                "Could not load word vectors from {}: {e}; semantic section detection disabled",
                path.display()
            ),
        }
    }
    info!("Annotator initialized (similarity: {})", annotator.supports_similarity());
    Some(Arc::new(annotator))
}
