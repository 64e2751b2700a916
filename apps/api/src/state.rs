use std::sync::Arc;

use crate::analysis::analyzer::ResumeAnalyzer;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// `None` when the analyzer failed to initialize; analysis requests get 503.
    pub analyzer: Option<Arc<ResumeAnalyzer>>,
}
