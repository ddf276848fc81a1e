use std::sync::Arc;

use crate::config::Config;
use crate::corpus::JobCorpus;
use crate::llm_client::LlmHandler;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is built once at startup and only read afterwards.
#[derive(Clone)]
pub struct AppState {
    pub llm: Arc<LlmHandler>,
    pub jobs: Arc<JobCorpus>,
    pub config: Config,
}
