use std::sync::Arc;

use crate::llm_client::ModelBackend;

/// Shared application state injected into all route handlers via Axum extractors.
/// Holds no per-request data; every request is independent.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable model backend. Production: `LlmClient` (OpenAI Responses API).
    pub llm: Arc<dyn ModelBackend>,
}
