use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::TextGenerator;
use crate::render::PageConfig;

/// Shared application state injected into all route handlers via Axum extractors.
/// Read-only after startup; nothing here is mutated per request.
#[derive(Clone)]
pub struct AppState {
    /// Generation provider. `LlmClient` in production, a stub in tests.
    pub generator: Arc<dyn TextGenerator>,
    pub config: Config,
    /// Page geometry for rendered plans: A4, Helvetica 12pt.
    pub page_config: PageConfig,
}
