use std::sync::Arc;

use crate::config::Config;
use crate::disclosure::history::HistoryStore;
use crate::llm_client::CompletionProvider;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// `None` when no OpenAI key is configured; generation then fails fast.
    pub llm: Option<Arc<dyn CompletionProvider>>,
    pub config: Config,
    /// Process-lifetime generation log, newest first.
    pub history: HistoryStore,
}
