use std::sync::Arc;

use crate::llm_client::TextGenerator;
use crate::practice::SuggestionCache;
use crate::store::Store;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    /// Default: GeminiClient. Tests swap in a scripted generator.
    pub llm: Arc<dyn TextGenerator>,
    /// Suggestions shown during practice, per (session, question).
    pub suggestions: SuggestionCache,
}
