//! Application state shared across handlers.

use std::sync::Arc;

use dynamo_core::TranscriptSource;
use dynamo_llm::SharedBackend;

use crate::config::ServerConfig;

/// Application state shared across all handlers.
///
/// Everything here is immutable and Arc'd; concurrent requests share no
/// mutable state, so no locking is needed.
#[derive(Clone)]
pub struct AppState {
    /// The LLM backend.
    pub backend: SharedBackend,

    /// The transcript source.
    pub source: Arc<dyn TranscriptSource>,

    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(
        backend: SharedBackend,
        source: Arc<dyn TranscriptSource>,
        config: ServerConfig,
    ) -> Self {
        Self {
            backend,
            source,
            config: Arc::new(config),
        }
    }
}
