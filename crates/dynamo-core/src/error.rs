//! Error types for the extraction pipeline.

use thiserror::Error;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Error type for the analysis pipeline.
///
/// Only two conditions abort a request: bad grouping parameters, and (in
/// strict mode) unparseable JSON from a successful LLM call. Everything
/// else — retrieval failures, empty inputs, per-group invocation failures —
/// is recovered by producing fewer (or zero) concepts.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Invalid grouping parameters. Fatal, never retried.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Transcript retrieval failed. Internal to the document source; the
    /// source swallows this and returns an empty segment list.
    #[error("Retrieval error: {0}")]
    Retrieval(String),

    /// The LLM returned text that is not the requested JSON object.
    /// Fatal only when strict mode is enabled.
    #[error("Parse error: {reason}")]
    Parse {
        /// Why parsing failed.
        reason: String,
        /// The cleaned response text that failed to parse, for diagnostics.
        raw: String,
    },

    /// Error from the LLM backend.
    #[error(transparent)]
    Llm(#[from] dynamo_llm::LlmError),
}
