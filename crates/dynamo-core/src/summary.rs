//! Optional document summarization.
//!
//! Not on the analyze-video request path; exposed as a library capability.
//! Any failure yields `None` so callers never have to handle summarizer
//! errors.

use dynamo_llm::SharedBackend;
use tracing::{error, info};

use crate::error::Result;
use crate::segment::TextSegment;

/// Above this many segments, summarization switches from one stuffed
/// prompt to map-reduce.
const MAP_REDUCE_THRESHOLD: usize = 10;

/// Summarizes transcript segments through the LLM backend.
pub struct Summarizer {
    backend: SharedBackend,
}

impl Summarizer {
    /// Create a summarizer over the given backend.
    pub fn new(backend: SharedBackend) -> Self {
        Self { backend }
    }

    /// Summarize `segments`, or `None` if anything fails.
    pub async fn summarize(&self, segments: &[TextSegment]) -> Option<String> {
        match self.try_summarize(segments).await {
            Ok(summary) => summary,
            Err(e) => {
                error!(error = %e, "Failed to generate document summary");
                None
            }
        }
    }

    async fn try_summarize(&self, segments: &[TextSegment]) -> Result<Option<String>> {
        if segments.is_empty() {
            return Ok(None);
        }

        if segments.len() > MAP_REDUCE_THRESHOLD {
            info!(segments = segments.len(), "Summarizing with map-reduce");
            self.map_reduce(segments).await.map(Some)
        } else {
            info!(segments = segments.len(), "Summarizing with a single prompt");
            self.stuffed(segments).await.map(Some)
        }
    }

    /// One call with the whole transcript in the prompt.
    async fn stuffed(&self, segments: &[TextSegment]) -> Result<String> {
        let text: String = segments
            .iter()
            .map(|s| s.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        let summary = self.backend.complete(&stuff_prompt(&text)).await?;
        Ok(summary.trim().to_string())
    }

    /// Summarize each segment, then combine the partial summaries.
    async fn map_reduce(&self, segments: &[TextSegment]) -> Result<String> {
        let mut partials = Vec::with_capacity(segments.len());
        for segment in segments {
            let partial = self.backend.complete(&stuff_prompt(&segment.content)).await?;
            partials.push(partial.trim().to_string());
        }

        let combined = partials.join("\n");
        let summary = self.backend.complete(&reduce_prompt(&combined)).await?;
        Ok(summary.trim().to_string())
    }
}

fn stuff_prompt(text: &str) -> String {
    format!("Write a concise summary of the following text:\n{text}\nSummary:")
}

fn reduce_prompt(partials: &str) -> String {
    format!(
        "The following are partial summaries of one video transcript:\n{partials}\nCombine them into a single concise summary:"
    )
}
