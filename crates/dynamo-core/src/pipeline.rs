//! The per-request analysis pipeline.

use std::sync::Arc;

use dynamo_llm::SharedBackend;
use tracing::{debug, info};

use crate::cost::billable_characters;
use crate::error::Result;
use crate::extract::{ConceptExtractor, ExtractorOptions};
use crate::grouping::{SampleSize, plan_groups};
use crate::merge::{ConceptRecord, merge_concepts};
use crate::source::TranscriptSource;

/// Runs the full retrieve → group → extract → merge pipeline for one
/// video.
///
/// Each HTTP request gets its own cheap analyzer view over shared,
/// immutable collaborators; there is no state carried between requests
/// and no internal parallelism — groups are processed one at a time.
pub struct VideoAnalyzer {
    source: Arc<dyn TranscriptSource>,
    backend: SharedBackend,
    extractor: ConceptExtractor,
    verbose: bool,
}

impl VideoAnalyzer {
    /// Create an analyzer over a transcript source and an LLM backend.
    pub fn new(
        source: Arc<dyn TranscriptSource>,
        backend: SharedBackend,
        options: ExtractorOptions,
    ) -> Self {
        Self {
            source,
            backend: backend.clone(),
            extractor: ConceptExtractor::new(backend, options),
            verbose: options.verbose,
        }
    }

    /// Analyze one video: returns the merged, deduplicated concept list.
    ///
    /// An unreachable transcript yields an empty list, not an error. Only
    /// grouping configuration problems (and, in strict mode, unparseable
    /// LLM responses) fail the request.
    pub async fn analyze(
        &self,
        video_url: &str,
        sample_size: SampleSize,
    ) -> Result<Vec<ConceptRecord>> {
        let segments = self.source.retrieve(video_url).await;

        if segments.is_empty() {
            info!(url = %video_url, "No documents provided to find key concepts");
            return Ok(Vec::new());
        }

        if self.verbose {
            self.log_usage(&segments).await;
        }

        let groups = plan_groups(&segments, sample_size)?;
        let batches = self.extractor.extract(&groups).await?;

        Ok(merge_concepts(batches))
    }

    /// Log the transcript's billable size, preferring the provider's exact
    /// count. Failure here never affects the request.
    async fn log_usage(&self, segments: &[crate::segment::TextSegment]) {
        let text: String = segments.iter().map(|s| s.content.as_str()).collect();

        match self.backend.count_tokens(&text).await {
            Ok(billable) => info!(billable, "Provider-reported billable characters"),
            Err(e) => {
                debug!(error = %e, "Exact token count unavailable, using approximation");
                info!(
                    billable = billable_characters(&text),
                    "Approximate billable characters"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use dynamo_llm::{MockBackend, MockResponse};

    use super::*;
    use crate::error::AnalysisError;
    use crate::segment::test_segments;
    use crate::source::StaticSource;

    fn analyzer_with(
        contents: &[&str],
        responses: Vec<MockResponse>,
    ) -> (VideoAnalyzer, Arc<MockBackend>) {
        let source = Arc::new(StaticSource::new(test_segments(contents)));
        let backend = Arc::new(MockBackend::new(responses));
        let analyzer = VideoAnalyzer::new(source, backend.clone(), ExtractorOptions::default());
        (analyzer, backend)
    }

    #[tokio::test]
    async fn test_analyze_happy_path() {
        let (analyzer, backend) = analyzer_with(
            &["one", "two"],
            vec![
                MockResponse::text(r#"{"a": "x"}"#),
                MockResponse::text(r#"{"a": "y", "b": "z"}"#),
            ],
        );

        let concepts = analyzer
            .analyze("https://youtu.be/abc", SampleSize::Explicit(2))
            .await
            .unwrap();

        // Last-write-wins on "a" across the two groups.
        assert_eq!(concepts.len(), 2);
        assert_eq!(concepts[0].term, "a");
        assert_eq!(concepts[0].definition, "y");
        assert_eq!(concepts[1].term, "b");
        assert_eq!(backend.request_count(), 2);
    }

    #[tokio::test]
    async fn test_unretrievable_video_yields_empty_concepts() {
        let source = Arc::new(StaticSource::empty());
        let backend = Arc::new(MockBackend::new(vec![]));
        let analyzer = VideoAnalyzer::new(source, backend.clone(), ExtractorOptions::default());

        let concepts = analyzer
            .analyze("https://youtu.be/missing", SampleSize::Default)
            .await
            .unwrap();

        assert!(concepts.is_empty());
        // No LLM calls for an empty transcript.
        assert_eq!(backend.request_count(), 0);
    }

    #[tokio::test]
    async fn test_partial_group_failure_still_returns_other_concepts() {
        let (analyzer, _) = analyzer_with(
            &["one", "two"],
            vec![
                MockResponse::error("provider down"),
                MockResponse::text(r#"{"b": "z"}"#),
            ],
        );

        let concepts = analyzer
            .analyze("https://youtu.be/abc", SampleSize::Explicit(2))
            .await
            .unwrap();

        assert_eq!(concepts.len(), 1);
        assert_eq!(concepts[0].term, "b");
    }

    #[tokio::test]
    async fn test_bad_sample_size_is_fatal() {
        let (analyzer, backend) = analyzer_with(&["only one"], vec![]);

        let err = analyzer
            .analyze("https://youtu.be/abc", SampleSize::Explicit(5))
            .await
            .unwrap_err();

        assert!(matches!(err, AnalysisError::Configuration(_)));
        assert_eq!(backend.request_count(), 0);
    }
}
