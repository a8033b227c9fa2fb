//! The video analysis endpoint.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use dynamo_core::{ConceptRecord, ExtractorOptions, SampleSize, VideoAnalyzer};

use crate::error::ServerError;
use crate::state::AppState;

// ─────────────────────────────────────────────────────────────────────────────
// Request/Response Types
// ─────────────────────────────────────────────────────────────────────────────

/// Request body for the analysis endpoint.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AnalyzeVideoRequest {
    /// The YouTube video URL to analyze.
    pub youtube_link: String,

    /// Desired number of groups. Absent or zero means "let the service
    /// pick".
    #[serde(default)]
    pub sample_size: Option<usize>,

    /// Emit per-group cost-estimate log lines for this request.
    #[serde(default)]
    pub verbose: Option<bool>,
}

/// One extracted concept on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct KeyConcept {
    /// The concept term.
    pub term: String,
    /// Its definition.
    pub definition: String,
}

impl From<ConceptRecord> for KeyConcept {
    fn from(record: ConceptRecord) -> Self {
        Self {
            term: record.term,
            definition: record.definition,
        }
    }
}

/// Response from the analysis endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AnalyzeVideoResponse {
    /// Extracted concepts, deduplicated by term.
    pub key_concepts: Vec<KeyConcept>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Handler
// ─────────────────────────────────────────────────────────────────────────────

/// POST /analyze_video/ - Extract key concepts from a video's transcript.
#[utoipa::path(
    post,
    path = "/analyze_video/",
    request_body = AnalyzeVideoRequest,
    responses(
        (status = 200, description = "Extracted key concepts", body = AnalyzeVideoResponse),
        (status = 400, description = "Invalid grouping parameters", body = crate::error::ErrorResponse),
        (status = 502, description = "LLM provider failure", body = crate::error::ErrorResponse),
    ),
    tag = "analysis"
)]
pub async fn analyze_video_handler(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeVideoRequest>,
) -> Result<Json<AnalyzeVideoResponse>, ServerError> {
    let options = ExtractorOptions {
        strict: state.config.strict,
        verbose: request.verbose.unwrap_or(state.config.verbose),
    };

    let analyzer = VideoAnalyzer::new(state.source.clone(), state.backend.clone(), options);

    let sample_size = SampleSize::from_request(request.sample_size);

    tracing::info!(
        url = %request.youtube_link,
        ?sample_size,
        "Analyzing video"
    );

    let concepts = analyzer.analyze(&request.youtube_link, sample_size).await?;

    Ok(Json(AnalyzeVideoResponse {
        key_concepts: concepts.into_iter().map(KeyConcept::from).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_deserializes_with_only_link() {
        let request: AnalyzeVideoRequest =
            serde_json::from_str(r#"{"youtube_link": "https://youtu.be/abc"}"#).unwrap();
        assert_eq!(request.youtube_link, "https://youtu.be/abc");
        assert!(request.sample_size.is_none());
        assert!(request.verbose.is_none());
    }

    #[test]
    fn test_response_wire_shape() {
        let response = AnalyzeVideoResponse {
            key_concepts: vec![KeyConcept {
                term: "a".to_string(),
                definition: "x".to_string(),
            }],
        };
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"key_concepts":[{"term":"a","definition":"x"}]}"#);
    }
}
