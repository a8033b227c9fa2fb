//! Concept extraction: per-group prompting, response cleanup, and JSON
//! parsing.

use dynamo_llm::SharedBackend;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::cost::{billable_characters, estimate_cost};
use crate::error::{AnalysisError, Result};
use crate::segment::TextSegment;

/// Concepts parsed from one group's LLM response, in the response's own
/// key order.
pub type BatchConcepts = Vec<(String, String)>;

/// Tuning knobs for the extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractorOptions {
    /// Abort the whole request when a successful invocation returns
    /// unparseable JSON. Off by default: the group is skipped and the raw
    /// response logged instead.
    pub strict: bool,
    /// Emit per-group character-count and cost-estimate log lines.
    pub verbose: bool,
}

/// Extracts concept/definition pairs from segment groups via an LLM.
pub struct ConceptExtractor {
    backend: SharedBackend,
    options: ExtractorOptions,
}

impl ConceptExtractor {
    /// Create an extractor over the given backend.
    pub fn new(backend: SharedBackend, options: ExtractorOptions) -> Self {
        Self { backend, options }
    }

    /// Run extraction over `groups` in order, one LLM call per group.
    ///
    /// A group is skipped (never fatal) when its concatenated content is
    /// empty, when the invocation fails, or — outside strict mode — when
    /// the response does not parse as a JSON object.
    pub async fn extract(&self, groups: &[&[TextSegment]]) -> Result<Vec<BatchConcepts>> {
        let mut batches: Vec<BatchConcepts> = Vec::new();

        info!(groups = groups.len(), "Finding key concepts");

        for (group_index, group) in groups.iter().enumerate() {
            let content: String = group.iter().map(|s| s.content.as_str()).collect();

            if content.is_empty() {
                warn!(group = group_index, "No content to process for this group");
                continue;
            }

            let prompt = build_prompt(&content);

            let response = match self.backend.complete(&prompt).await {
                Ok(response) => response,
                Err(e) => {
                    error!(group = group_index, error = %e, "Failed to find concepts for group");
                    continue;
                }
            };

            let cleaned = strip_fences(&response);

            match parse_concepts(&cleaned) {
                Ok(concepts) => batches.push(concepts),
                Err(e) => {
                    if self.options.strict {
                        return Err(e);
                    }
                    error!(
                        group = group_index,
                        error = %e,
                        raw = %cleaned,
                        "Unparseable concept response, skipping group"
                    );
                    continue;
                }
            }

            info!(
                group = group_index,
                accumulated = batches.len(),
                "Accumulated batch outputs"
            );

            if self.options.verbose {
                let input_chars = content.chars().count();
                let output_chars = cleaned.chars().count();
                info!(
                    group = group_index,
                    documents = group.len(),
                    input_chars,
                    input_cost = estimate_cost(input_chars),
                    output_chars,
                    output_cost = estimate_cost(output_chars),
                    billable = billable_characters(&content),
                    "Group cost estimate"
                );
            }
        }

        Ok(batches)
    }
}

/// Build the extraction prompt for one group's text.
fn build_prompt(text: &str) -> String {
    format!(
        r#"Find the key concepts and their definitions from the following text:
{text}
Respond only in clean JSON format without any labels or additional text. The output exactly should look like this:
{{"concept1": "definition1", "concept2": "definition2"}}"#
    )
}

/// Strip markdown code-fence markers and surrounding whitespace from a raw
/// model response.
fn strip_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

/// Parse a cleaned response into term/definition pairs, preserving the
/// object's key order.
fn parse_concepts(cleaned: &str) -> Result<BatchConcepts> {
    let value: Value = serde_json::from_str(cleaned).map_err(|e| AnalysisError::Parse {
        reason: e.to_string(),
        raw: cleaned.to_string(),
    })?;

    let Value::Object(map) = value else {
        return Err(AnalysisError::Parse {
            reason: "expected a JSON object of term -> definition".to_string(),
            raw: cleaned.to_string(),
        });
    };

    Ok(map
        .into_iter()
        .map(|(term, definition)| {
            let definition = match definition {
                Value::String(s) => s,
                other => other.to_string(),
            };
            (term, definition)
        })
        .collect())
}
