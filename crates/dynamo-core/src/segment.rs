//! Transcript segment types.

use serde::{Deserialize, Serialize};

/// Metadata attached to every segment of a transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentMetadata {
    /// Channel/uploader name.
    pub author: String,
    /// Video title.
    pub title: String,
    /// Video length in seconds.
    pub length_seconds: u64,
    /// Zero-based position of this segment within the transcript.
    pub position: usize,
}

/// One chunk of transcript text.
///
/// Segments are immutable once produced and form an ordered sequence;
/// grouping relies on that order to keep concatenated group content
/// contiguous in the source video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSegment {
    /// The chunk text.
    pub content: String,
    /// Segment metadata.
    pub metadata: SegmentMetadata,
}

impl TextSegment {
    /// Create a segment with the given content and metadata.
    pub fn new(content: impl Into<String>, metadata: SegmentMetadata) -> Self {
        Self {
            content: content.into(),
            metadata,
        }
    }
}

#[cfg(test)]
pub(crate) fn test_segments(contents: &[&str]) -> Vec<TextSegment> {
    contents
        .iter()
        .enumerate()
        .map(|(position, content)| {
            TextSegment::new(
                *content,
                SegmentMetadata {
                    author: "Test Channel".to_string(),
                    title: "Test Video".to_string(),
                    length_seconds: 600,
                    position,
                },
            )
        })
        .collect()
}
