//! Core pipeline for Dynamo: YouTube transcript retrieval, batching, and
//! LLM-backed key-concept extraction.
//!
//! The flow for one request:
//!
//! ```text
//! retrieve(url) ──▶ [TextSegment] ──▶ plan_groups ──▶ [Group]
//!                                                        │ per group
//!                                                        ▼
//!                                            prompt ▶ LLM ▶ parse JSON
//!                                                        │
//!                                                        ▼
//!                                    merge_concepts ──▶ [ConceptRecord]
//! ```
//!
//! Everything is sequential: one group at a time, one LLM call in flight.
//! A failing group is skipped, not fatal; only configuration problems (and
//! parse failures in strict mode) abort a request.

pub mod cost;
pub mod error;
pub mod extract;
pub mod grouping;
pub mod merge;
pub mod pipeline;
pub mod segment;
pub mod source;
pub mod split;
pub mod summary;

pub use error::{AnalysisError, Result};
pub use extract::{BatchConcepts, ConceptExtractor, ExtractorOptions};
pub use grouping::{SampleSize, plan_groups};
pub use merge::{ConceptRecord, merge_concepts};
pub use pipeline::VideoAnalyzer;
pub use segment::{SegmentMetadata, TextSegment};
pub use source::{StaticSource, TranscriptSource, YtDlpSource};
pub use summary::Summarizer;
