//! LLM backend abstraction for Dynamo.
//!
//! This crate provides a small, prompt-in/text-out interface for hosted
//! LLM providers. The core abstraction is the [`LlmBackend`] trait; the
//! extraction pipeline only ever hands a prompt string to a backend and
//! gets a completion string back, so any provider can slot in.
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │  LlmBackend trait                    │
//! │  - complete(prompt) -> String        │
//! │  - count_tokens(text) -> u64 (opt.)  │
//! └──────────────────────────────────────┘
//!             │                │
//!             ▼                ▼
//!       ┌──────────┐     ┌─────────┐
//!       │  Gemini  │     │  Mock   │
//!       └──────────┘     └─────────┘
//! ```

pub mod backend;
pub mod error;
pub mod gemini;

pub use backend::{LlmBackend, MockBackend, MockResponse, SharedBackend};
pub use error::{LlmError, Result};
pub use gemini::{GeminiBackend, GeminiConfig};
