//! Gemini backend implementation.
//!
//! Talks to Google's Gemini models through the OpenAI-compatible
//! chat-completions surface. Two endpoints are supported: the Generative
//! Language API (API-key auth, the default) and Vertex AI (project +
//! location scoped, token auth).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, header};
use serde::{Deserialize, Serialize};

use crate::backend::LlmBackend;
use crate::error::{LlmError, Result};

/// Default Generative Language API base URL (OpenAI-compatible surface).
const DEFAULT_GEMINI_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/openai";

/// Native API base, used for the token-counting endpoint.
const NATIVE_GEMINI_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model.
const DEFAULT_MODEL: &str = "gemini-1.5-pro";

/// Default timeout for requests.
const DEFAULT_TIMEOUT_SECS: u64 = 300;

// ─────────────────────────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Configuration for the Gemini backend.
///
/// Model, project, and location are explicit fields rather than ambient
/// environment state; `from_env` exists only as a convenience that reads
/// the key once and hands it to the constructor.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// Model to use.
    pub model: String,

    /// Google Cloud project (Vertex AI routing only).
    pub project: Option<String>,

    /// Google Cloud location (Vertex AI routing only).
    pub location: Option<String>,

    /// API key (Generative Language API) or access token (Vertex AI).
    pub api_key: Option<String>,

    /// Base URL for the OpenAI-compatible surface.
    pub base_url: String,

    /// Request timeout.
    pub timeout: Duration,

    /// Name for this backend instance.
    pub name: String,
}

impl GeminiConfig {
    /// Create a config for the Generative Language API with an API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            project: None,
            location: None,
            api_key: Some(api_key.into()),
            base_url: DEFAULT_GEMINI_BASE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            name: "gemini".to_string(),
        }
    }

    /// Create a config routed through Vertex AI for a project/location pair.
    ///
    /// `token` is a bearer access token (e.g. from
    /// `gcloud auth print-access-token`).
    pub fn vertex(
        project: impl Into<String>,
        location: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        let project = project.into();
        let location = location.into();
        let base_url = format!(
            "https://{location}-aiplatform.googleapis.com/v1/projects/{project}/locations/{location}/endpoints/openapi"
        );
        Self {
            model: DEFAULT_MODEL.to_string(),
            project: Some(project),
            location: Some(location),
            api_key: Some(token.into()),
            base_url,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            name: "gemini-vertex".to_string(),
        }
    }

    /// Create a config from the `GEMINI_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY").map_err(|_| {
            LlmError::Config("GEMINI_API_KEY environment variable not set".to_string())
        })?;
        Ok(Self::new(api_key))
    }

    /// Set the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set a custom base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the backend name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Gemini Backend
// ─────────────────────────────────────────────────────────────────────────────

/// Gemini backend speaking the OpenAI-compatible wire format.
pub struct GeminiBackend {
    client: Client,
    config: GeminiConfig,
}

impl GeminiBackend {
    /// Create a new backend with the given configuration.
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Create a backend from the `GEMINI_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        Self::new(GeminiConfig::from_env()?)
    }

    /// The active configuration.
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    /// Build the chat completions endpoint URL.
    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    /// Build the native token-counting endpoint URL.
    fn count_tokens_url(&self, api_key: &str) -> String {
        format!(
            "{}/models/{}:countTokens?key={}",
            NATIVE_GEMINI_BASE, self.config.model, api_key
        )
    }

    /// Add authentication headers to a request.
    fn add_headers(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let builder = builder.header(header::CONTENT_TYPE, "application/json");

        if let Some(ref api_key) = self.config.api_key {
            builder.header(header::AUTHORIZATION, format!("Bearer {}", api_key))
        } else {
            builder
        }
    }

    /// Handle a successful completion response.
    async fn handle_response(response: Response) -> Result<String> {
        if !response.status().is_success() {
            return Err(Self::handle_error_response(response).await);
        }

        let body = response.text().await?;
        let parsed: ChatResponse =
            serde_json::from_str(&body).map_err(|e| LlmError::Serialization(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| LlmError::Backend("Response contained no completion text".to_string()))
    }

    /// Handle an error response.
    async fn handle_error_response(response: Response) -> LlmError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if let Ok(error) = serde_json::from_str::<ErrorResponse>(&body) {
            match status.as_u16() {
                401 | 403 => {
                    LlmError::Auth(format!("Authentication failed: {}", error.error.message))
                }
                429 => LlmError::RateLimit(error.error.message),
                500..=599 => LlmError::Backend(format!("Server error: {}", error.error.message)),
                _ => LlmError::Backend(error.error.message),
            }
        } else {
            LlmError::Backend(format!("HTTP {}: {}", status, body))
        }
    }
}

#[async_trait]
impl LlmBackend for GeminiBackend {
    fn name(&self) -> &str {
        &self.config.name
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: 0.3,
        };

        tracing::debug!(
            backend = %self.config.name,
            model = %request.model,
            prompt_chars = prompt.len(),
            "Sending completion request"
        );

        let response = self
            .add_headers(self.client.post(self.completions_url()))
            .json(&request)
            .send()
            .await?;

        Self::handle_response(response).await
    }

    async fn count_tokens(&self, text: &str) -> Result<u64> {
        let api_key = self.config.api_key.as_deref().ok_or_else(|| {
            LlmError::Unsupported("token counting requires an API key".to_string())
        })?;

        let request = CountTokensRequest {
            contents: vec![CountTokensContent {
                parts: vec![CountTokensPart {
                    text: text.to_string(),
                }],
            }],
        };

        let response = self
            .client
            .post(self.count_tokens_url(api_key))
            .header(header::CONTENT_TYPE, "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::handle_error_response(response).await);
        }

        let body = response.text().await?;
        let parsed: CountTokensResponse =
            serde_json::from_str(&body).map_err(|e| LlmError::Serialization(e.to_string()))?;

        Ok(parsed
            .total_billable_characters
            .unwrap_or(parsed.total_tokens))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Wire Types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

#[derive(Debug, Serialize)]
struct CountTokensRequest {
    contents: Vec<CountTokensContent>,
}

#[derive(Debug, Serialize)]
struct CountTokensContent {
    parts: Vec<CountTokensPart>,
}

#[derive(Debug, Serialize)]
struct CountTokensPart {
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CountTokensResponse {
    #[serde(default)]
    total_tokens: u64,
    #[serde(default)]
    total_billable_characters: Option<u64>,
}
