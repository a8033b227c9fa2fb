//! CLI subcommands.

pub mod analyze;
pub mod serve;

use anyhow::{Context, Result};
use clap::Args;

use dynamo_llm::{GeminiBackend, GeminiConfig, SharedBackend};

/// Backend selection flags shared by subcommands.
#[derive(Debug, Args)]
pub struct BackendArgs {
    /// Gemini model to use
    #[arg(long, env = "DYNAMO_MODEL")]
    pub model: Option<String>,

    /// Google Cloud project (routes through Vertex AI)
    #[arg(long, env = "DYNAMO_PROJECT", requires = "location")]
    pub project: Option<String>,

    /// Google Cloud location (routes through Vertex AI)
    #[arg(long, env = "DYNAMO_LOCATION", requires = "project")]
    pub location: Option<String>,
}

impl BackendArgs {
    /// Build the Gemini backend from flags and the `GEMINI_API_KEY`
    /// environment variable.
    pub fn build(&self) -> Result<SharedBackend> {
        let mut config = match (&self.project, &self.location) {
            (Some(project), Some(location)) => {
                let token = std::env::var("GEMINI_API_KEY")
                    .context("GEMINI_API_KEY must hold an access token for Vertex AI")?;
                GeminiConfig::vertex(project, location, token)
            }
            _ => GeminiConfig::from_env().context("failed to configure the Gemini backend")?,
        };

        if let Some(ref model) = self.model {
            config = config.with_model(model);
        }

        let backend = GeminiBackend::new(config).context("failed to build the Gemini backend")?;
        Ok(std::sync::Arc::new(backend))
    }
}
