//! The `analyze` subcommand: one-shot extraction for a single video.

use std::sync::Arc;

use anyhow::Result;
use clap::Args;

use dynamo_core::{ExtractorOptions, SampleSize, VideoAnalyzer, YtDlpSource};

/// Arguments for the analyze command.
#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// YouTube video URL
    pub url: String,

    /// Desired number of groups (omit to let the service pick)
    #[arg(long)]
    pub sample_size: Option<usize>,

    /// Fail when the model returns unparseable JSON instead of skipping
    /// the affected group
    #[arg(long)]
    pub strict: bool,

    #[command(flatten)]
    pub backend: super::BackendArgs,
}

/// Run a one-shot analysis and print the concepts as JSON.
pub async fn run(args: AnalyzeArgs, verbose: bool) -> Result<()> {
    let backend = args.backend.build()?;
    let source = Arc::new(YtDlpSource::new());

    let analyzer = VideoAnalyzer::new(
        source,
        backend,
        ExtractorOptions {
            strict: args.strict,
            verbose,
        },
    );

    let sample_size = SampleSize::from_request(args.sample_size);
    let concepts = analyzer.analyze(&args.url, sample_size).await?;

    println!("{}", serde_json::to_string_pretty(&concepts)?);

    Ok(())
}
