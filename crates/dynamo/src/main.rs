//! Dynamo - key-concept extraction from YouTube videos.
//!
//! Main entry point for the Dynamo CLI.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::{analyze, serve};

// ─────────────────────────────────────────────────────────────────────────────
// CLI Structure
// ─────────────────────────────────────────────────────────────────────────────

/// Dynamo - key-concept extraction from YouTube videos
#[derive(Parser)]
#[command(name = "dynamo")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve(serve::ServeArgs),

    /// Analyze a single video and print its key concepts
    Analyze(analyze::AnalyzeArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Main
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing — console (human-readable) + rotating JSON file
    let filter = if cli.verbose {
        "dynamo=debug,dynamo_core=debug,dynamo_llm=debug,dynamo_server=debug,info"
    } else {
        "dynamo=info,dynamo_core=info,dynamo_llm=info,dynamo_server=info,warn"
    };

    let log_dir = dirs::data_local_dir()
        .map(|d| d.join("dynamo").join("logs"))
        .unwrap_or_else(|| std::path::PathBuf::from("logs"));
    let file_appender = tracing_appender::rolling::daily(&log_dir, "dynamo.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    use tracing_subscriber::prelude::*;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_filter(tracing_subscriber::EnvFilter::new(filter)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_filter(tracing_subscriber::EnvFilter::new(
                    "dynamo=debug,dynamo_core=debug,dynamo_llm=debug,dynamo_server=debug,info",
                )),
        )
        .init();

    match cli.command {
        Commands::Serve(args) => serve::run(args).await,
        Commands::Analyze(args) => analyze::run(args, cli.verbose).await,
    }
}
