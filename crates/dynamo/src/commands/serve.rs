//! The `serve` subcommand: run the HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use tracing::info;

use dynamo_core::YtDlpSource;
use dynamo_server::{Server, ServerConfig};

/// Arguments for the serve command.
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, default_value = "127.0.0.1:8080", env = "DYNAMO_BIND")]
    pub bind: SocketAddr,

    /// Disable permissive CORS
    #[arg(long)]
    pub no_cors: bool,

    /// Fail requests when the model returns unparseable JSON instead of
    /// skipping the affected group
    #[arg(long)]
    pub strict: bool,

    #[command(flatten)]
    pub backend: super::BackendArgs,
}

/// Run the server.
pub async fn run(args: ServeArgs) -> Result<()> {
    let backend = args.backend.build()?;
    let source = Arc::new(YtDlpSource::new());

    let config = ServerConfig::new()
        .with_bind_address(args.bind)
        .with_cors(!args.no_cors)
        .with_strict(args.strict);

    info!(bind = %args.bind, strict = args.strict, "Starting Dynamo server");

    let server = Server::new(backend, source, config);
    server.run().await?;

    Ok(())
}
