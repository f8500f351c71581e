//! Pipelog MCP server
//!
//! Exposes pipeline build logs to MCP clients over stdio, and the same tools
//! as terminal commands. Stdout carries the protocol, so all diagnostics go
//! to stderr.

mod commands;
mod config;
mod error;
mod protocol;
mod server;
mod tools;
mod transport;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "pipelog-mcp", version)]
#[command(about = "MCP server for pipeline build logs", long_about = None)]
struct Cli {
    /// API key (JWT or console key), forwarded as a bearer token
    #[arg(long, env = "PIPELOG_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,

    /// Service endpoint, overrides --environment (e.g., localhost:8080)
    #[arg(long, env = "PIPELOG_ENDPOINT", global = true)]
    endpoint: Option<String>,

    /// Target environment: live, test or local
    #[arg(long, env = "PIPELOG_ENVIRONMENT", global = true)]
    environment: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pipelog_mcp=info,pipelog_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config::resolve(cli.api_key, cli.endpoint, cli.environment.as_deref())?;

    handle_command(cli.command.unwrap_or(Commands::Serve), &config).await
}
