//! Commands module
//!
//! Defines the CLI subcommands and their handlers. `serve` runs the MCP
//! server; the others run a single tool from the terminal.

mod logs;
mod pipeline;

use anyhow::{Context, Result};
use clap::Subcommand;
use pipelog_client::PipelineClient;

use crate::config::Config;
use crate::server;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Run the MCP server on stdin/stdout (default)
    Serve,
    /// Fetch one page of a pipeline's build logs
    Logs {
        /// Pipeline ID (e.g., pipe-abc123)
        pipeline_id: String,

        /// Maximum number of log entries to return
        #[arg(long)]
        max_entries: Option<i64>,

        /// Number of log entries to skip
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        skip_entries: i64,

        /// Print the raw JSON page
        #[arg(long)]
        json: bool,
    },
    /// Show a pipeline's status and tasks
    Pipeline {
        /// Pipeline ID (e.g., pipe-abc123)
        pipeline_id: String,

        /// Print the raw JSON document
        #[arg(long)]
        json: bool,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Serve => server::run(config).await,
        Commands::Logs {
            pipeline_id,
            max_entries,
            skip_entries,
            json,
        } => {
            let client = connect(config)?;
            logs::show_logs(&client, pipeline_id, max_entries, skip_entries, json).await
        }
        Commands::Pipeline { pipeline_id, json } => {
            let client = connect(config)?;
            pipeline::show_pipeline(&client, &pipeline_id, json).await
        }
    }
}

fn connect(config: &Config) -> Result<PipelineClient> {
    PipelineClient::new(&config.endpoint, config.api_key.as_str())
        .with_context(|| format!("Failed to create client for {}", config.endpoint))
}
