//! `logs` command

use anyhow::Result;
use colored::*;
use pipelog_client::PipelineClient;
use pipelog_core::domain::log::LogRecord;
use pipelog_core::dto::log::PagedLogResponse;

use crate::tools::logs::{LogsArgs, fetch_page};

/// Fetch one page of logs and print it
pub async fn show_logs(
    client: &PipelineClient,
    pipeline_id: String,
    max_entries: Option<i64>,
    skip_entries: i64,
    json: bool,
) -> Result<()> {
    let args = LogsArgs {
        max_entries,
        skip_entries: Some(skip_entries),
        ..LogsArgs::new(pipeline_id)
    };

    let page = fetch_page(client, &args).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&page)?);
        return Ok(());
    }

    print_page(&args.pipeline_id, &page);
    Ok(())
}

fn print_page(pipeline_id: &str, page: &PagedLogResponse) {
    if page.log_entries.is_empty() {
        println!(
            "{}",
            format!("No log entries for pipeline {}.", pipeline_id).yellow()
        );
    } else {
        println!(
            "{}",
            format!("Logs for pipeline {}:", pipeline_id).bold()
        );
        println!("{}", "─".repeat(80).dimmed());
        for record in &page.log_entries {
            print_log_record(record);
        }
        println!("{}", "─".repeat(80).dimmed());
    }

    if let Some(message) = &page.message {
        if page.has_more {
            println!("{}", message.cyan());
        } else {
            println!("{}", message.yellow());
        }
    }
}

/// Print a log record as `[owner/task] message`
fn print_log_record(record: &LogRecord) {
    let source = match &record.owner {
        Some(owner) => format!("{}/{}", owner, record.task_name),
        None => record.task_name.clone(),
    };
    println!("[{}] {}", source.cyan(), record.message);
}
