//! `pipeline` command

use anyhow::Result;
use colored::*;
use pipelog_client::PipelineClient;
use pipelog_core::domain::pipeline::{Pipeline, PipelineStatus};

use crate::tools::pipeline::fetch_pipeline;

/// Fetch a pipeline and print it
pub async fn show_pipeline(client: &PipelineClient, pipeline_id: &str, json: bool) -> Result<()> {
    let pipeline = fetch_pipeline(client, pipeline_id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&pipeline)?);
    } else {
        print_pipeline_details(&pipeline);
    }

    Ok(())
}

/// Print detailed pipeline information
fn print_pipeline_details(pipeline: &Pipeline) {
    println!("{}", "Pipeline Details:".bold());
    println!("  ID:          {}", pipeline.id.cyan());
    println!("  Name:        {}", pipeline.name.bold());
    if let Some(desc) = &pipeline.description {
        println!("  Description: {}", desc);
    }
    println!("  Status:      {}", colorize_status(&pipeline.status));
    if let Some(note) = status_note(&pipeline.status) {
        println!("  {}", note.yellow());
    }

    let timestamps = [
        ("Created:  ", pipeline.created_at),
        ("Started:  ", pipeline.started_at),
        ("Completed:", pipeline.completed_at),
    ];
    for (label, at) in timestamps {
        if let Some(at) = at {
            println!("  {}   {}", label, at.format("%Y-%m-%d %H:%M:%S"));
        }
    }

    if !pipeline.tasks.is_empty() {
        println!("\n{}", "Tasks:".bold());
        for task in &pipeline.tasks {
            println!("  {} {} {}", "▸".cyan(), task.name, colorize_status(&task.status));
        }
    }
}

/// Hint shown while a pipeline can still produce logs
fn status_note(status: &PipelineStatus) -> Option<&'static str> {
    status
        .is_active()
        .then_some("Pipeline is still running; more logs may arrive.")
}

/// Colorize pipeline status for display
fn colorize_status(status: &PipelineStatus) -> colored::ColoredString {
    let status_str = format!("{:?}", status);
    match status {
        PipelineStatus::Queued => status_str.yellow(),
        PipelineStatus::Running => status_str.cyan(),
        PipelineStatus::Succeeded => status_str.green(),
        PipelineStatus::Failed => status_str.red(),
        PipelineStatus::Cancelled | PipelineStatus::Unknown => status_str.dimmed(),
    }
}
