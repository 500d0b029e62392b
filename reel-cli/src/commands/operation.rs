//! Operation command handlers
//!
//! Inspects a single operation or downloads its video without running the
//! full generation workflow.

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use reel_client::ProxyClient;
use reel_core::domain::operation::{Operation, PollState};
use std::path::PathBuf;

use crate::config::Config;

/// Operation subcommands
#[derive(Subcommand)]
pub enum OperationCommands {
    /// Query the current state of an operation
    Status {
        /// Operation name returned at submission
        name: String,

        /// Print the raw operation as JSON
        #[arg(long)]
        json: bool,
    },
    /// Download the video of a finished operation
    Download {
        /// Retrieval URI from the finished operation
        uri: String,

        /// Where to write the video
        #[arg(short, long, default_value = "video.mp4")]
        output: PathBuf,
    },
}

/// Handle operation commands
pub async fn handle_operation_command(command: OperationCommands, config: &Config) -> Result<()> {
    let client = ProxyClient::new(&config.proxy_url);

    match command {
        OperationCommands::Status { name, json } => show_status(&client, &name, json).await,
        OperationCommands::Download { uri, output } => {
            download(&client, &uri, output).await
        }
    }
}

async fn show_status(client: &ProxyClient, name: &str, json: bool) -> Result<()> {
    let operation = client
        .poll_operation(&Operation::pending(name))
        .await
        .context("Failed to query operation")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&operation)?);
        return Ok(());
    }

    println!("{}", "Operation:".bold());
    println!("  {}: {}", "Name".cyan(), operation.name);
    println!("  {}: {}", "State".cyan(), format_state(operation.state()));

    if let Some(error) = &operation.error {
        println!("  {}: {}", "Error".cyan(), error.to_string().red());
    }
    if let Some(uri) = operation.video_uri() {
        println!("  {}: {}", "Video".cyan(), uri);
    }
    if operation.is_content_filtered() {
        println!("  {}: {}", "Filtered".cyan(), "yes".red());
        for reason in operation.filtered_reasons() {
            println!("    - {}", reason);
        }
    }

    Ok(())
}

async fn download(client: &ProxyClient, uri: &str, output: PathBuf) -> Result<()> {
    let blob = client
        .download_video(uri)
        .await
        .context("Failed to download video")?;

    let url = blob
        .save_to(&output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "{} Saved {} bytes to {}",
        "✓".green(),
        blob.len(),
        url.bold()
    );

    Ok(())
}

fn format_state(state: PollState) -> ColoredString {
    match state {
        PollState::Pending => state.to_string().yellow(),
        PollState::Done => state.to_string().green(),
        PollState::Failed | PollState::TimedOut | PollState::Cancelled => state.to_string().red(),
    }
}
