//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod generate;
mod operation;

pub use generate::GenerateArgs;
pub use operation::OperationCommands;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Generate a video and save it locally
    Generate(GenerateArgs),
    /// Inspect or download an existing operation
    Operation {
        #[command(subcommand)]
        command: OperationCommands,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Generate(args) => generate::handle_generate(args, config).await,
        Commands::Operation { command } => {
            operation::handle_operation_command(command, config).await
        }
    }
}
