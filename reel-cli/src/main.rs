//! Reel CLI
//!
//! Command-line interface for generating videos through the Reel proxy.

mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use reel_client::PollPolicy;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// One day; anything longer is a typo
const MAX_POLL_INTERVAL_SECS: u64 = 24 * 60 * 60;

#[derive(Parser)]
#[command(name = "reel")]
#[command(about = "Generate videos through the Reel proxy", long_about = None)]
struct Cli {
    /// Proxy URL
    #[arg(long, env = "REEL_PROXY_URL", default_value = "http://localhost:3000")]
    proxy_url: String,

    /// Seconds to wait between status queries
    #[arg(
        long,
        env = "REEL_POLL_INTERVAL_SECS",
        default_value_t = PollPolicy::DEFAULT_INTERVAL.as_secs(),
        value_parser = clap::value_parser!(u64).range(..=MAX_POLL_INTERVAL_SECS)
    )]
    poll_interval: u64,

    /// Status queries before a pending job times out
    #[arg(long, env = "REEL_MAX_POLLS", default_value_t = PollPolicy::DEFAULT_MAX_POLLS)]
    max_polls: u32,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reel_cli=warn,reel_client=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config::new(cli.proxy_url, cli.poll_interval, cli.max_polls);

    handle_command(cli.command, &config).await
}
