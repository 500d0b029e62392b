use anyhow::{Context, Result};
use reel_proxy::{api, config::Config, state::AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reel_proxy=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Reel Proxy...");

    let config = Config::from_env();
    config.validate().context("Invalid configuration")?;

    if config.has_api_key() {
        tracing::info!("API key configured");
    } else {
        tracing::warn!(
            "{} is not set; API calls will fail until it is provided",
            reel_proxy::config::API_KEY_VAR
        );
    }
    tracing::debug!("Loaded configuration: {:?}", config);

    let state = AppState::from_config(&config).context("Failed to build provider client")?;
    let app = api::create_router(state, config.body_limit);

    tracing::info!("Listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    axum::serve(listener, app)
        .await
        .context("Failed to start server")?;

    Ok(())
}
