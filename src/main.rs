mod config;
mod detector;
mod error;
mod gist;
mod platform;
mod reporter;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::gist::GistClient;
use crate::reporter::Reporter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,token_invalidator=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting token invalidator v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env().context("Failed to load configuration")?;
    info!("  Gists API: {}", config.gist.api_url);
    info!("  User agent: {}", config.gist.user_agent);

    let reporter = Arc::new(Reporter::new(GistClient::new(config.gist.clone())));

    platform::discord::run(&config, reporter).await?;

    Ok(())
}
