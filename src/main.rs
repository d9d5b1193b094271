//! blog-cms server entry point.
//!
//! Loads configuration, opens (and seeds) the post database, and starts
//! the Axum HTTP server with the JSON API and HTML pages.

use anyhow::Context;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use blog_cms::config::{BlogConfig, LogFormat};
use blog_cms::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = BlogConfig::from_env().context("loading configuration")?;

    // Initialize tracing
    init_tracing(config.log_format);
    tracing::info!(addr = %config.listen_addr, db = %config.database_url, "starting blog-cms");

    // Open storage, create schema, seed
    let state = server::prepare_state(&config)
        .await
        .with_context(|| format!("opening database {}", config.database_url))?;

    // Build router
    let app = server::build_app(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("binding {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    server::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(format: LogFormat) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(env_filter);
    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}
