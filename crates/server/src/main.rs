//! docfetch server entry point.
//!
//! Boots the MCP server on stdio transport. Logging goes to stderr to avoid
//! interfering with the JSON-RPC protocol on stdout.

use std::sync::Arc;

use anyhow::{Context, Result};
use docfetch_client::{ConfigCredentials, DataService, FetchClient, FetchConfig};
use docfetch_core::{AppConfig, CacheDb, CacheStore};
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use tracing_subscriber::EnvFilter;

mod error;
mod handler;
mod tools;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load().context("failed to load configuration")?;

    let db = CacheDb::open(&config.db_path)
        .await
        .with_context(|| format!("failed to open cache at {}", config.db_path.display()))?;

    let http = FetchClient::new(&FetchConfig { user_agent: config.user_agent.clone(), ..Default::default() })?;

    let service = DataService::new(CacheStore::new(Arc::new(db)), Arc::new(http), Arc::new(ConfigCredentials));

    tracing::info!(db_path = %config.db_path.display(), "Starting docfetch server on stdio transport");

    let handler = handler::DocfetchServer::new(service);
    let transport = stdio();
    let server = serve_server(handler, transport).await?;

    server.waiting().await?;

    Ok(())
}
