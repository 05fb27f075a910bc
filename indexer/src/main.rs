//! Flowgraph Indexer binary.
//!
//! Entry point for the indexer service. Event ingestion from a node is wired
//! in by the transport collaborator; this binary hosts the service lifecycle.

use std::env;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use flowgraph_indexer::config::IndexerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,flowgraph_indexer=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment
    let host_address = env::var("HOST_ADDRESS")
        .unwrap_or_else(|_| "0x0000000000000000000000000000000000000000".to_string());
    let resolver_address = env::var("RESOLVER_ADDRESS")
        .unwrap_or_else(|_| "0x0000000000000000000000000000000000000000".to_string());

    let config = IndexerConfig::new(&host_address, &resolver_address);
    config.validate()?;

    tracing::info!("Starting Flowgraph Indexer");
    tracing::info!("Host address: {}", config.host_address);
    tracing::info!("Resolver address: {}", config.resolver_address);

    tracing::info!("Indexer service started");

    // Keep the process running until shutdown
    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down indexer");

    Ok(())
}
