mod actors;
mod api;
mod app_system;
mod clients;
mod domain;
mod messages;
mod product;
mod store;

#[cfg(test)]
mod mock_framework;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{info, Instrument};

use crate::app_system::{setup_tracing, AppConfig, ProductSystem};
use crate::store::{MemoryProductStore, MongoProductStore, ProductStore};

/// CRUD HTTP service for products.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Listen address; overrides `BIND_ADDR`.
    #[arg(long)]
    bind: Option<SocketAddr>,

    /// Keep products in process memory instead of MongoDB.
    #[arg(long)]
    memory: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_tracing();
    let cli = Cli::parse();

    let mut config = AppConfig::from_env().context("Invalid configuration")?;
    if let Some(bind) = cli.bind {
        config = config.with_bind_addr(bind);
    }

    info!(database = %config.database_name, memory = cli.memory, "Starting product service");

    let store: Arc<dyn ProductStore> = if cli.memory {
        Arc::new(MemoryProductStore::spawn(config.service_buffer))
    } else {
        let span = tracing::info_span!("store_connect");
        let store = MongoProductStore::connect(&config.mongodb_uri, &config.database_name)
            .instrument(span)
            .await
            .context("Failed to connect to MongoDB")?;
        Arc::new(store)
    };

    let system = ProductSystem::new(store, config.service_buffer);
    let app = api::router(system.product_client.clone());

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    system.shutdown().await.context("Failed to close the store")?;

    info!("Product service stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
