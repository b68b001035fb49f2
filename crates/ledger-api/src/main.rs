//! # ledgerd
//!
//! Starts the provisioning API over an in-memory registry. Ctrl-C stops
//! accepting connections and cancels in-flight batches.

use anyhow::Context;
use clap::Parser;
use ledger_api::config::{init_tracing, Cli};
use ledger_api::state::AppState;
use ledger_registry::MemoryRegistry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    let registry = MemoryRegistry::new(cli.registry_config());
    let state = AppState::with_registry(registry, cli.app_config());
    let shutdown = state.shutdown.clone();
    let app = ledger_api::app(state);

    let listener = tokio::net::TcpListener::bind(cli.listen)
        .await
        .with_context(|| format!("failed to bind {}", cli.listen))?;
    tracing::info!(
        addr = %cli.listen,
        genesis_hash = %cli.genesis_hash,
        max_batch_size = cli.max_batch_size,
        batch_deadline_ms = cli.batch_deadline_ms,
        "ledgerd listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for shutdown signal");
                std::future::pending::<()>().await;
            }
            tracing::info!("shutdown requested");
            shutdown.cancel();
        })
        .await
        .context("server error")?;

    Ok(())
}
