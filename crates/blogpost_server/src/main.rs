//! Service entry point.
//!
//! # Responsibility
//! - Resolve configuration, start logging, open the store.
//! - Serve the HTTP router until Ctrl-C.

mod config;

use anyhow::{anyhow, Context};
use blogpost_core::db::{open_db, open_db_in_memory};
use blogpost_core::init_logging;
use blogpost_http::{build_router, AppState, ErrorStatusMap};
use clap::Parser;
use config::ServerConfig;
use log::{info, warn};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    init_logging(&config.log_level, config.log_dir.as_deref()).map_err(|err| anyhow!(err))?;

    let opened = if config.uses_in_memory_db() {
        warn!("event=server_start module=server status=warn detail=in_memory_store");
        open_db_in_memory()
    } else {
        open_db(&config.db_location)
    };
    let conn =
        opened.with_context(|| format!("failed to open database `{}`", config.db_location))?;

    let app = build_router(AppState::new(conn, ErrorStatusMap::default()));
    let address = config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind `{address}`"))?;

    info!(
        "event=server_start module=server status=ok address={address} version={}",
        blogpost_core::core_version()
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server terminated with an error")?;
    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("event=server_stop module=server status=warn error={err}");
    }
}
