use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use todo_server::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    todo_server::telemetry::init();

    let config = ServerConfig::parse();
    let store = config
        .open_store()
        .await
        .context("failed to open todo store")?;

    let addr = config.bind_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, assets = %config.assets_dir.display(), "listening");

    todo_server::run(listener, Arc::new(store), &config.assets_dir)
        .await
        .context("server error")
}
