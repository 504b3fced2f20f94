//! `donation-indexer`: follows the donation controller's event stream.
//!
//! Two tasks share one SQLite pool. The poller pages through `getEvents`
//! and stores every controller event; the HTTP side answers audit queries
//! (`/events`, `/donations/:id/events`, `/donations/:id/trail`).

mod api;
mod config;
mod db;
mod errors;
mod events;
mod indexer;
mod rpc;
mod trail;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::indexer::IndexerState;

const RPC_TIMEOUT: Duration = Duration::from_secs(30);

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("donation_indexer=info,tower_http=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Before tracing, so a .env file may set RUST_LOG.
    dotenvy::dotenv().ok();
    init_tracing();

    let config = Config::from_env().context("loading configuration")?;
    let pool = db::init_pool(&config.database_url)
        .await
        .context("opening event database")?;

    let client = reqwest::Client::builder().timeout(RPC_TIMEOUT).build()?;
    let api_port = config.api_port;

    tokio::spawn(indexer::run(Arc::new(IndexerState {
        pool: pool.clone(),
        config,
        client,
    })));

    let addr = format!("0.0.0.0:{api_port}");
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(%addr, "audit API listening");

    axum::serve(listener, api::router(pool)).await?;
    Ok(())
}
