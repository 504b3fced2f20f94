//! Background task: poll the RPC, decode controller events, store them.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use sqlx::SqlitePool;
use tracing::{error, info};

use crate::config::Config;
use crate::db;
use crate::errors::Result;
use crate::rpc;

pub struct IndexerState {
    pub pool: SqlitePool,
    pub config: Config,
    pub client: Client,
}

/// Where the next poll starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub ledger: u32,
    pub cursor: Option<String>,
}

impl Position {
    /// Resume from the saved cursor, or from `start_ledger` on a fresh DB.
    pub fn resume(saved_ledger: i64, saved_cursor: Option<String>, start_ledger: u32) -> Self {
        let ledger = if saved_ledger > 0 {
            saved_ledger as u32
        } else {
            start_ledger
        };
        Self {
            ledger,
            cursor: saved_cursor,
        }
    }

    /// Never moves backwards, even if the RPC reports an older tip.
    pub fn advance(&self, latest_ledger: Option<u64>, next_cursor: Option<String>) -> Self {
        let ledger = latest_ledger
            .map(|l| (l as u32).max(self.ledger))
            .unwrap_or(self.ledger);
        Self {
            ledger,
            cursor: next_cursor,
        }
    }
}

pub async fn run(state: Arc<IndexerState>) {
    info!(controller = %state.config.controller_id, "indexer starting");

    let (saved_ledger, saved_cursor) = match db::load_cursor(&state.pool).await {
        Ok(saved) => saved,
        Err(e) => {
            error!("failed to load cursor, starting fresh: {e}");
            (0, None)
        }
    };
    let mut position = Position::resume(saved_ledger, saved_cursor, state.config.start_ledger);

    info!(ledger = position.ledger, "resuming");

    loop {
        match poll_once(&state, &position).await {
            Ok(next) => position = next,
            Err(e) => error!("indexer poll error: {e}"),
        }

        tokio::time::sleep(Duration::from_secs(state.config.poll_interval_secs)).await;
    }
}

async fn poll_once(state: &IndexerState, position: &Position) -> Result<Position> {
    let config = &state.config;
    let page = rpc::fetch_events(
        &state.client,
        &config.rpc_url,
        &config.controller_id,
        position.ledger,
        position.cursor.as_deref(),
        config.events_per_page,
    )
    .await?;

    if !page.events.is_empty() {
        let decoded = rpc::decode_events(&page.events, &config.controller_id);
        let inserted = db::insert_events(&state.pool, &decoded).await?;
        info!(
            fetched = page.events.len(),
            stored = inserted,
            "indexed controller events"
        );
    }

    let next = position.advance(page.latest_ledger, page.cursor);
    db::save_cursor(&state.pool, next.ledger as i64, next.cursor.as_deref()).await?;

    Ok(next)
}
