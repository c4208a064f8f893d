//! Periodic Grepolis data refresh and the shared snapshot it maintains.
//
//  One background task replaces the snapshot wholesale each cycle; request
//  handlers load a reference and render from it, so readers never observe a
//  partially merged table and never block the writer.

pub mod fetch;
pub mod table;

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use once_cell::sync::Lazy;
use tokio::time::sleep;

use crate::config::settings;
use crate::metrics;
use fetch::WorldEndpoints;
use table::PlayerTable;

/// Current snapshot; starts empty and is replaced by each successful refresh.
static SNAPSHOT: Lazy<ArcSwap<PlayerTable>> =
    Lazy::new(|| ArcSwap::from_pointee(PlayerTable::empty()));

/// Cheap handle to the current snapshot.
pub fn current() -> Arc<PlayerTable> {
    SNAPSHOT.load_full()
}

/// Swap in a freshly merged table and update the snapshot gauges.
pub fn install(table: PlayerTable) {
    metrics::SNAPSHOT_PLAYERS.set(table.len() as i64);
    if let Some(ts) = table.fetched_at {
        metrics::LAST_REFRESH.set(ts.timestamp());
    }
    SNAPSHOT.store(Arc::new(table));
}

/// One refresh cycle: fetch, merge, swap. On error the previous snapshot
/// stays in place.
pub async fn refresh(client: &reqwest::Client, eps: &WorldEndpoints) -> anyhow::Result<()> {
    let table = fetch::fetch_world(client, eps).await?;
    log::info!("world data refreshed: {} players", table.len());
    install(table);
    Ok(())
}

async fn tick(client: &reqwest::Client, eps: &WorldEndpoints) {
    if let Err(e) = refresh(client, eps).await {
        metrics::REFRESH_FAILURES.inc();
        log::error!("data refresh failed, serving previous snapshot: {e:?}");
    }
}

/// Infinite refresh loop; the first fetch happens immediately.
pub async fn run() {
    let eps = match WorldEndpoints::for_world(&settings().game_world) {
        Ok(eps) => eps,
        Err(e) => {
            log::error!("invalid world configuration, refresh loop not started: {e:?}");
            return;
        }
    };
    let client = match reqwest::Client::builder()
        .timeout(Duration::from_secs(60))
        .build()
    {
        Ok(c) => c,
        Err(e) => {
            log::error!("http client construction failed, refresh loop not started: {e:?}");
            return;
        }
    };

    loop {
        tick(&client, &eps).await;
        sleep(Duration::from_secs(settings().refresh_interval)).await;
    }
}

/// Spawn the refresh loop as a Tokio task.
pub fn start() {
    tokio::spawn(run());
}
