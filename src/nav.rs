//! Navigation Watcher: detect single-page navigations and schedule resyncs.
//!
//! The host changes its address synchronously but swaps the corresponding
//! content asynchronously, and exposes no reliable "navigation complete" signal
//! to us — so we sample the address on a bounded tick and insert a settle delay
//! before resynchronizing. Rapid repeated navigations inside the settle window
//! each schedule their own resync; that redundancy is tolerated, not coalesced.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval, sleep};
use tracing::debug;

use crate::engine::SyncEngine;

/// How often the watcher samples the navigation address.
pub const DEFAULT_NAV_POLL_INTERVAL: Duration = Duration::from_millis(1_000);

/// How long a detected navigation settles before the engine re-reads the page,
/// giving the host's own content swap time to complete.
pub const DEFAULT_NAVIGATION_SETTLE: Duration = Duration::from_millis(10_000);

/// Spawn the periodic address sampler. Runs until aborted (the engine owns the
/// handle and aborts it on `stop`).
pub(crate) fn spawn(engine: Arc<SyncEngine>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(engine.config().nav_poll_interval);
        loop {
            ticker.tick().await;

            if !engine.address_changed() {
                continue;
            }

            // Clear the stale transcript right away so the user never reads the
            // previous item's text against the new item.
            engine.binder().clear_for_navigation();

            let settle = engine.config().navigation_settle;
            let engine = Arc::clone(&engine);
            tokio::spawn(async move {
                sleep(settle).await;
                debug!("navigation settled; resynchronizing");
                engine.resync().await;
            });
        }
    })
}
