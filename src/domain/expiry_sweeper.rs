//! Optional background eviction of expired links.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{MissedTickBehavior, interval};

use crate::domain::repositories::LinkRepository;

/// Periodically evicts expired links.
///
/// Only reclaims memory: reads apply the expiry rule whether or not a sweep
/// has run yet.
pub async fn run_expiry_sweeper<L: LinkRepository>(repository: Arc<L>, every: Duration) {
    let mut ticker = interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    // first tick completes immediately
    ticker.tick().await;

    loop {
        ticker.tick().await;

        let evicted = repository.purge_expired().await;
        if evicted > 0 {
            tracing::debug!(evicted, "Swept expired links");
        }
    }
}
