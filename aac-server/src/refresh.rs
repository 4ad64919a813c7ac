//! Periodic vocabulary pool refresh
//!
//! Re-reads the pool file on an interval and swaps the structure
//! atomically, so vocabulary edits land without a restart. In-flight
//! requests keep the snapshot they started with.

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::pipeline::PoolStore;

pub fn spawn_pool_refresh(pool: Arc<PoolStore>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        // First tick fires immediately; the pool was just loaded.
        interval.tick().await;
        loop {
            interval.tick().await;
            pool.reload();
        }
    })
}
