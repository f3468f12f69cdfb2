//! Periodic cleanup of old read notifications.
//!
//! Spawns a background task that removes read notifications older than the
//! configured retention period. Runs on a fixed interval using
//! `tokio::time::interval`.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use melboard_store::repositories::NotificationRepo;
use melboard_store::Store;
use tokio_util::sync::CancellationToken;

/// How often the cleanup job runs.
const CLEANUP_INTERVAL: Duration = Duration::from_secs(3600); // 1 hour

/// Run the notification retention cleanup loop.
///
/// Removes read notifications created more than `retention_days` ago.
/// Runs until `cancel` is triggered.
pub async fn run(store: Arc<Store>, retention_days: i64, cancel: CancellationToken) {
    tracing::info!(
        retention_days,
        interval_secs = CLEANUP_INTERVAL.as_secs(),
        "Notification retention job started"
    );

    let mut interval = tokio::time::interval(CLEANUP_INTERVAL);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Notification retention job stopping");
                break;
            }
            _ = interval.tick() => {
                let cutoff = Utc::now() - chrono::Duration::days(retention_days);
                let removed = NotificationRepo::delete_read_older_than(&store, cutoff).await;
                if removed > 0 {
                    tracing::info!(removed, "Notification retention: purged old rows");
                } else {
                    tracing::debug!("Notification retention: no rows to purge");
                }
            }
        }
    }
}
