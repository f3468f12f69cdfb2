//! Repository for notifications.

use chrono::Utc;
use melboard_core::error::CoreError;
use melboard_core::types::{DbId, Timestamp};

use crate::models::{CreateNotification, Notification};
use crate::store::{next_id, Store};

/// CRUD operations for notifications.
pub struct NotificationRepo;

impl NotificationRepo {
    /// Create a notification for a user.
    pub async fn create(
        store: &Store,
        input: CreateNotification,
    ) -> Result<Notification, CoreError> {
        store.simulate_latency().await;

        let mut notifications = store.notifications.write().await;
        let notification = Notification {
            id: next_id(notifications.iter().map(|n| n.id)),
            user_id: input.user_id,
            title: input.title,
            message: input.message,
            entity_type: input.entity_type,
            entity_id: input.entity_id,
            priority: input.priority,
            is_read: false,
            read_at: None,
            created_at: Utc::now(),
        };
        notifications.push(notification.clone());
        Ok(notification)
    }

    /// List notifications for a user, newest first.
    ///
    /// When `unread_only` is `true`, only unread notifications are returned.
    pub async fn list_for_user(
        store: &Store,
        user_id: DbId,
        unread_only: bool,
        limit: usize,
        offset: usize,
    ) -> Vec<Notification> {
        store.simulate_latency().await;

        let mut items: Vec<Notification> = store
            .notifications
            .read()
            .await
            .iter()
            .filter(|n| n.user_id == user_id)
            .filter(|n| !unread_only || !n.is_read)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        items.into_iter().skip(offset).take(limit).collect()
    }

    /// Number of unread notifications for a user.
    pub async fn unread_count(store: &Store, user_id: DbId) -> usize {
        store.simulate_latency().await;
        store
            .notifications
            .read()
            .await
            .iter()
            .filter(|n| n.user_id == user_id && !n.is_read)
            .count()
    }

    /// Mark a single notification as read.
    ///
    /// Returns `true` if the notification was found for the given user and
    /// was previously unread. Marking an already-read notification is a
    /// no-op, not an error.
    pub async fn mark_read(
        store: &Store,
        notification_id: DbId,
        user_id: DbId,
    ) -> Result<bool, CoreError> {
        store.simulate_latency().await;

        let mut notifications = store.notifications.write().await;
        let notification = notifications
            .iter_mut()
            .find(|n| n.id == notification_id && n.user_id == user_id)
            .ok_or(CoreError::NotFound {
                entity: "Notification",
                id: notification_id,
            })?;

        if notification.is_read {
            return Ok(false);
        }
        notification.is_read = true;
        notification.read_at = Some(Utc::now());
        Ok(true)
    }

    /// Mark all unread notifications as read for a user.
    ///
    /// Returns the number of notifications that were marked read.
    pub async fn mark_all_read(store: &Store, user_id: DbId) -> usize {
        store.simulate_latency().await;

        let now = Utc::now();
        let mut count = 0;
        let mut notifications = store.notifications.write().await;
        for n in notifications
            .iter_mut()
            .filter(|n| n.user_id == user_id && !n.is_read)
        {
            n.is_read = true;
            n.read_at = Some(now);
            count += 1;
        }
        count
    }

    /// Remove read notifications created before `cutoff`.
    ///
    /// Returns the number of notifications removed. Used by the retention
    /// background task.
    pub async fn delete_read_older_than(store: &Store, cutoff: Timestamp) -> usize {
        store.simulate_latency().await;

        let mut notifications = store.notifications.write().await;
        let before = notifications.len();
        notifications.retain(|n| !n.is_read || n.created_at >= cutoff);
        before - notifications.len()
    }
}
