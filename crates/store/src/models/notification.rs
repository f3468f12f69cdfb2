//! Notification entity model and DTOs.

use melboard_core::types::{DbId, Timestamp};
use melboard_core::workflow::Priority;
use serde::{Deserialize, Serialize};

/// An informational record for one user, tied to a platform entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub message: String,
    pub entity_type: String,
    pub entity_id: DbId,
    #[serde(default)]
    pub priority: Priority,
    pub is_read: bool,
    pub read_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for creating a notification.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateNotification {
    pub user_id: DbId,
    pub title: String,
    pub message: String,
    pub entity_type: String,
    pub entity_id: DbId,
    #[serde(default)]
    pub priority: Priority,
}
