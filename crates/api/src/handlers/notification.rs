//! Handlers for user notifications.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use melboard_core::types::DbId;
use melboard_store::repositories::NotificationRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Maximum notifications per page.
const LIST_MAX_LIMIT: usize = 200;
/// Default notifications per page.
const LIST_DEFAULT_LIMIT: usize = 50;

/// Query params for `GET /notifications`.
#[derive(Debug, Default, Deserialize)]
pub struct ListNotificationsQuery {
    /// Return only unread notifications.
    #[serde(default)]
    pub unread_only: bool,
    /// Maximum notifications to return. Defaults to 50, capped at 200.
    pub limit: Option<usize>,
    /// Offset for pagination. Defaults to 0.
    pub offset: Option<usize>,
}

/// GET /api/v1/notifications
///
/// Lists the authenticated user's notifications, newest first.
pub async fn list_notifications(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ListNotificationsQuery>,
) -> AppResult<impl IntoResponse> {
    let limit = params.limit.unwrap_or(LIST_DEFAULT_LIMIT).min(LIST_MAX_LIMIT);
    let offset = params.offset.unwrap_or(0);

    let items = NotificationRepo::list_for_user(
        &state.store,
        auth.user_id,
        params.unread_only,
        limit,
        offset,
    )
    .await;

    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/notifications/unread-count
pub async fn unread_count(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let count = NotificationRepo::unread_count(&state.store, auth.user_id).await;
    Ok(Json(DataResponse {
        data: json!({ "count": count }),
    }))
}

/// POST /api/v1/notifications/{id}/read
///
/// Marks one of the authenticated user's notifications read. Idempotent.
pub async fn mark_read(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let updated = NotificationRepo::mark_read(&state.store, id, auth.user_id).await?;
    Ok(Json(DataResponse {
        data: json!({ "updated": updated }),
    }))
}

/// POST /api/v1/notifications/read-all
///
/// Marks all of the authenticated user's notifications read.
pub async fn mark_all_read(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let updated = NotificationRepo::mark_all_read(&state.store, auth.user_id).await;
    Ok(Json(DataResponse {
        data: json!({ "updated": updated }),
    }))
}
