//! Route definitions for the approval workflow.
//!
//! The decision routes are merged into the `/data-points` group; the queue
//! lives at the top level of `/api/v1`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::approval;
use crate::state::AppState;

/// Data-point-scoped decision routes, merged into `/data-points`.
///
/// ```text
/// POST   /bulk/approve           bulk_approve
/// POST   /bulk/reject            bulk_reject
/// POST   /{id}/review            mark_in_review
/// POST   /{id}/approve           approve_data_point
/// POST   /{id}/reject            reject_data_point
/// POST   /{id}/request-changes   request_changes
/// ```
pub fn data_point_router() -> Router<AppState> {
    Router::new()
        .route("/bulk/approve", post(approval::bulk_approve))
        .route("/bulk/reject", post(approval::bulk_reject))
        .route("/{id}/review", post(approval::mark_in_review))
        .route("/{id}/approve", post(approval::approve_data_point))
        .route("/{id}/reject", post(approval::reject_data_point))
        .route("/{id}/request-changes", post(approval::request_changes))
}

/// Top-level approval queue route.
///
/// ```text
/// GET    /approval-queue         approval_queue
/// ```
pub fn queue_router() -> Router<AppState> {
    Router::new().route("/approval-queue", get(approval::approval_queue))
}
