//! Handlers for the data point approval workflow.
//!
//! Provides endpoints for claiming, approving, rejecting, and returning
//! submissions, the filterable approval queue, and bulk decisions.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

use melboard_core::queue::{self, QueueFilters, SortField, SortOrder};
use melboard_core::types::DbId;
use melboard_core::workflow::{DataPointStatus, Priority};
use melboard_events::event_types;
use melboard_store::models::{BulkError, BulkOutcome, DataPoint};
use melboard_store::repositories::DataPointRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::data_points::publish_data_point_event;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

/// Body for `POST /data-points/{id}/approve`.
#[derive(Debug, Default, Deserialize)]
pub struct ApproveRequest {
    pub feedback: Option<String>,
}

/// Body for `POST /data-points/{id}/reject`. The reason is mandatory.
#[derive(Debug, Deserialize)]
pub struct RejectRequest {
    pub reason: String,
}

/// Body for `POST /data-points/{id}/request-changes`. Feedback is mandatory.
#[derive(Debug, Deserialize)]
pub struct RequestChangesRequest {
    pub feedback: String,
}

/// Body for bulk approve.
#[derive(Debug, Deserialize)]
pub struct BulkApproveRequest {
    pub ids: Vec<DbId>,
    pub feedback: Option<String>,
}

/// Body for bulk reject. One reason applies to every item.
#[derive(Debug, Deserialize)]
pub struct BulkRejectRequest {
    pub ids: Vec<DbId>,
    pub reason: String,
}

/// Verify the reviewer's country scope covers the data point.
async fn ensure_review_scope(state: &AppState, auth: &AuthUser, id: DbId) -> AppResult<()> {
    let view = DataPointRepo::find_view_by_id(&state.store, id).await?;
    auth.require_country_scope(view.country_id)
}

// ---------------------------------------------------------------------------
// Single decisions
// ---------------------------------------------------------------------------

/// POST /api/v1/data-points/{id}/review
///
/// Claim a submission for review (`submitted` -> `in_review`).
pub async fn mark_in_review(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.require_reviewer()?;
    ensure_review_scope(&state, &auth, id).await?;

    let dp = DataPointRepo::mark_in_review(&state.store, id, auth.user_id).await?;
    publish_data_point_event(&state, event_types::DATA_POINT_IN_REVIEW, &dp, auth.user_id);

    tracing::info!(user_id = auth.user_id, data_point_id = id, "Data point claimed for review");

    Ok(Json(DataResponse { data: dp }))
}

/// POST /api/v1/data-points/{id}/approve
///
/// Approve a pending submission. Irreversible.
pub async fn approve_data_point(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ApproveRequest>,
) -> AppResult<impl IntoResponse> {
    auth.require_reviewer()?;
    ensure_review_scope(&state, &auth, id).await?;

    let dp = DataPointRepo::approve(&state.store, id, auth.user_id, input.feedback.as_deref())
        .await?;
    publish_data_point_event(&state, event_types::DATA_POINT_APPROVED, &dp, auth.user_id);

    tracing::info!(user_id = auth.user_id, data_point_id = id, "Data point approved");

    Ok(Json(DataResponse { data: dp }))
}

/// POST /api/v1/data-points/{id}/reject
///
/// Reject a pending submission with a mandatory reason, returning it to
/// draft.
pub async fn reject_data_point(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<RejectRequest>,
) -> AppResult<impl IntoResponse> {
    auth.require_reviewer()?;
    ensure_review_scope(&state, &auth, id).await?;

    let dp = DataPointRepo::reject(&state.store, id, auth.user_id, &input.reason).await?;
    publish_data_point_event(&state, event_types::DATA_POINT_REJECTED, &dp, auth.user_id);

    tracing::info!(
        user_id = auth.user_id,
        data_point_id = id,
        rejection_count = dp.rejection_count,
        "Data point rejected"
    );

    Ok(Json(DataResponse { data: dp }))
}

/// POST /api/v1/data-points/{id}/request-changes
///
/// Return a pending submission to its submitter with mandatory feedback.
pub async fn request_changes(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<RequestChangesRequest>,
) -> AppResult<impl IntoResponse> {
    auth.require_reviewer()?;
    ensure_review_scope(&state, &auth, id).await?;

    let dp = DataPointRepo::request_changes(&state.store, id, auth.user_id, &input.feedback)
        .await?;
    publish_data_point_event(
        &state,
        event_types::DATA_POINT_CHANGES_REQUESTED,
        &dp,
        auth.user_id,
    );

    tracing::info!(user_id = auth.user_id, data_point_id = id, "Changes requested");

    Ok(Json(DataResponse { data: dp }))
}

// ---------------------------------------------------------------------------
// Approval queue
// ---------------------------------------------------------------------------

/// Query params for `GET /approval-queue`.
#[derive(Debug, Default, Deserialize)]
pub struct ApprovalQueueQuery {
    pub status: Option<DataPointStatus>,
    pub priority: Option<Priority>,
    pub submitted_by: Option<DbId>,
    pub max_age_days: Option<i64>,
    #[serde(default)]
    pub sort_by: SortField,
    #[serde(default)]
    pub order: SortOrder,
}

/// GET /api/v1/approval-queue
///
/// Returns pending submissions (submitted or in review) enriched with
/// related names, filtered and sorted in memory.
pub async fn approval_queue(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ApprovalQueueQuery>,
) -> AppResult<impl IntoResponse> {
    auth.require_reviewer()?;

    let items = DataPointRepo::queue_items(&state.store).await;
    let filters = QueueFilters {
        status: params.status,
        priority: params.priority,
        submitted_by: params.submitted_by,
        max_age_days: params.max_age_days,
    };
    let items = queue::apply(items, &filters, params.sort_by, params.order, Utc::now());

    Ok(Json(DataResponse { data: items }))
}

// ---------------------------------------------------------------------------
// Bulk decisions
// ---------------------------------------------------------------------------

/// Dispatch one decision per id concurrently and aggregate pass/fail.
///
/// Partial failure is reported, never rolled back; `success_count +
/// failure_count` always equals the number of requested ids.
async fn bulk_decide<F, Fut>(ids: Vec<DbId>, decide: F) -> (BulkOutcome, Vec<DataPoint>)
where
    F: Fn(DbId) -> Fut,
    Fut: std::future::Future<Output = Result<DataPoint, AppError>>,
{
    let results = futures::future::join_all(ids.into_iter().map(|id| {
        let fut = decide(id);
        async move { (id, fut.await) }
    }))
    .await;

    let mut outcome = BulkOutcome {
        success_count: 0,
        failure_count: 0,
        errors: Vec::new(),
    };
    let mut decided = Vec::new();
    for (id, result) in results {
        match result {
            Ok(dp) => {
                outcome.success_count += 1;
                decided.push(dp);
            }
            Err(e) => {
                outcome.failure_count += 1;
                outcome.errors.push(BulkError {
                    id,
                    error: e.to_string(),
                });
            }
        }
    }
    (outcome, decided)
}

/// POST /api/v1/data-points/bulk/approve
pub async fn bulk_approve(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<BulkApproveRequest>,
) -> AppResult<impl IntoResponse> {
    auth.require_reviewer()?;

    let total = input.ids.len();
    let feedback = input.feedback;
    let (outcome, decided) = bulk_decide(input.ids, |id| {
        let state = state.clone();
        let auth = auth.clone();
        let feedback = feedback.clone();
        async move {
            ensure_review_scope(&state, &auth, id).await?;
            DataPointRepo::approve(&state.store, id, auth.user_id, feedback.as_deref())
                .await
                .map_err(AppError::from)
        }
    })
    .await;

    for dp in &decided {
        publish_data_point_event(&state, event_types::DATA_POINT_APPROVED, dp, auth.user_id);
    }

    tracing::info!(
        user_id = auth.user_id,
        total,
        approved = outcome.success_count,
        failed = outcome.failure_count,
        "Bulk approve finished"
    );

    Ok(Json(DataResponse { data: outcome }))
}

/// POST /api/v1/data-points/bulk/reject
pub async fn bulk_reject(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<BulkRejectRequest>,
) -> AppResult<impl IntoResponse> {
    auth.require_reviewer()?;

    let total = input.ids.len();
    let reason = input.reason;
    let (outcome, decided) = bulk_decide(input.ids, |id| {
        let state = state.clone();
        let auth = auth.clone();
        let reason = reason.clone();
        async move {
            ensure_review_scope(&state, &auth, id).await?;
            DataPointRepo::reject(&state.store, id, auth.user_id, &reason)
                .await
                .map_err(AppError::from)
        }
    })
    .await;

    for dp in &decided {
        publish_data_point_event(&state, event_types::DATA_POINT_REJECTED, dp, auth.user_id);
    }

    tracing::info!(
        user_id = auth.user_id,
        total,
        rejected = outcome.success_count,
        failed = outcome.failure_count,
        "Bulk reject finished"
    );

    Ok(Json(DataResponse { data: outcome }))
}
