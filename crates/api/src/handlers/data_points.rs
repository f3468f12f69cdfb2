//! Handlers for data point CRUD, submission, audit trails, and bulk import.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use melboard_core::types::DbId;
use melboard_events::{event_types, DomainEvent};
use melboard_store::models::{
    CreateDataPoint, DataPoint, DataPointQuery, ImportError, ImportOutcome, UpdateDataPoint,
};
use melboard_store::repositories::{DataPointRepo, ProjectRepo};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Publish a workflow event for a data point.
pub(crate) fn publish_data_point_event(
    state: &AppState,
    event_type: &str,
    dp: &DataPoint,
    actor: DbId,
) {
    state.event_bus.publish(
        DomainEvent::new(event_type)
            .with_entity("data_point", dp.id)
            .with_actor(actor)
            .with_payload(json!({
                "submitted_by": dp.submitted_by,
                "project_id": dp.project_id,
                "indicator_id": dp.indicator_id,
                "period": dp.period,
            })),
    );
}

/// Verify the acting user may submit against the project's country.
async fn ensure_project_scope(
    state: &AppState,
    auth: &AuthUser,
    project_id: DbId,
) -> AppResult<()> {
    let project = ProjectRepo::find_by_id(&state.store, project_id)
        .await
        .map_err(|_| {
            // Reference failures in submissions are validation errors, not 404s.
            crate::error::AppError::Core(melboard_core::error::CoreError::Validation(format!(
                "Unknown project id {project_id}"
            )))
        })?;
    auth.require_country_scope(project.country_id)
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// GET /api/v1/data-points
///
/// Lists data points enriched with related names, filterable by status,
/// project, indicator, country, period, and submitter.
pub async fn list_data_points(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<DataPointQuery>,
) -> AppResult<impl IntoResponse> {
    let points = DataPointRepo::list(&state.store, &query).await;
    Ok(Json(DataResponse { data: points }))
}

/// GET /api/v1/data-points/{id}
pub async fn get_data_point(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let view = DataPointRepo::find_view_by_id(&state.store, id).await?;
    Ok(Json(DataResponse { data: view }))
}

/// POST /api/v1/data-points
///
/// Creates a data point in `submitted` state (or `draft` when
/// `save_as_draft` is set). The submitter must be scoped to the project's
/// country.
pub async fn create_data_point(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateDataPoint>,
) -> AppResult<impl IntoResponse> {
    auth.require_submitter()?;
    ensure_project_scope(&state, &auth, input.project_id).await?;

    let dp = DataPointRepo::create(&state.store, input, auth.user_id).await?;

    if dp.status == melboard_core::workflow::DataPointStatus::Submitted {
        publish_data_point_event(&state, event_types::DATA_POINT_SUBMITTED, &dp, auth.user_id);
    }

    tracing::info!(
        user_id = auth.user_id,
        data_point_id = dp.id,
        status = %dp.status,
        "Data point created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: dp })))
}

/// PUT /api/v1/data-points/{id}
///
/// Edits a draft. Submitted and decided points are immutable.
pub async fn update_data_point(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDataPoint>,
) -> AppResult<impl IntoResponse> {
    auth.require_submitter()?;
    let dp = DataPointRepo::update(&state.store, id, input, auth.user_id).await?;
    Ok(Json(DataResponse { data: dp }))
}

/// DELETE /api/v1/data-points/{id}
///
/// Admin only; the one hard-delete path for submissions.
pub async fn delete_data_point(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.require_admin()?;
    DataPointRepo::delete(&state.store, id).await?;

    tracing::info!(user_id = auth.user_id, data_point_id = id, "Data point deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

/// POST /api/v1/data-points/{id}/submit
///
/// Submits a draft (or returned point) for review.
pub async fn submit_data_point(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.require_submitter()?;
    let dp = DataPointRepo::submit(&state.store, id, auth.user_id).await?;

    publish_data_point_event(&state, event_types::DATA_POINT_SUBMITTED, &dp, auth.user_id);

    tracing::info!(user_id = auth.user_id, data_point_id = dp.id, "Data point submitted");

    Ok(Json(DataResponse { data: dp }))
}

// ---------------------------------------------------------------------------
// Audit trail
// ---------------------------------------------------------------------------

/// GET /api/v1/data-points/{id}/audit-trail
pub async fn get_audit_trail(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let trail = DataPointRepo::audit_trail(&state.store, id).await?;
    Ok(Json(DataResponse { data: trail }))
}

/// GET /api/v1/data-points/{id}/audit-verify
///
/// Recomputes the audit hash chain and reports the first break, if any.
pub async fn verify_audit_trail(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let verification = DataPointRepo::verify_audit_chain(&state.store, id).await?;
    Ok(Json(DataResponse { data: verification }))
}

// ---------------------------------------------------------------------------
// Bulk import
// ---------------------------------------------------------------------------

/// POST /api/v1/data-points/bulk
///
/// Imports pre-parsed rows. Each row is dispatched as an independent
/// create; per-row failures are reported and never rolled back.
pub async fn bulk_import(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(rows): Json<Vec<CreateDataPoint>>,
) -> AppResult<impl IntoResponse> {
    auth.require_submitter()?;

    let total = rows.len();
    let results = futures::future::join_all(rows.into_iter().enumerate().map(|(row, input)| {
        let state = state.clone();
        let auth = auth.clone();
        async move {
            let outcome = async {
                ensure_project_scope(&state, &auth, input.project_id).await?;
                let dp = DataPointRepo::create(&state.store, input, auth.user_id).await?;
                Ok::<_, crate::error::AppError>(dp)
            }
            .await;
            (row, outcome)
        }
    }))
    .await;

    let mut outcome = ImportOutcome {
        imported: 0,
        failed: 0,
        errors: Vec::new(),
    };
    for (row, result) in results {
        match result {
            Ok(dp) => {
                outcome.imported += 1;
                if dp.status == melboard_core::workflow::DataPointStatus::Submitted {
                    publish_data_point_event(
                        &state,
                        event_types::DATA_POINT_SUBMITTED,
                        &dp,
                        auth.user_id,
                    );
                }
            }
            Err(e) => {
                outcome.failed += 1;
                outcome.errors.push(ImportError {
                    row,
                    error: e.to_string(),
                });
            }
        }
    }

    tracing::info!(
        user_id = auth.user_id,
        total,
        imported = outcome.imported,
        failed = outcome.failed,
        "Bulk import finished"
    );

    Ok(Json(DataResponse { data: outcome }))
}
