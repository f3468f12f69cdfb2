//! Handlers for project reference data.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use melboard_core::types::DbId;
use melboard_store::models::{CreateProject, UpdateProject};
use melboard_store::repositories::ProjectRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query params for `GET /projects`.
#[derive(Debug, Deserialize)]
pub struct ListProjectsQuery {
    /// Narrow the listing to one country.
    pub country_id: Option<DbId>,
}

/// GET /api/v1/projects
pub async fn list_projects(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ListProjectsQuery>,
) -> AppResult<impl IntoResponse> {
    let projects = ProjectRepo::list(&state.store, params.country_id).await;
    Ok(Json(DataResponse { data: projects }))
}

/// GET /api/v1/projects/{id}
pub async fn get_project(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let project = ProjectRepo::find_by_id(&state.store, id).await?;
    Ok(Json(DataResponse { data: project }))
}

/// POST /api/v1/projects
///
/// Admin only.
pub async fn create_project(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateProject>,
) -> AppResult<impl IntoResponse> {
    auth.require_admin()?;
    let project = ProjectRepo::create(&state.store, input).await?;

    tracing::info!(
        user_id = auth.user_id,
        project_id = project.id,
        country_id = project.country_id,
        "Project created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: project })))
}

/// PUT /api/v1/projects/{id}
///
/// Admin only.
pub async fn update_project(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<impl IntoResponse> {
    auth.require_admin()?;
    let project = ProjectRepo::update(&state.store, id, input).await?;
    Ok(Json(DataResponse { data: project }))
}

/// DELETE /api/v1/projects/{id}
///
/// Admin only. Refused while data points still reference the project.
pub async fn delete_project(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.require_admin()?;
    ProjectRepo::delete(&state.store, id).await?;

    tracing::info!(user_id = auth.user_id, project_id = id, "Project deleted");

    Ok(StatusCode::NO_CONTENT)
}
