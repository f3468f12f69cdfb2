//! Handlers for user administration.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use melboard_core::types::DbId;
use melboard_store::models::{CreateUser, UpdateUser};
use melboard_store::repositories::UserRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/users
pub async fn list_users(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let users = UserRepo::list(&state.store).await;
    Ok(Json(DataResponse { data: users }))
}

/// GET /api/v1/users/{id}
pub async fn get_user(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let user = UserRepo::find_by_id(&state.store, id).await?;
    Ok(Json(DataResponse { data: user }))
}

/// POST /api/v1/users
///
/// Admin only.
pub async fn create_user(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateUser>,
) -> AppResult<impl IntoResponse> {
    auth.require_admin()?;
    let user = UserRepo::create(&state.store, input).await?;

    tracing::info!(
        user_id = auth.user_id,
        created_user_id = user.id,
        role = %user.role,
        "User created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: user })))
}

/// PUT /api/v1/users/{id}
///
/// Admin only.
pub async fn update_user(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUser>,
) -> AppResult<impl IntoResponse> {
    auth.require_admin()?;
    let user = UserRepo::update(&state.store, id, input).await?;
    Ok(Json(DataResponse { data: user }))
}

/// DELETE /api/v1/users/{id}
///
/// Admin only. Refused while the user still has submissions.
pub async fn delete_user(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.require_admin()?;
    UserRepo::delete(&state.store, id).await?;

    tracing::info!(user_id = auth.user_id, deleted_user_id = id, "User deleted");

    Ok(StatusCode::NO_CONTENT)
}
