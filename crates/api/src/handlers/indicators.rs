//! Handlers for indicator reference data.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use melboard_core::types::DbId;
use melboard_store::models::{CreateIndicator, UpdateIndicator};
use melboard_store::repositories::IndicatorRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/indicators
pub async fn list_indicators(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let indicators = IndicatorRepo::list(&state.store).await;
    Ok(Json(DataResponse { data: indicators }))
}

/// GET /api/v1/indicators/{id}
pub async fn get_indicator(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let indicator = IndicatorRepo::find_by_id(&state.store, id).await?;
    Ok(Json(DataResponse { data: indicator }))
}

/// POST /api/v1/indicators
///
/// Admin only.
pub async fn create_indicator(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateIndicator>,
) -> AppResult<impl IntoResponse> {
    auth.require_admin()?;
    let indicator = IndicatorRepo::create(&state.store, input).await?;

    tracing::info!(user_id = auth.user_id, indicator_id = indicator.id, "Indicator created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: indicator })))
}

/// PUT /api/v1/indicators/{id}
///
/// Admin only.
pub async fn update_indicator(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateIndicator>,
) -> AppResult<impl IntoResponse> {
    auth.require_admin()?;
    let indicator = IndicatorRepo::update(&state.store, id, input).await?;
    Ok(Json(DataResponse { data: indicator }))
}

/// DELETE /api/v1/indicators/{id}
///
/// Admin only. Refused while data points still reference the indicator.
pub async fn delete_indicator(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.require_admin()?;
    IndicatorRepo::delete(&state.store, id).await?;

    tracing::info!(user_id = auth.user_id, indicator_id = id, "Indicator deleted");

    Ok(StatusCode::NO_CONTENT)
}
