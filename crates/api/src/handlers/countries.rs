//! Handlers for country reference data.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use melboard_core::types::DbId;
use melboard_store::models::{CreateCountry, UpdateCountry};
use melboard_store::repositories::CountryRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/countries
pub async fn list_countries(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let countries = CountryRepo::list(&state.store).await;
    Ok(Json(DataResponse { data: countries }))
}

/// GET /api/v1/countries/{id}
pub async fn get_country(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let country = CountryRepo::find_by_id(&state.store, id).await?;
    Ok(Json(DataResponse { data: country }))
}

/// POST /api/v1/countries
///
/// Admin only.
pub async fn create_country(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateCountry>,
) -> AppResult<impl IntoResponse> {
    auth.require_admin()?;
    let country = CountryRepo::create(&state.store, input).await?;

    tracing::info!(user_id = auth.user_id, country_id = country.id, "Country created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: country })))
}

/// PUT /api/v1/countries/{id}
///
/// Admin only.
pub async fn update_country(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCountry>,
) -> AppResult<impl IntoResponse> {
    auth.require_admin()?;
    let country = CountryRepo::update(&state.store, id, input).await?;
    Ok(Json(DataResponse { data: country }))
}

/// DELETE /api/v1/countries/{id}
///
/// Admin only. Refused while projects still reference the country.
pub async fn delete_country(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.require_admin()?;
    CountryRepo::delete(&state.store, id).await?;

    tracing::info!(user_id = auth.user_id, country_id = id, "Country deleted");

    Ok(StatusCode::NO_CONTENT)
}
