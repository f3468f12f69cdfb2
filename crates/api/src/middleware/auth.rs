//! Header-based authentication extractor for Axum handlers.
//!
//! There are no credentials on this platform: identity is carried by the
//! `X-User-Id` header and resolved against the user table. Role and
//! country-scope checks hang off the extracted [`AuthUser`].

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use melboard_core::error::CoreError;
use melboard_core::roles::{self, Role};
use melboard_core::types::DbId;
use melboard_store::repositories::UserRepo;

use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from the `X-User-Id` header.
///
/// Use this as an extractor parameter in any handler that requires
/// authentication:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal id.
    pub user_id: DbId,
    /// The user's role.
    pub role: Role,
    /// Country scoping for country managers and project officers.
    pub country_id: Option<DbId>,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get("x-user-id")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Missing X-User-Id header".into()))
            })?;

        let user_id: DbId = header.parse().map_err(|_| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid X-User-Id header. Expected a numeric user id".into(),
            ))
        })?;

        let user = UserRepo::find_by_id(&state.store, user_id)
            .await
            .map_err(|_| AppError::Core(CoreError::Unauthorized("Unknown user".into())))?;

        if !user.active {
            return Err(AppError::Core(CoreError::Unauthorized(
                "User account is deactivated".into(),
            )));
        }

        Ok(AuthUser {
            user_id: user.id,
            role: user.role,
            country_id: user.country_id,
        })
    }
}

impl AuthUser {
    /// Require a role allowed to review submissions.
    pub fn require_reviewer(&self) -> Result<(), AppError> {
        if self.role.can_review() {
            Ok(())
        } else {
            Err(AppError::Core(CoreError::Forbidden(format!(
                "Role '{}' may not review submissions",
                self.role
            ))))
        }
    }

    /// Require a role allowed to submit data points.
    pub fn require_submitter(&self) -> Result<(), AppError> {
        if self.role.can_submit() {
            Ok(())
        } else {
            Err(AppError::Core(CoreError::Forbidden(format!(
                "Role '{}' may not submit data",
                self.role
            ))))
        }
    }

    /// Require the reference-data administration role.
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.role.can_manage_reference_data() {
            Ok(())
        } else {
            Err(AppError::Core(CoreError::Forbidden(format!(
                "Role '{}' may not manage reference data",
                self.role
            ))))
        }
    }

    /// Require that this user's country scope covers `country_id`.
    pub fn require_country_scope(&self, country_id: DbId) -> Result<(), AppError> {
        if roles::country_scope_allows(self.role, self.country_id, country_id) {
            Ok(())
        } else {
            Err(AppError::Core(CoreError::Forbidden(format!(
                "User is not scoped to country {country_id}"
            ))))
        }
    }
}
