//! Route definitions for data point CRUD, submission, and audit trails.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::data_points;
use crate::state::AppState;

/// ```text
/// GET    /                     list_data_points
/// POST   /                     create_data_point
/// POST   /bulk                 bulk_import
/// GET    /{id}                 get_data_point
/// PUT    /{id}                 update_data_point
/// DELETE /{id}                 delete_data_point
/// POST   /{id}/submit          submit_data_point
/// GET    /{id}/audit-trail     get_audit_trail
/// GET    /{id}/audit-verify    verify_audit_trail
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(data_points::list_data_points).post(data_points::create_data_point),
        )
        .route("/bulk", post(data_points::bulk_import))
        .route(
            "/{id}",
            get(data_points::get_data_point)
                .put(data_points::update_data_point)
                .delete(data_points::delete_data_point),
        )
        .route("/{id}/submit", post(data_points::submit_data_point))
        .route("/{id}/audit-trail", get(data_points::get_audit_trail))
        .route("/{id}/audit-verify", get(data_points::verify_audit_trail))
}
