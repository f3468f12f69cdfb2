//! Route definitions for indicator reference data.

use axum::routing::get;
use axum::Router;

use crate::handlers::indicators;
use crate::state::AppState;

/// ```text
/// GET    /           list_indicators
/// POST   /           create_indicator
/// GET    /{id}       get_indicator
/// PUT    /{id}       update_indicator
/// DELETE /{id}       delete_indicator
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(indicators::list_indicators).post(indicators::create_indicator),
        )
        .route(
            "/{id}",
            get(indicators::get_indicator)
                .put(indicators::update_indicator)
                .delete(indicators::delete_indicator),
        )
}
