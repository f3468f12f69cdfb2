//! Route definitions for the dashboard.

use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// ```text
/// GET    /metrics     dashboard_metrics (optional ?country_id=)
/// GET    /trend       dashboard_trend (optional ?indicator_id=&country_id=)
/// GET    /countries   dashboard_countries
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/metrics", get(dashboard::dashboard_metrics))
        .route("/trend", get(dashboard::dashboard_trend))
        .route("/countries", get(dashboard::dashboard_countries))
}
