//! Root-level health route.

use axum::routing::get;
use axum::Router;

use crate::handlers::health;
use crate::state::AppState;

/// ```text
/// GET    /health     liveness probe
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health::health))
}
