//! Route tree assembly.

pub mod approval;
pub mod countries;
pub mod dashboard;
pub mod data_points;
pub mod health;
pub mod indicators;
pub mod notification;
pub mod projects;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /countries                       list, create
/// /countries/{id}                  get, update, delete
///
/// /projects                        list, create
/// /projects/{id}                   get, update, delete
///
/// /indicators                      list, create
/// /indicators/{id}                 get, update, delete
///
/// /users                           list, create (admin only)
/// /users/{id}                      get, update, delete
///
/// /data-points                     list, create
/// /data-points/bulk                bulk import (POST)
/// /data-points/bulk/approve        bulk approve (POST)
/// /data-points/bulk/reject         bulk reject (POST)
/// /data-points/{id}                get, update, delete
/// /data-points/{id}/submit         submit draft (POST)
/// /data-points/{id}/review         claim for review (POST)
/// /data-points/{id}/approve        approve (POST)
/// /data-points/{id}/reject         reject (POST)
/// /data-points/{id}/request-changes  request changes (POST)
/// /data-points/{id}/audit-trail    audit trail (GET)
/// /data-points/{id}/audit-verify   audit chain verification (GET)
///
/// /approval-queue                  filtered/sorted review queue (GET)
///
/// /dashboard/metrics               headline KPIs (GET)
/// /dashboard/trend                 per-period indicator sums (GET)
/// /dashboard/countries             per-country breakdown (GET)
///
/// /notifications                   list (GET)
/// /notifications/unread-count      unread count (GET)
/// /notifications/read-all          mark all read (POST)
/// /notifications/{id}/read         mark one read (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/countries", countries::router())
        .nest("/projects", projects::router())
        .nest("/indicators", indicators::router())
        .nest("/users", users::router())
        .nest(
            "/data-points",
            data_points::router().merge(approval::data_point_router()),
        )
        .merge(approval::queue_router())
        .nest("/dashboard", dashboard::router())
        .nest("/notifications", notification::router())
}
