//! Handlers for the MEL dashboard.
//!
//! Each endpoint flattens the current store contents into the aggregation
//! inputs and recomputes KPIs on the spot. Metrics are derived views, never
//! cached.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use melboard_core::metrics::{
    self, CountryFacts, IndicatorFacts, MetricPoint, ProjectFacts, INDICATOR_PEOPLE_TRAINED,
};
use melboard_core::types::DbId;
use melboard_store::models::{DataPointQuery, ProjectStatus};
use melboard_store::repositories::{CountryRepo, DataPointRepo, IndicatorRepo, ProjectRepo};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Input assembly
// ---------------------------------------------------------------------------

/// Flatten every data point into a [`MetricPoint`].
async fn metric_points(state: &AppState) -> Vec<MetricPoint> {
    DataPointRepo::list(&state.store, &DataPointQuery::default())
        .await
        .into_iter()
        .map(|view| MetricPoint {
            indicator_id: view.data_point.indicator_id,
            country_id: view.country_id,
            value: view.data_point.value,
            period: view.data_point.period,
            status: view.data_point.status,
            quality_score: view.data_point.quality_score,
        })
        .collect()
}

async fn project_facts(state: &AppState) -> Vec<ProjectFacts> {
    ProjectRepo::list(&state.store, None)
        .await
        .into_iter()
        .map(|p| ProjectFacts {
            country_id: p.country_id,
            active: p.status == ProjectStatus::Active,
            budget: p.budget,
            target_reach: p.target_reach,
            current_reach: p.current_reach,
        })
        .collect()
}

async fn indicator_facts(state: &AppState) -> Vec<IndicatorFacts> {
    IndicatorRepo::list(&state.store)
        .await
        .into_iter()
        .map(|i| IndicatorFacts {
            id: i.id,
            target: i.target,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Endpoints
// ---------------------------------------------------------------------------

/// Query params for `GET /dashboard/metrics`.
#[derive(Debug, Default, Deserialize)]
pub struct MetricsQuery {
    /// Narrow all KPIs to one country.
    pub country_id: Option<DbId>,
}

/// GET /api/v1/dashboard/metrics
///
/// Headline KPIs for the current reporting period, recomputed from
/// approved data points.
pub async fn dashboard_metrics(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<MetricsQuery>,
) -> AppResult<impl IntoResponse> {
    let points = metric_points(&state).await;
    let projects = project_facts(&state).await;
    let indicators = indicator_facts(&state).await;

    let kpis = metrics::compute(&points, &projects, &indicators, params.country_id);
    Ok(Json(DataResponse { data: kpis }))
}

/// Query params for `GET /dashboard/trend`.
#[derive(Debug, Default, Deserialize)]
pub struct TrendQuery {
    /// Indicator to chart; defaults to People Trained.
    pub indicator_id: Option<DbId>,
    pub country_id: Option<DbId>,
}

/// GET /api/v1/dashboard/trend
///
/// Per-period sums for one indicator over the historical window.
pub async fn dashboard_trend(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<TrendQuery>,
) -> AppResult<impl IntoResponse> {
    let points = metric_points(&state).await;
    let indicator_id = params.indicator_id.unwrap_or(INDICATOR_PEOPLE_TRAINED);

    let series = metrics::trend(&points, indicator_id, params.country_id);
    Ok(Json(DataResponse { data: series }))
}

/// GET /api/v1/dashboard/countries
///
/// Current-period participation broken down per country.
pub async fn dashboard_countries(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let points = metric_points(&state).await;
    let countries: Vec<CountryFacts> = CountryRepo::list(&state.store)
        .await
        .into_iter()
        .map(|c| CountryFacts {
            id: c.id,
            name: c.name,
        })
        .collect();

    let rows = metrics::country_breakdown(&points, &countries);
    Ok(Json(DataResponse { data: rows }))
}
