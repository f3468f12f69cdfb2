//! HTTP-level integration tests for dashboard aggregation.
//!
//! Expected figures are derived from the embedded fixtures: the current
//! period (2024-Q4) has approved sums of 1750 people trained (1240 Kenya +
//! 510 Uganda), 975 women participants, 182000 in loans, and 96 training
//! sessions.

mod common;

use axum::http::StatusCode;
use common::users::*;
use common::{body_json, get, post_json, seeded_app};

#[tokio::test]
async fn test_headline_metrics_from_approved_points() {
    let (app, _) = seeded_app();
    let response = get(app, "/api/v1/dashboard/metrics", EXECUTIVE).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let data = &json["data"];

    assert_eq!(data["period"], "2024-Q4");
    assert_eq!(data["total_people_reached"], 1750.0);
    assert_eq!(data["women_participants"], 975.0);
    assert_eq!(data["loans_disbursed"], 182000.0);
    assert_eq!(data["training_sessions"], 96.0);

    let rate = data["female_participation_rate"].as_f64().unwrap();
    assert!((rate - 975.0 / 1750.0 * 100.0).abs() < 1e-9);

    assert_eq!(data["active_projects"], 4);
    assert_eq!(data["total_budget"], 4_780_000.0);

    // Projections compound off the current total; three periods forward.
    let projections = data["projected_people_reached"].as_array().unwrap();
    assert_eq!(projections.len(), 3);
    assert!(projections[0].as_f64().unwrap() > 1750.0);
}

#[tokio::test]
async fn test_metrics_are_recomputed_after_approval() {
    let (app, _) = seeded_app();

    // Fixture 15 is a pending 2024-Q4 training-sessions submission of 24.
    let response = post_json(
        app.clone(),
        "/api/v1/data-points/15/approve",
        KENYA_MANAGER,
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(app, "/api/v1/dashboard/metrics", EXECUTIVE).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["training_sessions"], 120.0);
}

#[tokio::test]
async fn test_metrics_country_filter() {
    let (app, _) = seeded_app();
    let response = get(app, "/api/v1/dashboard/metrics?country_id=1", EXECUTIVE).await;
    let json = body_json(response).await;
    let data = &json["data"];

    assert_eq!(data["total_people_reached"], 1240.0);
    assert_eq!(data["women_participants"], 680.0);
    // Kenya has two active projects.
    assert_eq!(data["active_projects"], 2);
}

#[tokio::test]
async fn test_metrics_unknown_country_yields_zeroes() {
    let (app, _) = seeded_app();
    let response = get(app, "/api/v1/dashboard/metrics?country_id=99", EXECUTIVE).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["total_people_reached"], 0.0);
    assert_eq!(json["data"]["female_participation_rate"], 0.0);
}

#[tokio::test]
async fn test_trend_covers_the_historical_window() {
    let (app, _) = seeded_app();
    let response = get(app, "/api/v1/dashboard/trend", EXECUTIVE).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let series = json["data"].as_array().unwrap();

    let values: Vec<f64> = series.iter().map(|p| p["value"].as_f64().unwrap()).collect();
    assert_eq!(values, vec![420.0, 990.0, 890.0, 1750.0]);
    assert_eq!(series[0]["period"], "2024-Q1");
    assert_eq!(series[3]["period"], "2024-Q4");
}

#[tokio::test]
async fn test_trend_for_another_indicator() {
    let (app, _) = seeded_app();
    let response = get(app, "/api/v1/dashboard/trend?indicator_id=4", EXECUTIVE).await;
    let json = body_json(response).await;
    let values: Vec<f64> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["value"].as_f64().unwrap())
        .collect();
    assert_eq!(values, vec![0.0, 0.0, 125000.0, 182000.0]);
}

#[tokio::test]
async fn test_country_breakdown_includes_every_country() {
    let (app, _) = seeded_app();
    let response = get(app, "/api/v1/dashboard/countries", EXECUTIVE).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let rows = json["data"].as_array().unwrap();
    assert_eq!(rows.len(), 4);

    let kenya = rows.iter().find(|r| r["country_name"] == "Kenya").unwrap();
    assert_eq!(kenya["people_reached"], 1240.0);
    assert_eq!(kenya["women_participants"], 680.0);

    let rwanda = rows.iter().find(|r| r["country_name"] == "Rwanda").unwrap();
    assert_eq!(rwanda["people_reached"], 0.0);
    assert_eq!(rwanda["female_participation_rate"], 0.0);
}
