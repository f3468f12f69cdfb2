//! HTTP-level integration tests for the approval queue.
//!
//! The fixtures seed three pending items: 14 (submitted, Tanzania), 15
//! (submitted, high priority, Kenya), and 16 (in review, Uganda).

mod common;

use axum::http::StatusCode;
use common::users::*;
use common::{body_json, get, seeded_app};

fn ids(json: &serde_json::Value) -> Vec<i64> {
    json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_queue_lists_pending_items() {
    let (app, _) = seeded_app();
    let response = get(app, "/api/v1/approval-queue", KENYA_MANAGER).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let mut queue_ids = ids(&json);
    queue_ids.sort();
    assert_eq!(queue_ids, vec![14, 15, 16]);

    // Items are enriched with resolved names.
    let item = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|i| i["id"] == 15)
        .unwrap();
    assert_eq!(item["project_name"], "Youth Enterprise Training");
    assert_eq!(item["country_name"], "Kenya");
    assert_eq!(item["submitter_name"], "Joseph Mwangi");
}

#[tokio::test]
async fn test_queue_requires_a_reviewer() {
    let (app, _) = seeded_app();
    let response = get(app, "/api/v1/approval-queue", KENYA_OFFICER).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_status_filter_returns_exact_matches() {
    let (app, _) = seeded_app();
    let response = get(
        app.clone(),
        "/api/v1/approval-queue?status=submitted&order=asc",
        KENYA_MANAGER,
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(ids(&json), vec![14, 15]);
    assert!(json["data"]
        .as_array()
        .unwrap()
        .iter()
        .all(|i| i["status"] == "submitted"));

    // Reapplying the same filter yields the same result.
    let response = get(
        app,
        "/api/v1/approval-queue?status=submitted&order=asc",
        KENYA_MANAGER,
    )
    .await;
    assert_eq!(ids(&body_json(response).await), vec![14, 15]);
}

#[tokio::test]
async fn test_priority_filter_and_sort() {
    let (app, _) = seeded_app();
    let response = get(
        app.clone(),
        "/api/v1/approval-queue?priority=high",
        KENYA_MANAGER,
    )
    .await;
    assert_eq!(ids(&body_json(response).await), vec![15]);

    // Descending priority sort puts the high-priority item first.
    let response = get(
        app,
        "/api/v1/approval-queue?sort_by=priority&order=desc",
        KENYA_MANAGER,
    )
    .await;
    let queue_ids = ids(&body_json(response).await);
    assert_eq!(queue_ids[0], 15);
}

#[tokio::test]
async fn test_submitter_filter() {
    let (app, _) = seeded_app();
    let response = get(
        app,
        "/api/v1/approval-queue?submitted_by=5",
        KENYA_MANAGER,
    )
    .await;
    assert_eq!(ids(&body_json(response).await), vec![14]);
}

#[tokio::test]
async fn test_age_filter() {
    let (app, _) = seeded_app();

    // A generous window keeps everything.
    let response = get(
        app.clone(),
        "/api/v1/approval-queue?max_age_days=36500",
        KENYA_MANAGER,
    )
    .await;
    assert_eq!(ids(&body_json(response).await).len(), 3);

    // The fixtures were all submitted in late 2024.
    let response = get(
        app,
        "/api/v1/approval-queue?max_age_days=0",
        KENYA_MANAGER,
    )
    .await;
    assert!(ids(&body_json(response).await).is_empty());
}

#[tokio::test]
async fn test_sort_by_submitted_at_is_deterministic() {
    let (app, _) = seeded_app();
    let response = get(
        app.clone(),
        "/api/v1/approval-queue?sort_by=submitted_at&order=asc",
        KENYA_MANAGER,
    )
    .await;
    // 16 (Dec 27) < 14 (Dec 28) < 15 (Dec 29).
    assert_eq!(ids(&body_json(response).await), vec![16, 14, 15]);

    let response = get(
        app,
        "/api/v1/approval-queue?sort_by=submitted_at&order=desc",
        KENYA_MANAGER,
    )
    .await;
    assert_eq!(ids(&body_json(response).await), vec![15, 14, 16]);
}

#[tokio::test]
async fn test_decided_items_leave_the_queue() {
    let (app, _) = seeded_app();

    let response = common::post_json(
        app.clone(),
        "/api/v1/data-points/15/approve",
        KENYA_MANAGER,
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(app, "/api/v1/approval-queue", KENYA_MANAGER).await;
    let mut queue_ids = ids(&body_json(response).await);
    queue_ids.sort();
    assert_eq!(queue_ids, vec![14, 16]);
}
