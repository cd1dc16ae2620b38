//! Integration tests for `GET /api/feedbacks` failure behaviour.
//!
//! The listing endpoint is the one dashboard variant that surfaces an
//! explicit error instead of degrading: with no reachable database every
//! request must answer 500 with the raw error message in the JSON body.

mod common;

use axum::http::StatusCode;
use common::{body_json, get};

#[tokio::test]
async fn list_surfaces_database_failure_as_500() {
    let app = common::build_test_app();
    let response = get(app, "/api/feedbacks").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["code"], "DATABASE_ERROR");
    // The error message is surfaced verbatim, never masked.
    assert!(json["error"].is_string());
    assert!(!json["error"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn get_by_id_fails_loudly_without_database() {
    let app = common::build_test_app();
    let response = get(app, "/api/feedbacks/42").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["code"], "DATABASE_ERROR");
}

#[tokio::test]
async fn get_by_non_numeric_id_is_rejected() {
    let app = common::build_test_app();
    let response = get(app, "/api/feedbacks/not-a-number").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_with_filters_also_fails_loudly() {
    let app = common::build_test_app();
    let response = get(app, "/api/feedbacks?marca=Nubank&formato=Todos&limit=10").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["code"], "DATABASE_ERROR");
}
