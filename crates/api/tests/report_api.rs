//! Integration tests for `GET /api/report` fallback behaviour.
//!
//! With no reachable database the report endpoint must degrade to the
//! built-in sample dataset rather than erroring, and mark the payload so
//! the dashboard can flag it.

mod common;

use axum::http::StatusCode;
use common::{body_json, get};

#[tokio::test]
async fn report_falls_back_to_sample_dataset() {
    let app = common::build_test_app();
    let response = get(app, "/api/report").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["source"], "sample");

    let report = &json["report"];
    assert!(report["kpis"]["feedback_count"].as_u64().unwrap() > 0);
    assert_eq!(report["brand_options"][0], "Todas");
    assert!(report["rounds_by_brand"].is_array());
    assert!(report["topic_distribution"].is_array());
    assert!(report["volume_timeline"].is_array());
    assert!(report["projects"].is_array());
}

#[tokio::test]
async fn report_filters_apply_to_sample_dataset() {
    let app = common::build_test_app();

    let unfiltered = body_json(get(common::build_test_app(), "/api/report").await).await;
    let filtered = body_json(get(app, "/api/report?marca=Nubank").await).await;

    let all = unfiltered["report"]["kpis"]["feedback_count"].as_u64().unwrap();
    let nubank = filtered["report"]["kpis"]["feedback_count"].as_u64().unwrap();
    assert!(nubank < all, "brand filter must narrow the KPI count");

    // The effort chart still covers every brand regardless of filter.
    assert_eq!(
        filtered["report"]["rounds_by_brand"].as_array().unwrap().len(),
        unfiltered["report"]["rounds_by_brand"].as_array().unwrap().len(),
    );
}

#[tokio::test]
async fn report_is_deterministic_across_requests() {
    let a = body_json(get(common::build_test_app(), "/api/report").await).await;
    let b = body_json(get(common::build_test_app(), "/api/report").await).await;
    assert_eq!(a, b);
}
