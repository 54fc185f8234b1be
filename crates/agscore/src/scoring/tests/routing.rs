use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header::CONTENT_TYPE, Request, StatusCode},
    Json,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::scoring::router::{score_handler, trigger_handler, TriggerRequest};

fn post_json(uri: &str, payload: Value) -> Request<Body> {
    Request::post(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&payload).expect("encode")))
        .expect("request")
}

#[tokio::test]
async fn score_endpoint_returns_camel_case_result() {
    let payload = json!({
        "sand": 40.0,
        "silt": 40.0,
        "clay": 20.0,
        "latitude": LAGUNA.0,
        "longitude": LAGUNA.1,
        "cropCycleMonths": ["Jun", "Jul", "Aug"],
        "cropType": "palay",
        "province": "Laguna",
        "systemOrVariety": "Irrigated",
        "projectedYieldPerHa": 3.99
    });

    let response = risk_router_for_tests()
        .oneshot(post_json("/api/v1/risk/score", payload))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json_body(response).await;
    assert!(body["baselineScore"].as_u64().is_some());
    assert_eq!(body["harvestScore"]["score"], 500);
    assert_eq!(body["climateType"], "Type I");
    assert!(body["alpha"].is_i64());
}

#[tokio::test]
async fn score_endpoint_accepts_empty_object() {
    let response = risk_router_for_tests()
        .oneshot(post_json("/api/v1/risk/score", json!({})))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json_body(response).await;
    assert_eq!(body["baselineScore"], 10);
    assert!(body["soilScore"].is_null());
}

#[tokio::test]
async fn trigger_endpoint_parses_command() {
    let response = risk_router_for_tests()
        .oneshot(post_json(
            "/api/v1/risk/harvest-trigger",
            json!({ "text": "harvest score corn yellow corn 5.5 t/ha isabela" }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json_body(response).await;
    assert_eq!(body["cropType"], "Corn");
    assert_eq!(body["systemOrVariety"], "Yellow Corn");
    assert_eq!(body["projectedYieldPerHa"], 5.5);
    assert_eq!(body["province"], "isabela");
}

#[tokio::test]
async fn trigger_endpoint_rejects_other_text() {
    let response = risk_router_for_tests()
        .oneshot(post_json(
            "/api/v1/risk/harvest-trigger",
            json!({ "text": "good morning" }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = read_json_body(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("not a harvest score command"));
}

#[tokio::test]
async fn handlers_can_be_called_directly() {
    let engine = Arc::new(engine());

    let response = score_handler(State(engine.clone()), Json(laguna_palay_input(3.99))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let Json(trigger) = trigger_handler(
        State(engine),
        Json(TriggerRequest {
            text: "harvest score potato 17 t/ha benguet".to_string(),
        }),
    )
    .await
    .expect("parsed");
    assert_eq!(trigger.crop_type.as_deref(), Some("Potato"));
    assert_eq!(trigger.province.as_deref(), Some("benguet"));
}
