use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use vive_delivery::{create_router, AppState, TokenAuthority};

fn app_without_store() -> Router {
    let state = AppState::new(None, TokenAuthority::new("test-secret", 7));
    create_router(state, 60)
}

async fn post_estimate(body: impl Into<Body>) -> (StatusCode, Value) {
    let response = app_without_store()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/estimate")
                .header("Content-Type", "application/json")
                .body(body.into())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_estimate_returns_pricing_envelope() {
    let (status, json) = post_estimate(
        json!({
            "weightKg": 1,
            "dims": {"l": 20, "w": 20, "h": 10},
            "service": "standard",
            "insured": false
        })
        .to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["ok"], true);
    assert_eq!(json["pricing"]["total"], 42.0);
    assert_eq!(json["pricing"]["currency"], "BDT");
    assert_eq!(json["pricing"]["currencySymbol"], "৳");

    let breakdown = &json["pricing"]["breakdown"];
    assert_eq!(breakdown["baseFee"], 30.0);
    assert_eq!(breakdown["perKg"], 12.0);
    assert_eq!(breakdown["chargeWeight"], 1.0);
    assert_eq!(breakdown["volumetricKg"], 0.8);
    assert_eq!(breakdown["volumeSurcharge"], 0.0);
    assert_eq!(breakdown["serviceMultiplier"], 1.0);
    assert_eq!(breakdown["insuranceFee"], 0.0);
    assert_eq!(breakdown["subtotal"], 42.0);
    assert_eq!(breakdown["total"], 42.0);
}

#[tokio::test]
async fn test_estimate_express_with_insurance() {
    let (status, json) = post_estimate(
        json!({
            "weightKg": 2,
            "dims": {"l": 10, "w": 10, "h": 10},
            "service": "express",
            "insured": true,
            "declaredValue": 10000
        })
        .to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["pricing"]["breakdown"]["insuranceFee"], 200.0);
    assert_eq!(json["pricing"]["total"], 281.0);
}

#[tokio::test]
async fn test_empty_body_prices_with_defaults() {
    let (status, json) = post_estimate(Body::empty()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["pricing"]["breakdown"]["chargeWeight"], 0.1);
    assert_eq!(json["pricing"]["total"], 31.2);
}

#[tokio::test]
async fn test_form_strings_and_unknown_service_are_coerced() {
    let (status, json) = post_estimate(
        json!({
            "weightKg": "1",
            "dims": {"l": "20", "w": "20"},
            "service": "same-day",
            "insured": "",
            "declaredValue": "lots"
        })
        .to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["pricing"]["breakdown"]["serviceMultiplier"], 1.0);
    assert_eq!(json["pricing"]["breakdown"]["volumetricKg"], 0.0);
    assert_eq!(json["pricing"]["breakdown"]["insuranceFee"], 0.0);
    assert_eq!(json["pricing"]["total"], 42.0);
}

#[tokio::test]
async fn test_negative_weight_is_clamped() {
    let (_, json) = post_estimate(json!({"weightKg": -50}).to_string()).await;
    assert_eq!(json["pricing"]["breakdown"]["chargeWeight"], 0.1);
}

#[tokio::test]
async fn test_malformed_json_is_rejected() {
    let (status, json) = post_estimate("{ invalid json }").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["ok"], false);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_overflowing_weight_is_internal_error() {
    let (status, json) = post_estimate(json!({"weightKg": 1e308}).to_string()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json, json!({"ok": false, "error": "Could not compute estimate"}));
}

#[tokio::test]
async fn test_degenerate_dims_are_internal_error() {
    let (status, json) = post_estimate(
        json!({"weightKg": 1, "dims": {"l": 1e300, "w": 1e300, "h": 0}}).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json, json!({"ok": false, "error": "Could not compute estimate"}));
}

#[tokio::test]
async fn test_supporting_endpoints() {
    let app = app_without_store();

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json, json!({"status": "ok"}));

    let response = app
        .oneshot(Request::builder().uri("/api/hello").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["msg"], "Hello from server");
}
