use std::{sync::Arc, time::Duration};

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Map, Value};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::app::{auth::AuthUser, error::ApiError, state::AppState};
use crate::core::normalize::{optional_text, quote_from_body, required_text};
use crate::core::pricing::compute_price;
use crate::domain::model::{NewParcel, ParcelRecord, PriceBreakdown, Pricing};
use crate::domain::ports::ParcelStore;

pub fn create_router(state: Arc<AppState>, cors_max_age_seconds: u64) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(Duration::from_secs(cors_max_age_seconds));

    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/hello", get(hello_handler))
        .route("/api/parcel-count", get(parcel_count_handler))
        .route("/api/db-status", get(db_status_handler))
        .route("/api/estimate", post(estimate_handler))
        .route("/api/parcels", post(create_parcel_handler))
        .route("/api/parcels/{id}", get(get_parcel_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Request bodies are read leniently: blank means `{}`, and a JSON value that
/// is not an object carries no fields.
fn parse_body(body: &[u8]) -> serde_json::Result<Map<String, Value>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }
    match serde_json::from_slice::<Value>(body)? {
        Value::Object(map) => Ok(map),
        _ => Ok(Map::new()),
    }
}

fn store(state: &AppState) -> Result<&Arc<dyn ParcelStore>, ApiError> {
    state.store.as_ref().ok_or(ApiError::StoreNotConnected)
}

pub async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn hello_handler() -> Json<Value> {
    Json(json!({ "msg": "Hello from server" }))
}

pub async fn parcel_count_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, ApiError> {
    let count = store(&state)?.count().await.map_err(|e| {
        tracing::error!("Parcel count error: {}", e);
        ApiError::CountFailed
    })?;
    Ok(Json(json!({ "count": count })))
}

pub async fn db_status_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, ApiError> {
    let store = state.store.as_ref().ok_or(ApiError::StatusNotConnected)?;
    store.ping().await.map_err(|e| {
        tracing::error!("DB status error: {}", e);
        ApiError::StatusPingFailed(e.to_string())
    })?;
    Ok(Json(json!({ "ok": true, "msg": "DB ping ok" })))
}

#[derive(Debug, Serialize)]
pub struct EstimateResponse {
    pub ok: bool,
    pub pricing: Pricing,
}

/// `POST /api/estimate`: prices without authentication or persistence.
pub async fn estimate_handler(body: Bytes) -> Result<Json<EstimateResponse>, ApiError> {
    let body = parse_body(&body).map_err(|e| {
        tracing::debug!("Estimate body rejected: {}", e);
        ApiError::MalformedEstimate
    })?;

    let quote = quote_from_body(&body);
    let pricing = compute_price(&quote);
    if !pricing.is_finite() {
        tracing::error!("Estimate error: non-finite pricing for {:?}", quote);
        return Err(ApiError::EstimateFailed);
    }

    tracing::debug!("Estimated {} {} for {:?}", pricing.total, pricing.currency, quote);
    Ok(Json(EstimateResponse { ok: true, pricing }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedParcel {
    pub parcel_id: String,
    pub tentative_price: f64,
    pub currency: String,
    pub currency_symbol: String,
    pub breakdown: PriceBreakdown,
}

/// `POST /api/parcels`: prices and books a parcel for the authenticated user.
/// The price is only returned once the record is stored.
pub async fn create_parcel_handler(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    body: Bytes,
) -> Result<Json<CreatedParcel>, ApiError> {
    let store = store(&state)?;

    let body = parse_body(&body).map_err(|e| {
        tracing::debug!("Parcel body rejected: {}", e);
        ApiError::MalformedPayload
    })?;

    let (pickup_address, delivery_address) = match (
        required_text(body.get("pickupAddress")),
        required_text(body.get("deliveryAddress")),
    ) {
        (Some(pickup), Some(delivery)) => (pickup, delivery),
        _ => return Err(ApiError::MissingAddresses),
    };

    let quote = quote_from_body(&body);
    let pricing = compute_price(&quote);
    if !pricing.is_finite() {
        tracing::error!("Create parcel error: non-finite pricing for {:?}", quote);
        return Err(ApiError::CreateParcelFailed);
    }

    let parcel = NewParcel::new(
        claims.sub,
        pickup_address,
        delivery_address,
        optional_text(body.get("notes")),
        &quote,
        &pricing,
    );

    let parcel_id = store.insert(parcel).await.map_err(|e| {
        tracing::error!("Create parcel error: {}", e);
        ApiError::CreateParcelFailed
    })?;

    tracing::info!("Created parcel {} at {} {}", parcel_id, pricing.total, pricing.currency);
    Ok(Json(CreatedParcel {
        parcel_id,
        tentative_price: pricing.total,
        currency: pricing.currency,
        currency_symbol: pricing.currency_symbol,
        breakdown: pricing.breakdown,
    }))
}

/// `GET /api/parcels/{id}`: reads back a booking. Parcels owned by another
/// user answer exactly like unknown ids.
pub async fn get_parcel_handler(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ParcelRecord>, ApiError> {
    let store = store(&state)?;

    let record = store.find(&id).await.map_err(|e| {
        tracing::error!("Load parcel error: {}", e);
        ApiError::LoadParcelFailed
    })?;

    match record {
        Some(record) if record.parcel.user_id == claims.sub => Ok(Json(record)),
        _ => Err(ApiError::ParcelNotFound),
    }
}
