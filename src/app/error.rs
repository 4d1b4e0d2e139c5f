use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Every failure the HTTP API reports. Messages are fixed strings; causes are
/// logged, never sent to the client.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Malformed payload")]
    MalformedEstimate,

    #[error("Could not compute estimate")]
    EstimateFailed,

    #[error("Malformed payload")]
    MalformedPayload,

    #[error("{0}")]
    Unauthorized(&'static str),

    #[error("pickupAddress and deliveryAddress are required")]
    MissingAddresses,

    #[error("DB not connected")]
    StoreNotConnected,

    #[error("DB not connected")]
    StatusNotConnected,

    #[error("{0}")]
    StatusPingFailed(String),

    #[error("Could not count parcels")]
    CountFailed,

    #[error("Could not create parcel")]
    CreateParcelFailed,

    #[error("Parcel not found")]
    ParcelNotFound,

    #[error("Could not load parcel")]
    LoadParcelFailed,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MalformedEstimate | ApiError::MalformedPayload | ApiError::MissingAddresses => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::ParcelNotFound => StatusCode::NOT_FOUND,
            ApiError::EstimateFailed
            | ApiError::StoreNotConnected
            | ApiError::StatusNotConnected
            | ApiError::StatusPingFailed(_)
            | ApiError::CountFailed
            | ApiError::CreateParcelFailed
            | ApiError::LoadParcelFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        // The estimate and status endpoints answer with an `ok` envelope.
        let body = match self {
            ApiError::MalformedEstimate | ApiError::EstimateFailed => {
                json!({ "ok": false, "error": message })
            }
            ApiError::StatusNotConnected => json!({ "ok": false, "msg": message }),
            ApiError::StatusPingFailed(_) => json!({ "ok": false, "error": message }),
            _ => json!({ "error": message }),
        };

        (self.status(), Json(body)).into_response()
    }
}
