use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::adapters::auth::Claims;
use crate::app::{error::ApiError, state::AppState};

/// The caller behind a valid `Authorization: Bearer <token>` header.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(ApiError::Unauthorized("Missing authorization"))?;
        let header = header
            .to_str()
            .map_err(|_| ApiError::Unauthorized("Invalid auth format"))?;

        let token = bearer_token(header).ok_or(ApiError::Unauthorized("Invalid auth format"))?;

        state.tokens.verify(token).map(AuthUser).map_err(|e| {
            tracing::debug!("Rejected bearer token: {}", e);
            ApiError::Unauthorized("Invalid token")
        })
    }
}

/// Exactly `Bearer <token>` separated by a single space.
fn bearer_token(header: &str) -> Option<&str> {
    let parts: Vec<&str> = header.split(' ').collect();
    match parts.as_slice() {
        ["Bearer", token] => Some(*token),
        _ => None,
    }
}
