use crate::domain::model::{ParcelQuote, Pricing};
use crate::utils::error::{DeliveryError, Result};
use crate::utils::validation::validate_server_url;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct EstimateEnvelope {
    ok: bool,
    pricing: Option<Pricing>,
    error: Option<String>,
}

/// Calls `POST /api/estimate` on a running server.
#[derive(Debug, Clone)]
pub struct EstimateClient {
    client: reqwest::Client,
    endpoint: String,
}

impl EstimateClient {
    pub fn new(server_url: &str) -> Result<Self> {
        validate_server_url("server", server_url)?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/api/estimate", server_url.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn estimate(&self, quote: &ParcelQuote) -> Result<Pricing> {
        tracing::debug!("POST {}", self.endpoint);
        let response = self.client.post(&self.endpoint).json(quote).send().await?;
        let status = response.status();
        let envelope: EstimateEnvelope = response.json().await?;

        match envelope {
            EstimateEnvelope {
                ok: true,
                pricing: Some(pricing),
                ..
            } => Ok(pricing),
            EstimateEnvelope { error, .. } => Err(DeliveryError::RemoteError {
                status: status.as_u16(),
                message: error.unwrap_or_else(|| "no pricing in response".to_string()),
            }),
        }
    }
}
