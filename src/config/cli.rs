use crate::config::{QuoteArgs, ServeArgs, ServerConfig, TokenArgs};
use crate::core::normalize::quote_from_body;
use crate::domain::model::ParcelQuote;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use serde_json::json;

/// Layers configuration: defaults, then the TOML file, then environment,
/// then command-line flags.
pub fn resolve_server_config(config_path: Option<&str>) -> Result<ServerConfig> {
    let mut config = match config_path {
        Some(path) => {
            tracing::info!("Loading configuration from {}", path);
            ServerConfig::from_file(path)?
        }
        None => ServerConfig::default(),
    };
    config.apply_env_overrides()?;
    Ok(config)
}

impl ServeArgs {
    pub fn to_server_config(&self) -> Result<ServerConfig> {
        let mut config = resolve_server_config(self.config.as_deref())?;
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(data_dir) = &self.data_dir {
            config.storage.data_dir = data_dir.clone();
        }
        if self.memory_store {
            config.storage.backend = "memory".to_string();
        }
        config.validate()?;
        Ok(config)
    }
}

impl TokenArgs {
    pub fn to_server_config(&self) -> Result<ServerConfig> {
        let mut config = resolve_server_config(self.config.as_deref())?;
        if let Some(ttl_days) = self.ttl_days {
            config.auth.token_ttl_days = ttl_days;
        }
        config.validate()?;
        Ok(config)
    }
}

impl QuoteArgs {
    /// Goes through the same coercion as HTTP bodies so negative flags clamp to 0.
    pub fn to_quote(&self) -> ParcelQuote {
        let body = json!({
            "weightKg": self.weight_kg,
            "dims": {"l": self.length, "w": self.width, "h": self.height},
            "service": if self.express { "express" } else { "standard" },
            "insured": self.insured,
            "declaredValue": self.declared_value,
        });
        body.as_object()
            .map(quote_from_body)
            .unwrap_or_default()
    }
}
