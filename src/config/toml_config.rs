use crate::adapters::auth::DEFAULT_TOKEN_TTL_DAYS;
use crate::domain::ports::ServerSettings;
use crate::utils::error::{DeliveryError, Result};
use crate::utils::validation::{
    validate_bind_host, validate_data_dir, validate_one_of, validate_range, validate_secret,
    Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const PLACEHOLDER_SECRET: &str = "secret-placeholder";
const STORAGE_BACKENDS: [&str; 3] = ["file", "memory", "none"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub server: HttpConfig,
    pub auth: AuthConfig,
    pub storage: StorageConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub host: String,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 4000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_days: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: PLACEHOLDER_SECRET.to_string(),
            token_ttl_days: DEFAULT_TOKEN_TTL_DAYS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// `file`, `memory`, or `none` (store not connected).
    pub backend: String,
    pub data_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: "file".to_string(),
            data_dir: "./data".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub max_age_seconds: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            max_age_seconds: 60 * 60,
        }
    }
}

impl ServerConfig {
    /// Loads the configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DeliveryError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DeliveryError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Expands `${VAR}` references; unset variables are left in place so
    /// validation can name them.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DeliveryError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Applies `PORT`, `JWT_SECRET` and `DATA_DIR` from the environment.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(port) = std::env::var("PORT") {
            self.server.port =
                port.trim()
                    .parse()
                    .map_err(|_| DeliveryError::InvalidConfigValueError {
                        field: "PORT".to_string(),
                        value: port.clone(),
                        reason: "Expected a port number".to_string(),
                    })?;
        }
        if let Ok(secret) = std::env::var("JWT_SECRET") {
            self.auth.jwt_secret = secret;
        }
        if let Ok(data_dir) = std::env::var("DATA_DIR") {
            self.storage.data_dir = data_dir.trim().to_string();
        }
        Ok(())
    }

    pub fn uses_placeholder_secret(&self) -> bool {
        self.auth.jwt_secret == PLACEHOLDER_SECRET
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_bind_host("server.host", &self.server.host)?;
        validate_range("server.port", self.server.port, 1, u16::MAX)?;
        validate_secret("auth.jwt_secret", &self.auth.jwt_secret)?;
        validate_range("auth.token_ttl_days", self.auth.token_ttl_days, 1, 365)?;
        validate_one_of("storage.backend", &self.storage.backend, &STORAGE_BACKENDS)?;
        if self.storage.backend == "file" {
            validate_data_dir("storage.data_dir", &self.storage.data_dir)?;
        }
        Ok(())
    }
}

impl ServerSettings for ServerConfig {
    fn bind_address(&self) -> String {
        if self.server.host.contains(':') {
            format!("[{}]:{}", self.server.host, self.server.port)
        } else {
            format!("{}:{}", self.server.host, self.server.port)
        }
    }

    fn jwt_secret(&self) -> &str {
        &self.auth.jwt_secret
    }

    fn token_ttl_days(&self) -> i64 {
        self.auth.token_ttl_days
    }

    fn cors_max_age_seconds(&self) -> u64 {
        self.cors.max_age_seconds
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
