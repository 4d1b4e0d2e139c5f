use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Server responded with {status}: {message}")]
    RemoteError { status: u16, message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Storage error: {message}")]
    StorageError { message: String },

    #[error("Authentication error: {message}")]
    AuthError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Network,
    Configuration,
    Storage,
    Authentication,
}

impl DeliveryError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DeliveryError::IoError(_) | DeliveryError::SerializationError(_) => ErrorCategory::Io,
            DeliveryError::HttpError(_) | DeliveryError::RemoteError { .. } => {
                ErrorCategory::Network
            }
            DeliveryError::ConfigError { .. }
            | DeliveryError::InvalidConfigValueError { .. }
            | DeliveryError::MissingConfigError { .. } => ErrorCategory::Configuration,
            DeliveryError::StorageError { .. } => ErrorCategory::Storage,
            DeliveryError::AuthError { .. } => ErrorCategory::Authentication,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Io => format!("Could not read or write data: {}", self),
            ErrorCategory::Network => format!("Could not reach the pricing server: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Storage => "The parcel store is unavailable".to_string(),
            ErrorCategory::Authentication => "Authentication failed".to_string(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        DeliveryError::StorageError {
            message: message.into(),
        }
    }

    pub fn auth(message: impl Into<String>) -> Self {
        DeliveryError::AuthError {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DeliveryError>;
