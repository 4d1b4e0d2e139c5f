use crate::utils::error::{DeliveryError, Result};
use std::net::IpAddr;
use std::path::Path;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: &str, reason: impl Into<String>) -> DeliveryError {
    DeliveryError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// Base URL of a running server. API paths are appended to it, so it may not
/// carry a query or fragment.
pub fn validate_server_url(field_name: &str, url_str: &str) -> Result<()> {
    let url = Url::parse(url_str)
        .map_err(|e| invalid(field_name, url_str, format!("Invalid URL format: {}", e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(
            field_name,
            url_str,
            format!("Unsupported URL scheme: {}", url.scheme()),
        ));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(invalid(field_name, url_str, "URL has no host"));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid(
            field_name,
            url_str,
            "Server URL cannot have a query or fragment",
        ));
    }
    Ok(())
}

/// An IP address or a plain hostname such as `localhost`.
pub fn validate_bind_host(field_name: &str, host: &str) -> Result<()> {
    if host.parse::<IpAddr>().is_ok() {
        return Ok(());
    }
    let is_hostname = !host.is_empty()
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.');
    if !is_hostname {
        return Err(invalid(
            field_name,
            host,
            "Expected an IP address or hostname",
        ));
    }
    Ok(())
}

/// Signing secrets must be set, and a `${VAR}` left over from substitution
/// means the variable was never exported.
pub fn validate_secret(field_name: &str, secret: &str) -> Result<()> {
    if secret.contains("${") {
        return Err(DeliveryError::MissingConfigError {
            field: field_name.to_string(),
        });
    }
    if secret.trim().is_empty() {
        // Never echo the secret back.
        return Err(invalid(field_name, "", "Secret cannot be empty"));
    }
    Ok(())
}

/// The directory is created at startup when missing, but an existing regular
/// file in its place can never work.
pub fn validate_data_dir(field_name: &str, dir: &str) -> Result<()> {
    if dir.trim().is_empty() {
        return Err(invalid(field_name, dir, "Path cannot be empty"));
    }
    if dir.contains('\0') {
        return Err(invalid(field_name, dir, "Path contains null bytes"));
    }
    let path = Path::new(dir);
    if path.exists() && !path.is_dir() {
        return Err(invalid(field_name, dir, "Path exists and is not a directory"));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(invalid(
            field_name,
            &value.to_string(),
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if allowed.contains(&value) {
        return Ok(());
    }
    Err(invalid(
        field_name,
        value,
        format!("Expected one of: {}", allowed.join(", ")),
    ))
}
