//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::GatewayConfig;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: GatewayConfig = toml::from_str(&content)?;

    validate_config(&config)?;

    Ok(config)
}

/// Semantic validation on top of serde's syntactic checks. Catches the
/// misconfigurations that would otherwise only surface as per-request
/// fallbacks at runtime.
fn validate_config(config: &GatewayConfig) -> Result<(), ConfigError> {
    url::Url::parse(&config.origin.url)
        .map_err(|e| ConfigError::Invalid(format!("origin.url {:?}: {e}", config.origin.url)))?;

    if let Some(service_url) = &config.render.service_url {
        url::Url::parse(service_url)
            .map_err(|e| ConfigError::Invalid(format!("render.service_url {service_url:?}: {e}")))?;
    }

    if config.listener.request_timeout_secs == 0 {
        return Err(ConfigError::Invalid(
            "listener.request_timeout_secs must be greater than zero".to_string(),
        ));
    }

    Ok(())
}
