//! Configuration module for charge-service.

use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ChargeConfig {
    pub common: core_config::Config,
    pub service_name: String,
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
    pub backend: BackendConfig,
}

/// The feed-mill REST backend that owns fee configurations and batches.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub url: String,
    pub timeout: Duration,
}

impl ChargeConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;

        let timeout_ms = match env::var("BACKEND_TIMEOUT_MS") {
            Ok(raw) => raw.parse::<u64>().map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!("BACKEND_TIMEOUT_MS '{}': {}", raw, e))
            })?,
            Err(_) => 5_000,
        };

        Ok(Self {
            common,
            service_name: env::var("SERVICE_NAME").unwrap_or_else(|_| "charge-service".to_string()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            otlp_endpoint: env::var("OTLP_ENDPOINT").ok().filter(|s| !s.is_empty()),
            backend: BackendConfig {
                url: env::var("BACKEND_URL")
                    .unwrap_or_else(|_| "http://feedmill-api:8000".to_string()),
                timeout: Duration::from_millis(timeout_ms),
            },
        })
    }
}
