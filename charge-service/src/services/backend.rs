//! Read-only access to the feed-mill REST backend.
//!
//! Invoice pre-fill needs the selected fee configuration and the pelleting
//! batch being invoiced. Both are owned by the backend; this module only
//! fetches them.

use crate::models::{FeeConfiguration, PelletingBatch};
use crate::services::metrics::record_backend_request;
use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use service_core::error::AppError;
use std::time::Duration;
use thiserror::Error;

const FEE_CONFIGURATIONS: &str = "fee-configurations";
const PELLETING_BATCHES: &str = "pelleting-batches";

/// Error type for backend lookups.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: String },

    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),

    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    #[error("Backend returned status {0}")]
    UnexpectedStatus(u16),

    #[error("Failed to decode backend response: {0}")]
    Decode(String),
}

impl From<BackendError> for AppError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::NotFound { .. } => AppError::NotFound(anyhow::Error::new(err)),
            BackendError::InvalidUrl(_) => AppError::ConfigError(anyhow::Error::new(err)),
            BackendError::Unavailable(_)
            | BackendError::UnexpectedStatus(_)
            | BackendError::Decode(_) => AppError::BadGateway(err.to_string()),
        }
    }
}

#[async_trait]
pub trait BackendClient: Send + Sync {
    async fn fetch_fee_configuration(&self, id: &str) -> Result<FeeConfiguration, BackendError>;

    async fn fetch_pelleting_batch(&self, id: &str) -> Result<PelletingBatch, BackendError>;
}

/// HTTP implementation against `{base}/api/<collection>/<id>`.
#[derive(Clone)]
pub struct HttpBackendClient {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpBackendClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, BackendError> {
        let base_url =
            Url::parse(base_url).map_err(|e| BackendError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(BackendError::InvalidUrl(base_url.to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::Unavailable(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    fn resource_url(&self, collection: &str, id: &str) -> Result<Url, BackendError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| BackendError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["api", collection, id]);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        collection: &'static str,
        id: &str,
    ) -> Result<T, BackendError> {
        let url = self.resource_url(collection, id)?;
        tracing::debug!(url = %url, "Fetching from backend");

        let result = self.fetch(url, collection, id).await;
        let outcome = match &result {
            Ok(_) => "ok",
            Err(BackendError::NotFound { .. }) => "not_found",
            Err(_) => "error",
        };
        record_backend_request(collection, outcome);
        result
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        url: Url,
        collection: &'static str,
        id: &str,
    ) -> Result<T, BackendError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| BackendError::Unavailable(e.to_string()))?;

        match response.status() {
            status if status.is_success() => response
                .json::<T>()
                .await
                .map_err(|e| BackendError::Decode(e.to_string())),
            StatusCode::NOT_FOUND => Err(BackendError::NotFound {
                resource: collection,
                id: id.to_string(),
            }),
            status => Err(BackendError::UnexpectedStatus(status.as_u16())),
        }
    }
}

#[async_trait]
impl BackendClient for HttpBackendClient {
    async fn fetch_fee_configuration(&self, id: &str) -> Result<FeeConfiguration, BackendError> {
        self.get_json(FEE_CONFIGURATIONS, id).await
    }

    async fn fetch_pelleting_batch(&self, id: &str) -> Result<PelletingBatch, BackendError> {
        self.get_json(PELLETING_BATCHES, id).await
    }
}
