//! Test helper module for charge-service integration tests.
//!
//! Spawns the service on a random port with an in-memory backend.

#![allow(dead_code)]

use async_trait::async_trait;
use charge_service::config::{BackendConfig, ChargeConfig};
use charge_service::models::{FeeConfiguration, PelletingBatch};
use charge_service::services::{BackendClient, BackendError};
use charge_service::startup::Application;
use service_core::config::Config as CoreConfig;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// In-memory stand-in for the feed-mill backend.
#[derive(Default)]
pub struct MockBackendClient {
    fee_configurations: RwLock<HashMap<String, FeeConfiguration>>,
    pelleting_batches: RwLock<HashMap<String, PelletingBatch>>,
    unavailable: RwLock<bool>,
}

impl MockBackendClient {
    pub async fn insert_fee_configuration(&self, id: &str, config: FeeConfiguration) {
        self.fee_configurations
            .write()
            .await
            .insert(id.to_string(), config);
    }

    pub async fn insert_pelleting_batch(&self, id: &str, batch: PelletingBatch) {
        self.pelleting_batches
            .write()
            .await
            .insert(id.to_string(), batch);
    }

    pub async fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.write().await = unavailable;
    }

    async fn check_available(&self) -> Result<(), BackendError> {
        if *self.unavailable.read().await {
            return Err(BackendError::Unavailable("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl BackendClient for MockBackendClient {
    async fn fetch_fee_configuration(&self, id: &str) -> Result<FeeConfiguration, BackendError> {
        self.check_available().await?;
        self.fee_configurations
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| BackendError::NotFound {
                resource: "fee-configurations",
                id: id.to_string(),
            })
    }

    async fn fetch_pelleting_batch(&self, id: &str) -> Result<PelletingBatch, BackendError> {
        self.check_available().await?;
        self.pelleting_batches
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| BackendError::NotFound {
                resource: "pelleting-batches",
                id: id.to_string(),
            })
    }
}

pub fn test_config() -> ChargeConfig {
    ChargeConfig {
        common: CoreConfig { port: 0 },
        service_name: "charge-service-test".to_string(),
        log_level: "debug".to_string(),
        otlp_endpoint: None,
        backend: BackendConfig {
            url: "http://127.0.0.1:9".to_string(),
            timeout: Duration::from_millis(500),
        },
    }
}

/// Test application wrapper for integration tests.
pub struct TestApp {
    pub http_address: String,
    pub http_port: u16,
    pub backend: Arc<MockBackendClient>,
    pub client: reqwest::Client,
}

impl TestApp {
    /// Spawn a new test application on a random port.
    pub async fn spawn() -> Self {
        let backend = Arc::new(MockBackendClient::default());

        let app = Application::build_with_backend(test_config(), backend.clone())
            .await
            .expect("Failed to build test application");

        let http_port = app.http_port();
        let http_address = format!("http://127.0.0.1:{}", http_port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", http_address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }

        TestApp {
            http_address,
            http_port,
            backend,
            client,
        }
    }

    pub async fn post_json(&self, path: &str, body: &serde_json::Value) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.http_address, path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }
}
