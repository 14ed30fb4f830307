//! Application startup and lifecycle management.

use crate::config::ChargeConfig;
use crate::handlers::{
    health_check, metrics_handler, prefill_invoice, preview_charges, readiness_check,
    validate_fee_configuration,
};
use crate::services::{init_metrics, BackendClient, HttpBackendClient};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{metrics_middleware, request_id_middleware};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn BackendClient>,
}

/// Build the HTTP router for the given state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/metrics", get(metrics_handler))
        .route("/v1/charges/preview", post(preview_charges))
        .route("/v1/invoices/prefill", post(prefill_invoice))
        .route(
            "/v1/fee-configurations/validate",
            post(validate_fee_configuration),
        )
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    http_port: u16,
    http_listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with an HTTP backend client from configuration.
    pub async fn build(config: ChargeConfig) -> Result<Self, AppError> {
        let backend = HttpBackendClient::new(&config.backend.url, config.backend.timeout)
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    url = %config.backend.url,
                    "Invalid backend configuration"
                );
                AppError::from(e)
            })?;

        Self::build_with_backend(config, Arc::new(backend)).await
    }

    /// Build the application around an existing backend client.
    /// Tests use this to inject an in-memory backend.
    pub async fn build_with_backend(
        config: ChargeConfig,
        backend: Arc<dyn BackendClient>,
    ) -> Result<Self, AppError> {
        init_metrics();

        let http_addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let http_listener = TcpListener::bind(http_addr).await.map_err(|e| {
            tracing::error!(error = %e, addr = %http_addr, "Failed to bind HTTP listener");
            AppError::from(e)
        })?;
        let http_port = http_listener.local_addr()?.port();

        tracing::info!(http_port = http_port, "Charge service listener bound");

        Ok(Self {
            http_port,
            http_listener,
            state: AppState { backend },
        })
    }

    /// Get the HTTP port the server is listening on.
    pub fn http_port(&self) -> u16 {
        self.http_port
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let http_router = router(self.state);

        tracing::info!(
            service = "charge-service",
            version = env!("CARGO_PKG_VERSION"),
            http_port = self.http_port,
            "Service ready to accept connections"
        );

        axum::serve(self.http_listener, http_router)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "HTTP server error");
                std::io::Error::other(format!("HTTP server error: {}", e))
            })
    }
}
