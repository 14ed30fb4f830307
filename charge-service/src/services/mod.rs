//! Services module for charge-service.

pub mod backend;
pub mod calculator;
pub mod metrics;

pub use backend::{BackendClient, BackendError, HttpBackendClient};
pub use calculator::{batch_quantity_kg, calculate, calculate_for_batch};
pub use metrics::{get_metrics, init_metrics, record_backend_request, record_calculation};
