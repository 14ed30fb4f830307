//! HTTP handlers for charge-service.

pub mod fee_config;
pub mod health;
pub mod invoice;
pub mod preview;

pub use fee_config::validate_fee_configuration;
pub use health::{health_check, metrics_handler, readiness_check};
pub use invoice::prefill_invoice;
pub use preview::preview_charges;
