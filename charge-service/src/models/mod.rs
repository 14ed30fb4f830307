//! Domain models for charge-service.

mod batch;
mod charge;
mod fee_config;
pub mod lenient;

pub use batch::{BatchStatus, FormulationRef, PelletingBatch};
pub use charge::{round_for_display, ChargeBreakdown, ChargeInput, DISPLAY_SCALE};
pub use fee_config::{FeeBasis, FeeConfiguration, FeeConfigurationDraft};
