//! Charge service: pelleting charge breakdowns for fee-configuration previews
//! and invoice pre-fill.

pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
