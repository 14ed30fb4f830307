use axum::{http::StatusCode, Json};
use validator::Validate;

use crate::models::FeeConfigurationDraft;
use service_core::error::AppError;

/// Check a fee configuration before it is submitted to the backend.
///
/// Name required (max 100 characters), fees numeric and non-negative, system
/// fee percent numeric within 0..=100, fee types `PER_KG` or `PER_BATCH`.
/// The charge calculator never applies these rules itself.
#[tracing::instrument(skip_all)]
pub async fn validate_fee_configuration(
    Json(draft): Json<FeeConfigurationDraft>,
) -> Result<StatusCode, AppError> {
    draft.validate().map_err(|e| {
        tracing::debug!(name = ?draft.name, error = %e, "Fee configuration rejected");
        e
    })?;
    Ok(StatusCode::NO_CONTENT)
}
