use axum::{extract::State, Json};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{BatchStatus, ChargeBreakdown};
use crate::services::{batch_quantity_kg, calculate_for_batch, record_calculation};
use crate::startup::AppState;
use service_core::error::AppError;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PrefillInvoiceRequest {
    #[validate(length(min = 1, message = "Fee configuration is required"))]
    pub fee_configuration_id: String,
    #[validate(length(min = 1, message = "Pelleting batch is required"))]
    pub pelleting_batch_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrefillInvoiceResponse {
    pub fee_configuration_id: String,
    pub pelleting_batch_id: String,
    /// Suggested invoice amount: the display-rounded total.
    pub amount: Decimal,
    pub quantity_kg: Decimal,
    pub cost_per_kg: Decimal,
    pub batch_status: BatchStatus,
    pub breakdown: ChargeBreakdown,
    pub display: ChargeBreakdown,
    pub warnings: Vec<String>,
}

/// Compute the invoice amount for a pelleting batch under a fee configuration.
///
/// Archived or inactive configurations and unfinished batches still produce an
/// amount; they are reported in `warnings` for the operator to judge.
#[tracing::instrument(skip(state, request))]
pub async fn prefill_invoice(
    State(state): State<AppState>,
    Json(request): Json<PrefillInvoiceRequest>,
) -> Result<Json<PrefillInvoiceResponse>, AppError> {
    request.validate()?;

    let (config, batch) = tokio::try_join!(
        state
            .backend
            .fetch_fee_configuration(&request.fee_configuration_id),
        state
            .backend
            .fetch_pelleting_batch(&request.pelleting_batch_id),
    )
    .map_err(|e| {
        tracing::warn!(
            fee_configuration_id = %request.fee_configuration_id,
            pelleting_batch_id = %request.pelleting_batch_id,
            error = %e,
            "Backend lookup for invoice pre-fill failed"
        );
        AppError::from(e)
    })?;

    let mut warnings = Vec::new();
    if config.archived {
        warnings.push(format!("Fee configuration '{}' is archived", config.name));
    }
    if !config.active {
        warnings.push(format!("Fee configuration '{}' is inactive", config.name));
    }
    if batch.status != BatchStatus::Completed {
        warnings.push(format!(
            "Pelleting batch is {}, not COMPLETED",
            batch.status.as_str()
        ));
    }

    let quantity_kg = batch_quantity_kg(&batch);
    let cost_per_kg = batch.cost_per_kg();
    let breakdown = calculate_for_batch(&config, &batch);
    let rounded = breakdown.rounded();
    record_calculation("invoice_prefill");

    tracing::info!(
        fee_configuration_id = %request.fee_configuration_id,
        pelleting_batch_id = %request.pelleting_batch_id,
        quantity_kg = %quantity_kg,
        cost_per_kg = %cost_per_kg,
        amount = %rounded.total,
        warnings = warnings.len(),
        "Invoice amount pre-filled"
    );

    Ok(Json(PrefillInvoiceResponse {
        fee_configuration_id: request.fee_configuration_id,
        pelleting_batch_id: request.pelleting_batch_id,
        amount: rounded.total,
        quantity_kg,
        cost_per_kg,
        batch_status: batch.status,
        breakdown,
        display: rounded,
        warnings,
    }))
}
