use axum::Json;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{lenient, ChargeBreakdown, ChargeInput, FeeConfiguration};
use crate::services::{calculate, record_calculation};

/// Live preview request from the fee configuration form.
///
/// The configuration is the one being edited, saved or not. Numbers are
/// decoded leniently so a half-typed form still yields a preview; a missing
/// or `null` configuration previews as all-zero fees.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewChargesRequest {
    #[serde(default)]
    pub config: Option<FeeConfiguration>,
    #[serde(default, deserialize_with = "lenient::decimal_or_zero")]
    pub quantity_kg: Decimal,
    #[serde(
        default,
        alias = "costPerKg",
        alias = "unitPriceOrCost",
        deserialize_with = "lenient::decimal_or_zero"
    )]
    pub unit_price_per_kg: Decimal,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewChargesResponse {
    pub input: ChargeInput,
    /// Full precision amounts.
    pub breakdown: ChargeBreakdown,
    /// Amounts rounded to two places.
    pub display: ChargeBreakdown,
}

#[tracing::instrument(skip_all)]
pub async fn preview_charges(
    Json(request): Json<PreviewChargesRequest>,
) -> Json<PreviewChargesResponse> {
    let input = ChargeInput::new(request.quantity_kg, request.unit_price_per_kg);
    let config = request.config.unwrap_or_default();
    let breakdown = calculate(&config, &input);
    record_calculation("preview");

    tracing::debug!(
        quantity_kg = %input.quantity_kg,
        total = %breakdown.total,
        "Charge preview computed"
    );

    Json(PreviewChargesResponse {
        input,
        display: breakdown.rounded(),
        breakdown,
    })
}
