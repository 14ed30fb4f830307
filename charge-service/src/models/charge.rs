//! Charge input and breakdown models.

use crate::models::lenient;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Decimal places shown for money amounts.
pub const DISPLAY_SCALE: u32 = 2;

/// Quantity and price context for one calculation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeInput {
    #[serde(default, deserialize_with = "lenient::decimal_or_zero")]
    pub quantity_kg: Decimal,
    /// Selling price (preview) or formulation cost (invoice) per kg. Only
    /// feeds the system-fee base.
    #[serde(
        default,
        alias = "costPerKg",
        alias = "unitPriceOrCost",
        deserialize_with = "lenient::decimal_or_zero"
    )]
    pub unit_price_per_kg: Decimal,
}

impl ChargeInput {
    pub fn new(quantity_kg: Decimal, unit_price_per_kg: Decimal) -> Self {
        Self {
            quantity_kg,
            unit_price_per_kg,
        }
    }

    /// Absent values count as zero.
    pub fn from_options(quantity_kg: Option<Decimal>, unit_price_per_kg: Option<Decimal>) -> Self {
        Self::new(
            quantity_kg.unwrap_or(Decimal::ZERO),
            unit_price_per_kg.unwrap_or(Decimal::ZERO),
        )
    }
}

/// Result of a charge calculation. Not persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeBreakdown {
    pub pelleting_charge: Decimal,
    pub system_charge: Decimal,
    pub formulation_charge: Decimal,
    /// Quantity times unit price; the base the system fee applies to.
    pub product_value: Decimal,
    pub total: Decimal,
}

impl ChargeBreakdown {
    /// Copy with every amount rounded half-up to two places for display.
    pub fn rounded(&self) -> Self {
        Self {
            pelleting_charge: round_for_display(self.pelleting_charge),
            system_charge: round_for_display(self.system_charge),
            formulation_charge: round_for_display(self.formulation_charge),
            product_value: round_for_display(self.product_value),
            total: round_for_display(self.total),
        }
    }
}

/// Half-up (midpoint away from zero) rounding to [`DISPLAY_SCALE`], padded so
/// `6400` renders as `6400.00`.
pub fn round_for_display(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(DISPLAY_SCALE);
    rounded
}
