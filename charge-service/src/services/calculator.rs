//! Charge breakdown calculation.
//!
//! One shared implementation for the configuration preview and the invoice
//! pre-fill. Pure and infallible: arithmetic saturates at the decimal range
//! instead of panicking, and callers are expected to have coerced missing or
//! non-numeric input to zero already (see [`crate::models::lenient`]).

use crate::models::{ChargeBreakdown, ChargeInput, FeeBasis, FeeConfiguration, PelletingBatch};
use rust_decimal::Decimal;

/// Compute pelleting, system and formulation charges plus their total.
///
/// ```text
/// pelleting    = basis == PER_KG ? qty * pelletingFee : pelletingFee
/// formulation  = basis == PER_KG ? qty * formulationFee : formulationFee
/// productValue = qty * unitPrice
/// system       = systemFeePercent / 100 * productValue
/// total        = pelleting + system + formulation
/// ```
pub fn calculate(config: &FeeConfiguration, input: &ChargeInput) -> ChargeBreakdown {
    let quantity = input.quantity_kg;

    let pelleting_charge = basis_charge(config.pelleting_fee_type, config.pelleting_fee, quantity);
    let formulation_charge =
        basis_charge(config.formulation_fee_type, config.formulation_fee, quantity);

    let product_value = quantity.saturating_mul(input.unit_price_per_kg);
    let system_charge =
        (config.system_fee_percent / Decimal::ONE_HUNDRED).saturating_mul(product_value);

    let total = pelleting_charge
        .saturating_add(system_charge)
        .saturating_add(formulation_charge);

    ChargeBreakdown {
        pelleting_charge,
        system_charge,
        formulation_charge,
        product_value,
        total,
    }
}

/// Charges for a pelleting batch, priced at its formulation's cost per kg.
pub fn calculate_for_batch(config: &FeeConfiguration, batch: &PelletingBatch) -> ChargeBreakdown {
    calculate(config, &batch_input(batch))
}

/// The quantity and unit cost an invoice for `batch` is based on.
fn batch_input(batch: &PelletingBatch) -> ChargeInput {
    ChargeInput::new(batch_quantity_kg(batch), batch.cost_per_kg())
}

/// Actual yield when it has been recorded as a positive amount, otherwise
/// the target quantity.
pub fn batch_quantity_kg(batch: &PelletingBatch) -> Decimal {
    match batch.actual_yield_kg {
        Some(yield_kg) if yield_kg > Decimal::ZERO => yield_kg,
        _ => batch.target_quantity_kg,
    }
}

fn basis_charge(basis: FeeBasis, fee: Decimal, quantity: Decimal) -> Decimal {
    match basis {
        FeeBasis::PerKg => quantity.saturating_mul(fee),
        FeeBasis::PerBatch => fee,
    }
}
