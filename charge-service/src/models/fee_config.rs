//! Fee configuration model.

use crate::models::lenient;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use validator::{Validate, ValidationError};

/// Whether a fee is charged per kilogram or as a fixed amount per batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeeBasis {
    #[default]
    PerKg,
    PerBatch,
}

impl FeeBasis {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeeBasis::PerKg => "PER_KG",
            FeeBasis::PerBatch => "PER_BATCH",
        }
    }

    /// Recognised spellings only.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().replace(['-', ' '], "_").as_str() {
            "PER_KG" | "KG" => Some(FeeBasis::PerKg),
            "PER_BATCH" | "BATCH" => Some(FeeBasis::PerBatch),
            _ => None,
        }
    }

    /// Unknown spellings fall back to per-kg.
    pub fn from_string(s: &str) -> Self {
        Self::parse(s).unwrap_or(FeeBasis::PerKg)
    }
}

impl<'de> Deserialize<'de> for FeeBasis {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(Value::String(s)) => FeeBasis::from_string(&s),
            _ => FeeBasis::PerKg,
        })
    }
}

/// Pelleting fee configuration as stored by the backend.
///
/// Older payloads use `pelletingPerKg` / `pelletingFeePerKg` (and the
/// formulation equivalents) for the fee amounts. On input the first non-null
/// of the canonical name, the `*PerKg` name and the `*FeePerKg` name wins;
/// the canonical names are always emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawFeeConfiguration")]
pub struct FeeConfiguration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub pelleting_fee_type: FeeBasis,
    pub pelleting_fee: Decimal,
    pub system_fee_percent: Decimal,
    pub formulation_fee_type: FeeBasis,
    pub formulation_fee: Decimal,
    pub active: bool,
    pub archived: bool,
}

/// Wire shape accepted for [`FeeConfiguration`], every historical field name
/// kept apart so none of them can collide.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFeeConfiguration {
    #[serde(default, deserialize_with = "lenient::optional_id")]
    id: Option<String>,
    #[serde(default, deserialize_with = "lenient::text_or_empty")]
    name: String,
    #[serde(default)]
    pelleting_fee_type: FeeBasis,
    #[serde(default)]
    pelleting_fee: Option<Value>,
    #[serde(default)]
    pelleting_per_kg: Option<Value>,
    #[serde(default)]
    pelleting_fee_per_kg: Option<Value>,
    #[serde(default)]
    system_fee_percent: Option<Value>,
    #[serde(default)]
    system_fee_pct: Option<Value>,
    #[serde(default)]
    formulation_fee_type: FeeBasis,
    #[serde(default)]
    formulation_fee: Option<Value>,
    #[serde(default)]
    formulation_per_kg: Option<Value>,
    #[serde(default)]
    formulation_fee_per_kg: Option<Value>,
    #[serde(default = "default_active", deserialize_with = "lenient::flag_or_true")]
    active: bool,
    #[serde(default, deserialize_with = "lenient::flag_or_false")]
    archived: bool,
}

impl From<RawFeeConfiguration> for FeeConfiguration {
    fn from(raw: RawFeeConfiguration) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            pelleting_fee_type: raw.pelleting_fee_type,
            pelleting_fee: lenient::first_decimal(&[
                &raw.pelleting_fee,
                &raw.pelleting_per_kg,
                &raw.pelleting_fee_per_kg,
            ]),
            system_fee_percent: lenient::first_decimal(&[
                &raw.system_fee_percent,
                &raw.system_fee_pct,
            ]),
            formulation_fee_type: raw.formulation_fee_type,
            formulation_fee: lenient::first_decimal(&[
                &raw.formulation_fee,
                &raw.formulation_per_kg,
                &raw.formulation_fee_per_kg,
            ]),
            active: raw.active,
            archived: raw.archived,
        }
    }
}

fn default_active() -> bool {
    true
}

impl Default for FeeConfiguration {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            pelleting_fee_type: FeeBasis::PerKg,
            pelleting_fee: Decimal::ZERO,
            system_fee_percent: Decimal::ZERO,
            formulation_fee_type: FeeBasis::PerKg,
            formulation_fee: Decimal::ZERO,
            active: default_active(),
            archived: false,
        }
    }
}

impl FeeConfiguration {
    /// Usable for new invoices: active and not archived.
    pub fn is_billable(&self) -> bool {
        self.active && !self.archived
    }
}

/// A fee configuration as typed into the form, checked before it is submitted.
///
/// Unlike [`FeeConfiguration`] nothing is coerced here: a fee that is not a
/// number, or a basis that is not `PER_KG`/`PER_BATCH`, is a field error.
/// Absent amounts count as zero.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FeeConfigurationDraft {
    #[validate(
        required(message = "Name is required"),
        length(min = 1, max = 100, message = "Name is required (max 100 characters)")
    )]
    pub name: Option<String>,

    #[serde(default)]
    #[validate(custom(function = "known_basis"))]
    pub pelleting_fee_type: Value,

    #[serde(default)]
    #[validate(custom(function = "fee_amount"))]
    pub pelleting_fee: Value,

    #[serde(default)]
    #[validate(custom(function = "percentage"))]
    pub system_fee_percent: Value,

    #[serde(default)]
    #[validate(custom(function = "known_basis"))]
    pub formulation_fee_type: Value,

    #[serde(default)]
    #[validate(custom(function = "fee_amount"))]
    pub formulation_fee: Value,

    pub active: Option<bool>,
    pub archived: Option<bool>,
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

fn known_basis(value: &Value) -> Result<(), ValidationError> {
    match value {
        Value::Null => Ok(()),
        Value::String(s) if FeeBasis::parse(s).is_some() => Ok(()),
        _ => Err(invalid("fee_basis", "Fee type must be PER_KG or PER_BATCH")),
    }
}

fn fee_amount(value: &Value) -> Result<(), ValidationError> {
    if value.is_null() {
        return Ok(());
    }
    match lenient::parse_number(value) {
        Some(fee) if fee >= Decimal::ZERO => Ok(()),
        Some(_) => Err(invalid("non_negative", "Fee must not be negative")),
        None => Err(invalid("numeric", "Fee must be a number")),
    }
}

fn percentage(value: &Value) -> Result<(), ValidationError> {
    if value.is_null() {
        return Ok(());
    }
    match lenient::parse_number(value) {
        Some(pct) if pct >= Decimal::ZERO && pct <= Decimal::ONE_HUNDRED => Ok(()),
        Some(_) => Err(invalid(
            "percentage",
            "System fee percent must be between 0 and 100",
        )),
        None => Err(invalid("numeric", "System fee percent must be a number")),
    }
}
