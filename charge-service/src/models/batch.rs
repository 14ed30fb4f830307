//! Pelleting batch model, as read from the backend.

use crate::models::lenient;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Production status of a pelleting batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BatchStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

impl BatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BatchStatus::NotStarted => "NOT_STARTED",
            BatchStatus::InProgress => "IN_PROGRESS",
            BatchStatus::Completed => "COMPLETED",
        }
    }

    /// Accepts `COMPLETED`, `Completed`, `In Progress`, `in-progress`, ...
    pub fn from_string(s: &str) -> Self {
        match s.trim().to_ascii_uppercase().replace(['-', ' '], "_").as_str() {
            "IN_PROGRESS" => BatchStatus::InProgress,
            "COMPLETED" => BatchStatus::Completed,
            _ => BatchStatus::NotStarted,
        }
    }
}

impl<'de> Deserialize<'de> for BatchStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(serde_json::Value::String(s)) => BatchStatus::from_string(&s),
            _ => BatchStatus::NotStarted,
        })
    }
}

/// The formulation a batch was produced from; only its cost matters here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormulationRef {
    #[serde(
        default,
        deserialize_with = "lenient::optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::decimal_or_zero")]
    pub cost_per_kg: Decimal,
}

/// A pelleting production run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PelletingBatch {
    #[serde(
        default,
        deserialize_with = "lenient::optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub batch_number: Option<String>,
    #[serde(default)]
    pub status: BatchStatus,
    #[serde(default, deserialize_with = "lenient::decimal_or_zero")]
    pub target_quantity_kg: Decimal,
    #[serde(default, deserialize_with = "lenient::optional_decimal")]
    pub actual_yield_kg: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formulation: Option<FormulationRef>,
}

impl PelletingBatch {
    pub fn cost_per_kg(&self) -> Decimal {
        self.formulation
            .as_ref()
            .map(|f| f.cost_per_kg)
            .unwrap_or(Decimal::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    #[test]
    fn status_parsing() {
        assert_eq!(BatchStatus::from_string("COMPLETED"), BatchStatus::Completed);
        assert_eq!(BatchStatus::from_string("Completed"), BatchStatus::Completed);
        assert_eq!(BatchStatus::from_string("In Progress"), BatchStatus::InProgress);
        assert_eq!(BatchStatus::from_string("in-progress"), BatchStatus::InProgress);
        assert_eq!(BatchStatus::from_string("Not Started"), BatchStatus::NotStarted);
        assert_eq!(BatchStatus::from_string("paused"), BatchStatus::NotStarted);
    }

    #[test]
    fn decodes_backend_batch() {
        let batch: PelletingBatch = serde_json::from_value(json!({
            "id": 7,
            "batchNumber": "PB-2024-007",
            "status": "Completed",
            "targetQuantityKg": "1200",
            "actualYieldKg": 1180.5,
            "formulation": { "id": 3, "name": "Layer mash", "costPerKg": "18.40" }
        }))
        .unwrap();

        assert_eq!(batch.id.as_deref(), Some("7"));
        assert_eq!(batch.status, BatchStatus::Completed);
        assert_eq!(batch.target_quantity_kg, Decimal::from(1200));
        assert_eq!(batch.actual_yield_kg, Some(Decimal::from_str("1180.5").unwrap()));
        assert_eq!(batch.cost_per_kg(), Decimal::from_str("18.4").unwrap());
    }

    #[test]
    fn sparse_batch_decodes_with_zero_defaults() {
        let batch: PelletingBatch =
            serde_json::from_value(json!({ "actualYieldKg": null, "formulation": null })).unwrap();

        assert_eq!(batch.status, BatchStatus::NotStarted);
        assert_eq!(batch.target_quantity_kg, Decimal::ZERO);
        assert_eq!(batch.actual_yield_kg, None);
        assert_eq!(batch.cost_per_kg(), Decimal::ZERO);
    }

    #[test]
    fn null_and_numeric_labels_decode() {
        let batch: PelletingBatch = serde_json::from_value(json!({
            "batchNumber": 2024007,
            "formulation": { "name": null, "costPerKg": 2 }
        }))
        .unwrap();

        assert_eq!(batch.batch_number.as_deref(), Some("2024007"));
        assert_eq!(batch.formulation.as_ref().and_then(|f| f.name.clone()), None);
        assert_eq!(batch.cost_per_kg(), Decimal::from(2));
    }
}
