//! Permissive numeric decoding.
//!
//! Fee configurations and batches arrive from forms and from a backend whose
//! schema has drifted over time. Amounts may be JSON numbers, numeric
//! strings, `null`, or missing entirely. Anything that is not a finite number
//! decodes as zero instead of failing the whole payload.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Coerce an arbitrary JSON value to a decimal, or zero.
pub fn coerce_decimal(value: &Value) -> Decimal {
    parse_number(value).unwrap_or(Decimal::ZERO)
}

/// The decimal a JSON number or numeric string denotes; `None` for anything
/// else.
pub fn parse_number(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(Decimal::from(i))
            } else if let Some(u) = n.as_u64() {
                Some(Decimal::from(u))
            } else {
                parse_decimal(&n.to_string()).or_else(|| n.as_f64().and_then(Decimal::from_f64))
            }
        }
        Value::String(s) => parse_decimal(s),
        _ => None,
    }
}

/// First value in `candidates` that is present and not `null`, coerced.
pub fn first_decimal(candidates: &[&Option<Value>]) -> Decimal {
    candidates
        .iter()
        .find_map(|c| c.as_ref().filter(|v| !v.is_null()))
        .map(coerce_decimal)
        .unwrap_or(Decimal::ZERO)
}

/// Truthiness of a flag field. Booleans, `"true"`/`"false"` strings and
/// numbers are understood; `null` and anything else yields `default`.
pub fn coerce_flag(value: &Value, default: bool) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => true,
            "false" | "0" | "no" => false,
            _ => default,
        },
        Value::Number(_) => parse_number(value).map(|d| !d.is_zero()).unwrap_or(default),
        _ => default,
    }
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::from_scientific(trimmed).ok())
}

/// `deserialize_with` adapter: any value, `null` included, becomes a decimal.
/// Pair with `#[serde(default)]` so a missing field is zero as well.
pub fn decimal_or_zero<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(coerce_decimal).unwrap_or(Decimal::ZERO))
}

/// Like [`decimal_or_zero`] but keeps absence distinguishable.
pub fn optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(v) => Some(coerce_decimal(&v)),
    })
}

/// Any scalar rendered as a string; used for backend ids that may be numeric.
pub fn optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// `deserialize_with` adapter: flag defaulting to `true` when null or absent.
/// Pair with `#[serde(default = ...)]` returning `true`.
pub fn flag_or_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(|v| coerce_flag(v, true)).unwrap_or(true))
}

/// `deserialize_with` adapter: flag defaulting to `false` when null or absent.
pub fn flag_or_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(|v| coerce_flag(v, false)).unwrap_or(false))
}

/// `deserialize_with` adapter: any scalar as text, `null` and others as empty.
pub fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    #[test]
    fn integers_and_floats_decode_exactly() {
        assert_eq!(coerce_decimal(&json!(1000)), Decimal::from(1000));
        assert_eq!(coerce_decimal(&json!(0.1)), Decimal::from_str("0.1").unwrap());
        assert_eq!(coerce_decimal(&json!(-2.5)), Decimal::from_str("-2.5").unwrap());
    }

    #[test]
    fn numeric_strings_decode() {
        assert_eq!(coerce_decimal(&json!("12.50")), Decimal::from_str("12.5").unwrap());
        assert_eq!(coerce_decimal(&json!("  7 ")), Decimal::from(7));
        assert_eq!(coerce_decimal(&json!("1e3")), Decimal::from(1000));
    }

    #[test]
    fn non_numeric_values_are_zero() {
        for value in [
            json!(null),
            json!(""),
            json!("abc"),
            json!("12kg"),
            json!(true),
            json!([1, 2]),
            json!({ "amount": 5 }),
        ] {
            assert_eq!(coerce_decimal(&value), Decimal::ZERO, "value: {value}");
        }
    }

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "decimal_or_zero")]
        amount: Decimal,
        #[serde(default, deserialize_with = "optional_decimal")]
        maybe: Option<Decimal>,
        #[serde(default, deserialize_with = "optional_id")]
        id: Option<String>,
    }

    #[test]
    fn missing_and_null_fields() {
        let sample: Sample = serde_json::from_value(json!({})).unwrap();
        assert_eq!(sample.amount, Decimal::ZERO);
        assert_eq!(sample.maybe, None);
        assert_eq!(sample.id, None);

        let sample: Sample =
            serde_json::from_value(json!({ "amount": null, "maybe": null, "id": null })).unwrap();
        assert_eq!(sample.amount, Decimal::ZERO);
        assert_eq!(sample.maybe, None);
    }

    #[test]
    fn present_values_are_kept() {
        let sample: Sample =
            serde_json::from_value(json!({ "amount": "3.25", "maybe": "x", "id": 17 })).unwrap();
        assert_eq!(sample.amount, Decimal::from_str("3.25").unwrap());
        assert_eq!(sample.maybe, Some(Decimal::ZERO));
        assert_eq!(sample.id.as_deref(), Some("17"));
    }

    #[test]
    fn parse_number_distinguishes_garbage() {
        assert_eq!(parse_number(&json!("4.5")), Some(Decimal::from_str("4.5").unwrap()));
        assert_eq!(parse_number(&json!("abc")), None);
        assert_eq!(parse_number(&json!(null)), None);
    }

    #[test]
    fn first_decimal_skips_null_and_absent() {
        let absent: Option<Value> = None;
        let null = Some(json!(null));
        let five = Some(json!(5));
        let seven = Some(json!("7"));

        assert_eq!(first_decimal(&[&absent, &null, &five, &seven]), Decimal::from(5));
        assert_eq!(first_decimal(&[&seven, &five]), Decimal::from(7));
        assert_eq!(first_decimal(&[&absent, &null]), Decimal::ZERO);

        let garbage = Some(json!("n/a"));
        assert_eq!(first_decimal(&[&garbage, &five]), Decimal::ZERO);
    }

    #[test]
    fn flags_understand_strings_numbers_and_null() {
        assert!(!coerce_flag(&json!("false"), true));
        assert!(coerce_flag(&json!("TRUE"), false));
        assert!(coerce_flag(&json!(1), false));
        assert!(!coerce_flag(&json!(0), true));
        assert!(coerce_flag(&json!(null), true));
        assert!(!coerce_flag(&json!("maybe"), false));
    }

    #[derive(Debug, Deserialize)]
    struct Labelled {
        #[serde(default, deserialize_with = "text_or_empty")]
        name: String,
        #[serde(default = "yes", deserialize_with = "flag_or_true")]
        active: bool,
        #[serde(default, deserialize_with = "flag_or_false")]
        archived: bool,
    }

    fn yes() -> bool {
        true
    }

    #[test]
    fn null_text_and_flags_take_defaults() {
        let labelled: Labelled =
            serde_json::from_value(json!({ "name": null, "active": null, "archived": null }))
                .unwrap();
        assert_eq!(labelled.name, "");
        assert!(labelled.active);
        assert!(!labelled.archived);

        let labelled: Labelled =
            serde_json::from_value(json!({ "name": 42, "active": "false", "archived": "true" }))
                .unwrap();
        assert_eq!(labelled.name, "42");
        assert!(!labelled.active);
        assert!(labelled.archived);
    }
}
