//! Field deserializers that never fail on an unexpected JSON shape.
//!
//! Rows in the `products` table were written by several versions of the
//! importer, so a single malformed column must not reject the whole page.

use std::str::FromStr;

use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::products::{Dimension, DimensionValue};

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub(crate) fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_text(Value::deserialize(deserializer)?))
}

pub(crate) fn code<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_text(Value::deserialize(deserializer)?).unwrap_or_default())
}

pub(crate) fn integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    })
}

pub(crate) fn decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_owned(),
        _ => return Ok(None),
    };
    Ok(Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DimensionsShape {
    Map(IndexMap<String, Value>),
    Other(#[allow(dead_code)] IgnoredAny),
}

pub(crate) fn dimensions<'de, D>(
    deserializer: D,
) -> Result<Option<IndexMap<String, Dimension>>, D::Error>
where
    D: Deserializer<'de>,
{
    let DimensionsShape::Map(entries) = DimensionsShape::deserialize(deserializer)? else {
        return Ok(None);
    };

    Ok(Some(
        entries
            .into_iter()
            .map(|(key, entry)| (key, dimension(entry)))
            .collect(),
    ))
}

fn dimension_value(value: Value) -> Option<DimensionValue> {
    match value {
        Value::Number(n) => Some(DimensionValue::Number(n)),
        Value::String(s) => Some(DimensionValue::Text(s)),
        _ => None,
    }
}

fn dimension(entry: Value) -> Dimension {
    match entry {
        Value::Object(mut fields) => Dimension {
            value: fields.remove("value").and_then(dimension_value),
            unit: fields.remove("unit").and_then(|unit| match unit {
                Value::String(s) => Some(s),
                _ => None,
            }),
        },
        // A bare scalar is a value with no unit.
        scalar => Dimension {
            value: dimension_value(scalar),
            unit: None,
        },
    }
}
