//! Field deserializers for PassioGo's loosely typed JSON.
//!
//! The upstream sends the same field as a string in one system and as a
//! number in another, uses `""` for "no value", and encodes flags as
//! `"0"`/`"1"`. Every deserializer here yields `None` for absent, `null`
//! and empty-string input, so DTO fields can all be `#[serde(default)]`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

/// Text value. Numbers and booleans are rendered as text.
pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<Value>::deserialize(d)?.as_ref().and_then(to_string))
}

/// Integer value, from a JSON number or a numeric string.
pub fn int<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    Ok(Option::<Value>::deserialize(d)?.as_ref().and_then(to_int))
}

/// Floating point value, from a JSON number or a numeric string.
pub fn float<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Ok(Option::<Value>::deserialize(d)?.as_ref().and_then(to_float))
}

/// Boolean flag, from a JSON bool, a number, or an integer string.
pub fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
    Ok(Option::<Value>::deserialize(d)?.as_ref().and_then(to_flag))
}

/// Keyed collection that the upstream sends as `[]` when it is empty.
///
/// Entries keep upstream order. A non-empty list is keyed by position.
/// An entry that does not decode as `T` is logged and skipped.
pub fn map_or_list<'de, D, T>(d: D) -> Result<Vec<(String, T)>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let entries: Vec<(String, Value)> = match Option::<Value>::deserialize(d)? {
        Some(Value::Object(map)) => map.into_iter().collect(),
        Some(Value::Array(list)) => list
            .into_iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), v))
            .collect(),
        Some(other) => {
            warn!(value = %other, "expected an object or a list");
            Vec::new()
        }
        None => Vec::new(),
    };

    Ok(entries
        .into_iter()
        .filter_map(|(key, value)| match serde_json::from_value(value) {
            Ok(entry) => Some((key, entry)),
            Err(e) => {
                warn!(key = %key, error = %e, "skipping undecodable entry");
                None
            }
        })
        .collect())
}

pub(crate) fn to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

pub(crate) fn to_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => parse_int(s),
        _ => None,
    }
}

pub(crate) fn to_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub(crate) fn to_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim() {
            "true" => Some(true),
            "false" => Some(false),
            other => parse_int(other).map(|n| n != 0),
        },
        other => to_int(other).map(|n| n != 0),
    }
}

/// Integer prefix parse: `"12"`, `" 12 "` and `"12.5"` all give 12.
fn parse_int(s: &str) -> Option<i64> {
    let s = s.trim();
    if let Ok(n) = s.parse::<i64>() {
        return Some(n);
    }
    s.parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(|f| f.trunc() as i64)
}
