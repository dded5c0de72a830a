//! Forgiving field decoders for documents written by the sheet UI.
//!
//! Form inputs store numbers as strings, leave fields blank or drop them
//! entirely. Each helper here decodes one field and falls back to a
//! default instead of failing the surrounding document.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Decode `T`, or `T::default()` when the value has the wrong shape.
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

/// Decode an integer from a number or numeric string; anything else is 0.
pub fn int<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_int(&value))
}

/// Decode a float from a number or numeric string; anything else is 0.
pub fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_number(&value))
}

/// Decode a string; numbers are rendered, anything else is empty.
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_text(&value))
}

pub fn coerce_int(value: &Value) -> i32 {
    match value {
        Value::Number(n) => match n.as_i64() {
            Some(i) => clamp_i64(i),
            None => n.as_f64().map(truncate_f64).unwrap_or(0),
        },
        Value::String(s) => parse_int(s),
        _ => 0,
    }
}

pub fn coerce_number(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|f| f.is_finite()).unwrap_or(0.0)
}

pub fn coerce_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

/// Read the leading integer of form text, the way a number input does:
/// `"2d6"` is 2, `"3.5"` is 3, and text with no leading digits is 0.
pub fn parse_int(s: &str) -> i32 {
    let s = s.trim_start();
    let (negative, rest) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..end];
    if digits.is_empty() {
        return 0;
    }
    // Only overflow can fail here
    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    clamp_i64(if negative { -magnitude } else { magnitude })
}

fn clamp_i64(i: i64) -> i32 {
    i.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

fn truncate_f64(f: f64) -> i32 {
    if f.is_finite() {
        f.trunc().clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
    } else {
        0
    }
}
