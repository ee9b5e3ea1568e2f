//! Tolerant deserializers for catalog fields.
//!
//! Catalog JSON is hand-curated and not always consistent: clocks show up as
//! `4.7`, `"4.7"` or `"4.7 GHz"`, counts occasionally as text. Every helper
//! here maps malformed input to `None` (or `0` for tiers) instead of failing
//! the whole file.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Parse the leading decimal number of `text`, ignoring any trailing unit.
///
/// `"4.70 GHz"` yields `4.7`, `"  12"` yields `12.0`, `"GHz"` yields `None`.
pub fn leading_number(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if frac_end > frac_start || digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }
    s[..end].trim_end_matches('.').parse::<f64>().ok()
}

fn value_to_f64(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => leading_number(s),
        _ => None,
    }
    .filter(|x| x.is_finite())
}

/// Number or numeric text.
pub fn number<'de, D>(d: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(d)?;
    Ok(v.as_ref().and_then(value_to_f64))
}

/// Non-negative whole count (cores, wattage, latency). Fractions are truncated.
pub fn count<'de, D>(d: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(d)?;
    Ok(v.as_ref()
        .and_then(value_to_f64)
        .filter(|x| *x >= 0.0 && *x <= u32::MAX as f64)
        .map(|x| x as u32))
}

/// Generation is only trusted when it is a JSON number; text falls through to
/// `None` so RAM can derive its DDR type from the speed string instead.
///
/// Fractions round up, so `9.5` sits above the last DDR4 generation.
pub fn generation<'de, D>(d: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(d)?;
    Ok(match v {
        Some(Value::Number(n)) => n
            .as_f64()
            .map(f64::ceil)
            .filter(|x| x.is_finite() && *x >= 0.0 && *x <= u32::MAX as f64)
            .map(|x| x as u32),
        _ => None,
    })
}

/// Tier bucket; anything unusable becomes `0`, which validation rejects.
pub fn tier<'de, D>(d: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(d)?;
    Ok(v.as_ref()
        .and_then(value_to_f64)
        .filter(|x| *x >= 0.0 && *x <= u8::MAX as f64)
        .map(|x| x as u8)
        .unwrap_or(0))
}

/// Free text; non-string JSON values and blank strings are dropped.
pub fn text<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(d)?;
    Ok(match v {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        _ => None,
    })
}

/// Record name; a missing or non-string name becomes empty.
pub fn name<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text(d)?.unwrap_or_default())
}
