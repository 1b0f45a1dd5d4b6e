//! Number fields that the backend sometimes serializes as strings
//! (decimal columns come back as `"1500.00"`).

use serde::de::{self, Deserializer};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(serde_json::Number),
    Text(String),
}

fn to_f64<E: de::Error>(value: NumberOrString) -> Result<f64, E> {
    match value {
        NumberOrString::Number(n) => n
            .as_f64()
            .ok_or_else(|| E::custom(format!("number out of range: {n}"))),
        NumberOrString::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| E::custom(format!("expected a number, got {s:?}"))),
    }
}

/// `null` reads as zero, like a missing field with `#[serde(default)]`
pub fn f64_lenient<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_f64_lenient(deserializer)?.unwrap_or(0.0))
}

pub fn opt_f64_lenient<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<NumberOrString>::deserialize(deserializer)?
        .map(to_f64)
        .transpose()
}

/// Gram weights: must be a non-negative whole number once parsed.
pub fn grams<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = to_f64::<D::Error>(NumberOrString::deserialize(deserializer)?)?;
    if value < 0.0 || value.fract() != 0.0 || value > f64::from(u32::MAX) {
        return Err(de::Error::custom(format!("invalid gram weight: {value}")));
    }
    Ok(value as u32)
}

/// Whole non-negative count; `null` reads as zero
pub fn count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<NumberOrString>::deserialize(deserializer)? else {
        return Ok(0);
    };
    let value = to_f64::<D::Error>(raw)?;
    if value < 0.0 || value.fract() != 0.0 {
        return Err(de::Error::custom(format!("invalid count: {value}")));
    }
    Ok(value as u64)
}
