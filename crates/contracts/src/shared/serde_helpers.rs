//! Lenient deserializers for report payloads
//!
//! Report files are hand-edited, so scalar fields arrive as strings, numbers
//! or `null` depending on who wrote them. Everything is normalized to strings.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// String, number or bool -> `Some(String)`; `null` -> `None`
pub fn lenient_string_opt<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}

/// Same as [`lenient_string_opt`], but `null` becomes an empty string
pub fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_string_opt(deserializer).map(Option::unwrap_or_default)
}
