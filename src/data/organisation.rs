//! Organisation records as returned by the GraphQL endpoint.

use serde::{Deserialize, Deserializer, Serialize};

/// One organisation from the dataset.
///
/// Only `score` drives the scene; the other fields are shown in the details
/// panel. Numeric fields accept JSON numbers or decimal strings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organisation {
    /// ENS name, used as the identifier.
    pub ens_name: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub address: String,
    #[serde(deserialize_with = "number_or_string")]
    pub score: f64,
    /// Assets under management.
    #[serde(default, deserialize_with = "number_or_string")]
    pub aum: f64,
    #[serde(default, deserialize_with = "count_or_string")]
    pub token_count: u64,
    #[serde(default, deserialize_with = "number_or_string")]
    pub activity: f64,
}

impl Organisation {
    /// Shortened address for compact UI rows (`0x1234…abcd`).
    pub fn short_address(&self) -> String {
        let address = self.address.as_str();
        if address.len() <= 12 || !address.is_char_boundary(6) {
            return address.to_string();
        }
        let tail_start = address.len() - 4;
        if !address.is_char_boundary(tail_start) {
            return address.to_string();
        }
        format!("{}…{}", &address[..6], &address[tail_start..])
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    String(String),
    Null,
}

fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(value) => Ok(value),
        NumberOrString::String(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|e| serde::de::Error::custom(format!("invalid number {text:?}: {e}"))),
        NumberOrString::Null => Ok(0.0),
    }
}

fn string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn count_or_string<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = number_or_string(deserializer)?;
    if value.is_finite() && value >= 0.0 {
        Ok(value.round() as u64)
    } else {
        Err(serde::de::Error::custom(format!(
            "token count must be a non-negative number, got {value}"
        )))
    }
}
