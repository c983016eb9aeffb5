//! Lenient deserializers for client payloads.
//!
//! Browser clients send the same field as a string in one request and as a
//! number in the next (years, marketplace ids, prices). These helpers accept
//! either and hand back the textual form.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Number(serde_json::Number),
}

/// Deserialize an optional string that may also arrive as a JSON number.
///
/// Blank strings collapse to `None`. Use together with `#[serde(default)]`.
pub fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<TextOrNumber>::deserialize(deserializer)?;
    Ok(value.and_then(|v| {
        let text = match v {
            TextOrNumber::Text(s) => s,
            TextOrNumber::Number(n) => n.to_string(),
        };
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }))
}

/// Like [`string`], but yields an empty string where that yields `None`
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    string(deserializer).map(Option::unwrap_or_default)
}
