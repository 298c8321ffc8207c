//! Serde support for optional compiled patterns
//!
//! Patterns are stored as their source string and compiled on load.

use regex::Regex;
use serde::{Deserialize, Deserializer, Serializer};

pub fn serialize<S>(pattern: &Option<Regex>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match pattern {
        Some(regex) => serializer.serialize_some(regex.as_str()),
        None => serializer.serialize_none(),
    }
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Regex>, D::Error>
where
    D: Deserializer<'de>,
{
    let source: Option<String> = Option::deserialize(deserializer)?;
    source
        .map(|s| Regex::new(&s).map_err(serde::de::Error::custom))
        .transpose()
}
