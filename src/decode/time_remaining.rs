//! Serde adapter for an event's `time_remaining`.
//!
//! The API sends `null`, an integer number of seconds, or a clock string
//! such as `"1:02:03"`. Values that fit none of these decode to `None`
//! with a warning instead of failing the whole event.

use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;

/// Fold a `h:mm:ss` style string into seconds.
pub fn parse_clock(value: &str) -> Option<u64> {
    value.split(':').try_fold(0u64, |acc, part| {
        let part: u64 = part.trim().parse().ok()?;
        acc.checked_mul(60)?.checked_add(part)
    })
}

pub fn serialize<S>(value: &Option<u64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(secs) => serializer.serialize_u64(*secs),
        None => serializer.serialize_none(),
    }
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let parsed = match &value {
        Value::Null => return Ok(None),
        Value::Number(n) => n.as_u64(),
        Value::String(s) => parse_clock(s),
        _ => None,
    };
    if parsed.is_none() {
        tracing::warn!(value = %value, "unexpected time_remaining value, ignoring");
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Remaining {
        #[serde(default, with = "super")]
        time_remaining: Option<u64>,
    }

    fn remaining(json: &str) -> Option<u64> {
        serde_json::from_str::<Remaining>(json).unwrap().time_remaining
    }

    #[test]
    fn test_clock_strings() {
        assert_eq!(parse_clock("1:23"), Some(83));
        assert_eq!(parse_clock("1:00:00"), Some(3600));
        assert_eq!(parse_clock("45"), Some(45));
        assert_eq!(parse_clock("a:b"), None);
        assert_eq!(parse_clock(""), None);
    }

    #[test]
    fn test_decodes_all_shapes() {
        assert_eq!(remaining(r#"{"time_remaining": null}"#), None);
        assert_eq!(remaining("{}"), None);
        assert_eq!(remaining(r#"{"time_remaining": 30}"#), Some(30));
        assert_eq!(remaining(r#"{"time_remaining": "0:01:30"}"#), Some(90));
    }

    #[test]
    fn test_unexpected_values_become_none() {
        assert_eq!(remaining(r#"{"time_remaining": "soon"}"#), None);
        assert_eq!(remaining(r#"{"time_remaining": -4}"#), None);
        assert_eq!(remaining(r#"{"time_remaining": [1]}"#), None);
    }
}
