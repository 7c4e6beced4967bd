//! Serde adapter for optional API timestamps.
//!
//! Accepts `null`, the zone-less layout `%Y-%m-%dT%H:%M:%S` with optional
//! fractional seconds (interpreted as UTC) and RFC 3339. Serializes back to
//! the zone-less layout without a fraction.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serializer};

/// Layout used by most API endpoints.
pub const API_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Zone-less layout with an optional fractional-second field.
const API_TIME_PARSE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Parse a timestamp string in either supported layout.
pub fn parse(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, API_TIME_PARSE_FORMAT) {
        return Some(naive.and_utc());
    }
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(dt) => serializer.collect_str(&dt.format(API_TIME_FORMAT)),
        None => serializer.serialize_none(),
    }
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => parse(s).map(Some).ok_or_else(|| {
            de::Error::custom(format!("invalid timestamp '{s}': expected ISO 8601"))
        }),
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    struct Stamped {
        #[serde(default, with = "super")]
        created: Option<DateTime<Utc>>,
    }

    fn decode(json: &str) -> Result<Stamped, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[test]
    fn test_zoneless_layout_is_utc() {
        let s = decode(r#"{"created": "2018-01-02T03:04:05"}"#).unwrap();
        assert_eq!(
            s.created,
            Some(Utc.with_ymd_and_hms(2018, 1, 2, 3, 4, 5).unwrap())
        );
    }

    #[test]
    fn test_zoneless_layout_with_fraction() {
        let s = decode(r#"{"created": "2018-01-02T03:04:05.123"}"#).unwrap();
        let expected = Utc.with_ymd_and_hms(2018, 1, 2, 3, 4, 5).unwrap()
            + chrono::Duration::milliseconds(123);
        assert_eq!(s.created, Some(expected));

        // The fraction is dropped on the way back out
        assert_eq!(
            serde_json::to_string(&s).unwrap(),
            r#"{"created":"2018-01-02T03:04:05"}"#
        );
    }

    #[test]
    fn test_rfc3339_with_offset() {
        let s = decode(r#"{"created": "2018-01-02T05:04:05+02:00"}"#).unwrap();
        assert_eq!(
            s.created,
            Some(Utc.with_ymd_and_hms(2018, 1, 2, 3, 4, 5).unwrap())
        );

        let s = decode(r#"{"created": "2024-06-01T12:00:00.250Z"}"#).unwrap();
        assert!(s.created.is_some());
    }

    #[test]
    fn test_null_missing_and_empty() {
        assert!(decode(r#"{"created": null}"#).unwrap().created.is_none());
        assert!(decode("{}").unwrap().created.is_none());
        assert!(decode(r#"{"created": ""}"#).unwrap().created.is_none());
    }

    #[test]
    fn test_garbage_is_an_error() {
        let err = decode(r#"{"created": "yesterday"}"#).unwrap_err();
        assert!(err.to_string().contains("invalid timestamp 'yesterday'"));
    }

    #[test]
    fn test_serializes_zoneless() {
        let s = Stamped {
            created: Some(Utc.with_ymd_and_hms(2020, 12, 31, 23, 59, 0).unwrap()),
        };
        assert_eq!(
            serde_json::to_string(&s).unwrap(),
            r#"{"created":"2020-12-31T23:59:00"}"#
        );
    }
}
