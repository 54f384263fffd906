//! Serde helpers for the persisted log encoding.

/// Serialize `DateTime<Utc>` as ISO-8601 with millisecond precision and a `Z`
/// suffix (`2024-05-01T10:00:00.000Z`).
///
/// Any RFC 3339 instant is accepted when deserializing.
pub mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| serde::de::Error::custom(format!("invalid timestamp {raw:?}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Stamped {
        #[serde(with = "super::iso_millis")]
        at: DateTime<Utc>,
    }

    #[test]
    fn writes_millisecond_zulu() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        let json = serde_json::to_string(&Stamped { at }).unwrap();
        assert_eq!(json, r#"{"at":"2024-05-01T10:00:00.000Z"}"#);
    }

    #[test]
    fn accepts_offsets() {
        let parsed: Stamped = serde_json::from_str(r#"{"at":"2024-05-01T12:00:00+02:00"}"#).unwrap();
        assert_eq!(parsed.at, Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap());
    }

    #[test]
    fn rejects_garbage() {
        let result: Result<Stamped, _> = serde_json::from_str(r#"{"at":"yesterday"}"#);
        assert!(result.is_err());
    }
}
