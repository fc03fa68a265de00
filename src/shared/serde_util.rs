//! Custom serde helpers for venue wire formats.

/// (De)serializes a Unix-seconds `u64` as `DateTime<Utc>`.
///
/// The venue sends `created_at`/`updated_at` as epoch seconds, not ISO 8601
/// strings.
pub mod timestamp_secs {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        let secs = i64::try_from(secs)
            .map_err(|_| serde::de::Error::custom(format!("invalid timestamp: {}", secs)))?;
        DateTime::<Utc>::from_timestamp(secs, 0)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", secs)))
    }

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(value.timestamp().max(0) as u64)
    }
}
