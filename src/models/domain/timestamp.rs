//! `#[serde(with = "timestamp")]` for `DateTime<Utc>` fields of stored documents.
//!
//! BSON gets a native date so range filters and sorts compare instants.
//! Human-readable formats such as JSON keep RFC 3339 strings.

use chrono::{DateTime, Utc};
use mongodb::bson::{self, Bson};
use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};

pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    if serializer.is_human_readable() {
        value.serialize(serializer)
    } else {
        bson::DateTime::from_millis(value.timestamp_millis()).serialize(serializer)
    }
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    match Bson::deserialize(deserializer)? {
        Bson::DateTime(value) => DateTime::from_timestamp_millis(value.timestamp_millis())
            .ok_or_else(|| D::Error::custom("timestamp out of range")),
        Bson::String(value) => DateTime::parse_from_rfc3339(&value)
            .map(|parsed| parsed.with_timezone(&Utc))
            .map_err(D::Error::custom),
        other => Err(D::Error::custom(format!(
            "expected a date, found {:?}",
            other.element_type()
        ))),
    }
}

/// Current time at the millisecond precision BSON stores.
pub fn now() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
}
