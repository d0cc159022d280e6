pub mod chat;
pub mod essay;

use chrono::{DateTime, SecondsFormat, Utc};

/// ISO-8601 UTC timestamp with millisecond precision, e.g. `2024-05-01T12:00:00.000Z`.
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn timestamp_now() -> String {
    iso_timestamp(Utc::now())
}
