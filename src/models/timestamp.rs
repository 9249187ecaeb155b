//! Local wall-clock timestamps.
//!
//! Timestamps are held as [`NaiveDateTime`] in local time and only turned into
//! text when serialized. Two display styles exist: the compact style used for
//! revision creation times (`2024/1/5 9:03:04`) and the zero-padded style used
//! for visit times (`2024/01/05 09:03:04`). Both styles, and RFC 3339, are
//! accepted when reading.

use chrono::{DateTime, Local, NaiveDateTime, SubsecRound};
use serde::{de, Deserialize, Deserializer, Serializer};

/// Compact style without leading zeros on month, day and hour.
pub const COMPACT_FORMAT: &str = "%Y/%-m/%-d %-H:%M:%S";

/// Style with every component padded to two digits.
pub const PADDED_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Current local time, truncated to whole seconds so it survives a round trip
/// through either display style.
pub fn now() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(0)
}

/// Parse a timestamp written in either display style or as RFC 3339.
pub fn parse(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();

    // chrono accepts one or two digits for each padded numeric field, so the
    // padded pattern also reads the compact style.
    NaiveDateTime::parse_from_str(raw, PADDED_FORMAT)
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.with_timezone(&Local).naive_local())
        })
}

fn deserialize_any<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).ok_or_else(|| de::Error::custom(format!("unrecognized timestamp '{}'", raw)))
}

/// Serde adapter for the compact style.
pub mod compact {
    use super::*;

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(COMPACT_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        deserialize_any(deserializer)
    }
}

/// Serde adapter for the zero-padded style.
pub mod padded {
    use super::*;

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(PADDED_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        deserialize_any(deserializer)
    }
}
