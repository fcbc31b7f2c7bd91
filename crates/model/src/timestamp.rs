use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

/// An ISO 8601 date-time as received from the server.
///
/// RFC 3339 is tried first. Offsets may also be written without a colon,
/// seconds may be left out, and a value without an offset is taken as UTC.
///
/// The original text is kept verbatim so that it can be echoed back
/// unchanged, while comparisons go through the parsed instant. Two
/// timestamps written with different offsets but denoting the same instant
/// compare as [`Ordering::Equal`] via [`Timestamp::cmp_instant`], yet are not
/// `==` since their text differs.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Timestamp {
    raw: String,
    instant: DateTime<FixedOffset>,
}

impl Timestamp {
    /// Parses an ISO 8601 date-time string.
    pub fn parse<S: Into<String>>(raw: S) -> Result<Self, chrono::ParseError> {
        let raw = raw.into();
        let instant = parse_instant(&raw)?;
        Ok(Self { raw, instant })
    }

    /// Returns the text exactly as it was received.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the parsed instant.
    #[inline]
    pub fn instant(&self) -> DateTime<FixedOffset> {
        self.instant
    }

    /// Compares two timestamps by the absolute instant they denote.
    #[inline]
    pub fn cmp_instant(&self, other: &Self) -> Ordering {
        self.instant.cmp(&other.instant)
    }
}

const OFFSET_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%dT%H:%M%:z",
];
const LOCAL_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

fn parse_instant(raw: &str) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
    let err = match DateTime::parse_from_rfc3339(raw) {
        Ok(instant) => return Ok(instant),
        Err(err) => err,
    };
    if let Some(instant) = OFFSET_FORMATS
        .iter()
        .find_map(|f| DateTime::parse_from_str(raw, f).ok())
    {
        return Ok(instant);
    }

    // `Z` suffix or no offset at all, both mean UTC.
    let local = raw.strip_suffix(['Z', 'z']).unwrap_or(raw);
    LOCAL_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(local, f).ok())
        .map(|naive| naive.and_utc().fixed_offset())
        .ok_or(err)
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Timestamp::parse(raw).map_err(de::Error::custom)
    }
}
