//! Server timestamps.
//!
//! A [`ServerTime`] is only ever produced from data the server sent (or from a
//! value derived from one, such as a date marker). There is intentionally no
//! constructor from the local clock: local time is never compared against
//! server time.

use crate::error::InputError;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A server-assigned (or server-relative) timestamp.
///
/// This is the sole ordering key of a message log.
///
/// # Examples
///
/// ```
/// use chanlog::core::ServerTime;
///
/// let a = ServerTime::from_millis(1_700_000_000_000).unwrap();
/// let b: ServerTime = "2023-11-14T22:13:20.001Z".parse().unwrap();
/// assert!(a < b);
/// assert_eq!(a.as_millis(), 1_700_000_000_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServerTime(DateTime<Utc>);

impl ServerTime {
    /// Wraps a UTC datetime received from the server.
    #[must_use]
    pub const fn from_datetime(datetime: DateTime<Utc>) -> Self {
        Self(datetime)
    }

    /// Converts epoch milliseconds (the server's wire representation).
    ///
    /// Returns `None` if the value is outside the representable range.
    #[must_use]
    pub fn from_millis(millis: i64) -> Option<Self> {
        DateTime::from_timestamp_millis(millis).map(Self)
    }

    /// Returns the timestamp as epoch milliseconds.
    #[must_use]
    pub fn as_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Returns the underlying datetime.
    #[must_use]
    pub const fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }
}

impl fmt::Display for ServerTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

/// Parses either epoch milliseconds or an RFC 3339 timestamp.
impl FromStr for ServerTime {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || InputError::InvalidTime {
            input: s.to_string(),
        };

        if let Ok(millis) = trimmed.parse::<i64>() {
            return Self::from_millis(millis).ok_or_else(invalid);
        }

        DateTime::parse_from_rfc3339(trimmed)
            .map(|dt| Self(dt.with_timezone(&Utc)))
            .map_err(|_| invalid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_millis_round_trip() {
        let t = ServerTime::from_millis(1_234).unwrap();
        assert_eq!(t.as_millis(), 1_234);
    }

    #[test]
    fn test_from_millis_out_of_range() {
        assert!(ServerTime::from_millis(i64::MAX).is_none());
    }

    #[test]
    fn test_parse_millis_and_rfc3339_agree() {
        let a: ServerTime = "0".parse().unwrap();
        let b: ServerTime = "1970-01-01T00:00:00Z".parse().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse_offset_is_normalized() {
        let a: ServerTime = "2024-03-01T12:00:00+02:00".parse().unwrap();
        let b: ServerTime = "2024-03-01T10:00:00Z".parse().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = "yesterday".parse::<ServerTime>().unwrap_err();
        assert!(matches!(err, InputError::InvalidTime { .. }));
    }

    #[test]
    fn test_display_is_rfc3339_millis() {
        let t = ServerTime::from_millis(1_500).unwrap();
        assert_eq!(t.to_string(), "1970-01-01T00:00:01.500Z");
    }
}
