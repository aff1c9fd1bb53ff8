//! Module containing functionality related to BSON DateTimes.

use std::fmt::{self, Display};

use time::format_description::well_known::Rfc3339;

/// Struct representing a BSON datetime: a signed 64-bit count of milliseconds since the Unix
/// epoch. Any `i64` is a valid BSON datetime, even when it lies outside the range the
/// formatting helpers can render.
#[derive(Eq, PartialEq, Ord, PartialOrd, Hash, Copy, Clone)]
pub struct DateTime(i64);

impl DateTime {
    /// The latest possible date that can be represented in BSON.
    pub const MAX: Self = Self::from_millis(i64::MAX);

    /// The earliest possible date that can be represented in BSON.
    pub const MIN: Self = Self::from_millis(i64::MIN);

    /// Makes a new [`DateTime`] from the number of non-leap milliseconds since
    /// January 1, 1970 0:00:00 UTC (aka "UNIX timestamp").
    pub const fn from_millis(date: i64) -> Self {
        Self(date)
    }

    /// Returns the number of non-leap-milliseconds since January 1, 1970 UTC.
    pub const fn timestamp_millis(self) -> i64 {
        self.0
    }

    fn to_time_opt(self) -> Option<time::OffsetDateTime> {
        time::OffsetDateTime::UNIX_EPOCH.checked_add(time::Duration::milliseconds(self.0))
    }

    /// Convert this [`DateTime`] to an RFC 3339 formatted string, if it is in range.
    pub fn try_to_rfc3339_string(self) -> Option<String> {
        self.to_time_opt().and_then(|dt| dt.format(&Rfc3339).ok())
    }
}

impl fmt::Debug for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tup = f.debug_tuple("DateTime");
        match self.to_time_opt() {
            Some(dt) => tup.field(&dt),
            _ => tup.field(&self.0),
        };
        tup.finish()
    }
}

impl Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.try_to_rfc3339_string() {
            Some(s) => f.write_str(&s),
            _ => Display::fmt(&self.0, f),
        }
    }
}

impl From<i64> for DateTime {
    fn from(millis: i64) -> Self {
        Self::from_millis(millis)
    }
}
