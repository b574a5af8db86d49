//! Timestamps.
//!
//! A [Timestamp] is written as a record of whole seconds since the Unix epoch (field 1) and the
//! nanoseconds within that second (field 2). Both fields follow the usual omission rule, so the
//! Unix epoch itself encodes to nothing.
//!
//! Only instants between `0001-01-01T00:00:00Z` (inclusive) and `10000-01-01T00:00:00Z`
//! (exclusive) are representable.

use amino_codec::{field_size, write_field, EncodeSize, Error, Message, Write};
use bytes::BufMut;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Serialize, Serializer};
use std::fmt::{self, Display};

/// Seconds since the Unix epoch of `0001-01-01T00:00:00Z`.
pub const MIN_SECONDS: i64 = -62_135_596_800;

/// Seconds since the Unix epoch of `10000-01-01T00:00:00Z` (exclusive bound).
pub const MAX_SECONDS: i64 = 253_402_300_800;

const NANOS_PER_SECOND: u32 = 1_000_000_000;

/// An instant in UTC with nanosecond precision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp from seconds and nanoseconds since the Unix epoch.
    pub fn from_unix(seconds: i64, nanos: u32) -> Result<Self, Error> {
        if !(MIN_SECONDS..MAX_SECONDS).contains(&seconds) {
            return Err(Error::InvalidTime(format!(
                "seconds {seconds} out of range [{MIN_SECONDS}, {MAX_SECONDS})"
            )));
        }
        if nanos >= NANOS_PER_SECOND {
            return Err(Error::InvalidTime(format!(
                "nanos {nanos} out of range [0, {NANOS_PER_SECOND})"
            )));
        }
        DateTime::from_timestamp(seconds, nanos)
            .map(Self)
            .ok_or_else(|| Error::InvalidTime(format!("{seconds}.{nanos:09} is not an instant")))
    }

    /// Returns the whole seconds since the Unix epoch.
    pub fn seconds(&self) -> i64 {
        self.0.timestamp()
    }

    /// Returns the nanoseconds within the second.
    pub fn nanos(&self) -> u32 {
        self.0.timestamp_subsec_nanos()
    }
}

/// Normalizes an instant in any zone to UTC.
///
/// Fails for instants outside the representable range and for leap seconds.
impl<Tz: TimeZone> TryFrom<DateTime<Tz>> for Timestamp {
    type Error = Error;

    fn try_from(value: DateTime<Tz>) -> Result<Self, Self::Error> {
        Self::from_unix(value.timestamp(), value.timestamp_subsec_nanos())
    }
}

impl Message for Timestamp {
    type Context = ();
}

impl Write for Timestamp {
    fn write_cx(&self, buf: &mut impl BufMut, cx: &()) {
        write_field(1, &self.seconds(), buf, cx);
        write_field(2, &self.nanos(), buf, cx);
    }
}

impl EncodeSize for Timestamp {
    fn encode_size_cx(&self, cx: &()) -> usize {
        field_size(1, &self.seconds(), cx) + field_size(2, &self.nanos(), cx)
    }
}

/// Formats as RFC 3339 in UTC, with the fractional second trimmed of trailing zeros (and
/// dropped entirely when zero).
impl Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%dT%H:%M:%S"))?;
        let nanos = self.nanos();
        if nanos != 0 {
            let fraction = format!("{nanos:09}");
            write!(f, ".{}", fraction.trim_end_matches('0'))?;
        }
        write!(f, "Z")
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
