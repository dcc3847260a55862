//! Timestamp parsing for structured log entries.
//!
//! Log files in the wild mix several timestamp conventions, so the first
//! field of each line is tried against a fixed list of formats. Fields
//! that match none of them are kept verbatim as opaque text rather than
//! rejected, which keeps the record usable for counting while excluding
//! it from time-range computation.

use std::fmt;

use jiff::civil;
use serde::Serialize;

/// Date+time formats tried against the timestamp field, in priority order.
///
/// `%d/%m/%Y` is tried before `%m/%d/%Y`, so any value with a day of 12
/// or less is read as day/month. The two formats are inherently ambiguous
/// for those values; the fixed order is the tie-breaker.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
];

/// Date-only fallback format; parses to midnight.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// A log line timestamp: either a parsed calendar value or opaque text.
///
/// The two variants force callers to branch: only [`DateTime`](Self::DateTime)
/// values participate in min/max range computation, while
/// [`Raw`](Self::Raw) values are carried along for display but never
/// compared as dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Timestamp {
    /// Successfully parsed calendar date and time (midnight for date-only input).
    DateTime(civil::DateTime),
    /// Field text that matched no known format.
    Raw(String),
}

impl Timestamp {
    /// Parse a timestamp field using the fixed format priority list.
    ///
    /// Each format must consume the entire field to count as a match.
    /// A field matching no format is retained as [`Timestamp::Raw`];
    /// this is not an error condition.
    pub fn parse(field: &str) -> Self {
        for format in DATETIME_FORMATS {
            if let Ok(dt) = civil::DateTime::strptime(format, field) {
                return Self::DateTime(dt);
            }
        }

        if let Ok(date) = civil::Date::strptime(DATE_FORMAT, field) {
            return Self::DateTime(date.to_datetime(civil::Time::midnight()));
        }

        Self::Raw(field.to_string())
    }

    /// The parsed calendar value, or `None` for raw fallback text.
    pub fn as_datetime(&self) -> Option<civil::DateTime> {
        match self {
            Self::DateTime(dt) => Some(*dt),
            Self::Raw(_) => None,
        }
    }

    /// Whether the field parsed into a calendar value.
    pub fn is_parsed(&self) -> bool {
        matches!(self, Self::DateTime(_))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DateTime(dt) => write!(f, "{dt}"),
            Self::Raw(s) => f.write_str(s),
        }
    }
}
