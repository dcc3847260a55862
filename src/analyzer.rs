//! Single-pass aggregation of parsed log records.
//!
//! Consumes a batch of [`LogRecord`] entries and produces an
//! [`AnalysisSummary`]: totals, per-level and per-service counts, unique
//! cardinalities, the timestamp range, and an error-specific breakdown
//! when ERROR-level records are present.

use std::collections::HashMap;

use jiff::civil;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::parser::LogRecord;

/// Level value that gates the error-specific section. Exact case match:
/// `"error"` and `"Error"` do not count.
const ERROR_LEVEL: &str = "ERROR";

/// Number of most-frequent error messages reported.
const TOP_MESSAGES: usize = 5;

/// An occurrence counter that remembers first-insertion order.
///
/// Counting itself is order-insensitive, but equal inputs must produce
/// deterministic output: iteration follows first-seen order, and
/// [`sorted_by_count`](Self::sorted_by_count) uses a stable sort so that
/// equally-frequent keys keep their first-seen order. Keys are compared
/// byte-exact, never normalized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Counter {
    index: HashMap<String, usize>,
    entries: Vec<(String, u64)>,
}

impl Counter {
    /// Increment the count for `key`, inserting it on first sight.
    pub fn bump(&mut self, key: &str) {
        match self.index.get(key) {
            Some(&slot) => self.entries[slot].1 += 1,
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), 1));
            }
        }
    }

    /// The count for `key`, zero if never seen.
    pub fn get(&self, key: &str) -> u64 {
        self.index.get(key).map_or(0, |&slot| self.entries[slot].1)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(key, count)| (key.as_str(), *count))
    }

    /// Entries ordered by descending count, ties in first-seen order.
    pub fn sorted_by_count(&self) -> Vec<(&str, u64)> {
        let mut sorted: Vec<_> = self.iter().collect();
        // Stable sort keeps first-seen order among equal counts.
        sorted.sort_by_key(|&(_, count)| std::cmp::Reverse(count));
        sorted
    }

    /// The `n` most frequent entries, ties in first-seen order.
    pub fn top(&self, n: usize) -> Vec<(&str, u64)> {
        let mut sorted = self.sorted_by_count();
        sorted.truncate(n);
        sorted
    }
}

impl Serialize for Counter {
    /// Serializes as a map in first-seen order.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, count) in self.iter() {
            map.serialize_entry(key, &count)?;
        }
        map.end()
    }
}

/// One entry of the top-error-messages list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageCount {
    pub message: String,
    pub count: u64,
}

/// Error-specific statistics.
///
/// Present on the summary if and only if at least one record has level
/// exactly [`ERROR_LEVEL`]; both fields are gated on that single
/// condition and are always populated together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorStats {
    /// ERROR record count grouped by service.
    pub by_service: Counter,
    /// Up to five most frequent ERROR messages, descending frequency,
    /// ties in first-seen order.
    pub top_messages: Vec<MessageCount>,
}

/// Aggregate statistics over one batch of records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisSummary {
    /// Number of records analyzed.
    pub total: u64,
    /// Occurrences per level value (case-sensitive keys).
    pub level_counts: Counter,
    /// Occurrences per service value (case-sensitive keys).
    pub service_counts: Counter,
    pub unique_services: usize,
    pub unique_levels: usize,
    /// Earliest parsed timestamp; `None` when no record has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub earliest: Option<civil::DateTime>,
    /// Latest parsed timestamp; `None` when no record has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest: Option<civil::DateTime>,
    /// Error breakdown; present only when ERROR-level records exist.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<ErrorStats>,
}

/// Aggregate a batch of records into an [`AnalysisSummary`].
///
/// Returns `None` for an empty batch. A single pass computes every
/// statistic; raw fallback timestamps are excluded from the min/max
/// range so calendar values are never compared against opaque text.
pub fn analyze(records: &[LogRecord]) -> Option<AnalysisSummary> {
    if records.is_empty() {
        return None;
    }

    let mut level_counts = Counter::default();
    let mut service_counts = Counter::default();
    let mut error_services = Counter::default();
    let mut error_messages = Counter::default();
    let mut earliest: Option<civil::DateTime> = None;
    let mut latest: Option<civil::DateTime> = None;

    for record in records {
        level_counts.bump(&record.level);
        service_counts.bump(&record.service);

        if let Some(dt) = record.timestamp.as_datetime() {
            earliest = Some(earliest.map_or(dt, |e| e.min(dt)));
            latest = Some(latest.map_or(dt, |l| l.max(dt)));
        }

        if record.level == ERROR_LEVEL {
            error_services.bump(&record.service);
            error_messages.bump(&record.message);
        }
    }

    let errors = if error_services.is_empty() {
        None
    } else {
        let top_messages = error_messages
            .top(TOP_MESSAGES)
            .into_iter()
            .map(|(message, count)| MessageCount {
                message: message.to_string(),
                count,
            })
            .collect();
        Some(ErrorStats {
            by_service: error_services,
            top_messages,
        })
    };

    Some(AnalysisSummary {
        total: records.len() as u64,
        unique_services: service_counts.len(),
        unique_levels: level_counts.len(),
        level_counts,
        service_counts,
        earliest,
        latest,
        errors,
    })
}
