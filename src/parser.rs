//! Hyphen-delimited log line parser.
//!
//! Parses lines of the shape `TIMESTAMP - SERVICE - LEVEL - MESSAGE` into
//! structured [`LogRecord`] entries. Lines that do not match the shape are
//! silently dropped: the contract is best effort over the batch, so blank
//! or malformed lines never abort parsing.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::timestamp::Timestamp;

/// Line shape: `<anything> - <token> - <token> - <anything>`.
///
/// The first group is lazy so a message containing a literal `" - "`
/// still splits on the first three delimiters; everything after the
/// third delimiter belongs to the message.
static LINE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.*?) - ([A-Za-z0-9_]+) - ([A-Za-z0-9_]+) - (.*)$")
        .expect("line pattern is valid")
});

/// One structured log entry extracted from a line.
///
/// Fields are stored exactly as captured: service and level keep their
/// original case (`"ERROR"` and `"error"` are distinct values), and the
/// message keeps its whitespace apart from the trailing line terminator.
/// Records are immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogRecord {
    /// Parsed calendar value, or the original field text as a fallback.
    pub timestamp: Timestamp,
    pub service: String,
    pub level: String,
    /// Remainder of the line after the third delimiter.
    pub message: String,
}

/// Parse a single line into a [`LogRecord`].
///
/// Returns `None` when the line does not match the four-field shape.
/// An unparseable timestamp field is not a rejection: the record is
/// still produced with [`Timestamp::Raw`].
pub fn parse_line(line: &str) -> Option<LogRecord> {
    let line = line.trim_end_matches(['\n', '\r']);
    let captures = LINE_PATTERN.captures(line)?;

    Some(LogRecord {
        timestamp: Timestamp::parse(&captures[1]),
        service: captures[2].to_string(),
        level: captures[3].to_string(),
        message: captures[4].to_string(),
    })
}

/// Parse a batch of lines, preserving input order.
///
/// Non-matching lines are filtered out of the result.
pub fn parse_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Vec<LogRecord> {
    lines.into_iter().filter_map(parse_line).collect()
}

/// Parse a batch of lines, also counting how many were skipped.
///
/// The skip count is diagnostic only; skipped lines are not otherwise
/// recorded.
pub fn parse_lines_counted<'a>(
    lines: impl IntoIterator<Item = &'a str>,
) -> (Vec<LogRecord>, usize) {
    let mut skipped = 0;
    let records = lines
        .into_iter()
        .filter_map(|line| {
            let record = parse_line(line);
            if record.is_none() {
                skipped += 1;
            }
            record
        })
        .collect();
    (records, skipped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil;

    #[test]
    fn test_parse_well_formed_line() {
        let record =
            parse_line("2023-01-01 10:00:00 - auth - INFO - User login successful").unwrap();
        assert_eq!(
            record.timestamp,
            Timestamp::DateTime(civil::datetime(2023, 1, 1, 10, 0, 0, 0))
        );
        assert_eq!(record.service, "auth");
        assert_eq!(record.level, "INFO");
        assert_eq!(record.message, "User login successful");
    }

    #[test]
    fn test_case_preserved_exactly() {
        let record = parse_line("01/02/2023 08:16:00 - DB - error - Connection failed").unwrap();
        assert_eq!(record.service, "DB");
        assert_eq!(record.level, "error");
    }

    #[test]
    fn test_message_with_embedded_delimiter() {
        // The lazy first group assigns only the first three delimiters to
        // the structured fields.
        let record = parse_line("2023-01-01 - api - WARNING - retry - attempt 2 - failed").unwrap();
        assert_eq!(record.service, "api");
        assert_eq!(record.level, "WARNING");
        assert_eq!(record.message, "retry - attempt 2 - failed");
    }

    #[test]
    fn test_unparseable_timestamp_kept_as_raw() {
        let record = parse_line("not-a-date - auth - INFO - hello").unwrap();
        assert_eq!(record.timestamp, Timestamp::Raw("not-a-date".to_string()));
    }

    #[test]
    fn test_malformed_line_rejected() {
        assert!(parse_line("this line has no delimiters").is_none());
        assert!(parse_line("").is_none());
        assert!(parse_line("only - two - fields").is_none());
    }

    #[test]
    fn test_non_word_service_rejected() {
        // Service and level tokens are word characters only.
        assert!(parse_line("2023-01-01 10:00:00 - my service - INFO - msg").is_none());
    }

    #[test]
    fn test_trailing_newline_stripped() {
        let record = parse_line("2023-01-01 10:00:00 - auth - INFO - hello\n").unwrap();
        assert_eq!(record.message, "hello");

        let record = parse_line("2023-01-01 10:00:00 - auth - INFO - hello\r\n").unwrap();
        assert_eq!(record.message, "hello");
    }

    #[test]
    fn test_empty_message_allowed() {
        let record = parse_line("2023-01-01 10:00:00 - auth - INFO - ").unwrap();
        assert_eq!(record.message, "");
    }

    #[test]
    fn test_parse_lines_filters_malformed() {
        let lines = [
            "2023-01-01 10:00:00 - auth - INFO - ok",
            "",
            "garbage",
            "2023-01-01 10:01:00 - api - WARNING - slow",
        ];
        let records = parse_lines(lines);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].service, "auth");
        assert_eq!(records[1].service, "api");
    }

    #[test]
    fn test_parse_lines_counted_reports_skips() {
        let lines = [
            "2023-01-01 10:00:00 - auth - INFO - ok",
            "not a log line",
            "",
        ];
        let (records, skipped) = parse_lines_counted(lines);
        assert_eq!(records.len(), 1);
        assert_eq!(skipped, 2);
    }

    #[test]
    fn test_message_whitespace_preserved() {
        let record = parse_line("2023-01-01 10:00:00 - auth - INFO -   padded   ").unwrap();
        assert_eq!(record.message, "  padded   ");
    }
}
