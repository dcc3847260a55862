//! `logsum` — Summarize hyphen-delimited service log files.
//!
//! This library provides the core parsing and aggregation functionality
//! for the `logsum` CLI tool. It parses lines of the shape
//! `TIMESTAMP - SERVICE - LEVEL - MESSAGE` into structured records,
//! handling several timestamp formats with a verbatim-text fallback, and
//! computes batch statistics: counts by level and service, unique
//! cardinalities, the timestamp range, and an error breakdown with the
//! most frequent error messages.
//!
//! # Example
//!
//! ```
//! use logsum::{analyze, parse_lines};
//!
//! let lines = [
//!     "2023-01-01 10:00:00 - auth - INFO - User login successful",
//!     "2023-01-01 10:01:00 - database - ERROR - Connection timeout",
//! ];
//! let records = parse_lines(lines);
//! let summary = analyze(&records).expect("batch is not empty");
//!
//! assert_eq!(summary.total, 2);
//! assert_eq!(summary.service_counts.get("auth"), 1);
//! assert!(summary.errors.is_some());
//! ```

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod error;
pub mod parser;
pub mod report;
pub mod timestamp;

// Re-export primary API types for convenience.
pub use analyzer::{AnalysisSummary, Counter, ErrorStats, MessageCount, analyze};
pub use config::Config;
pub use error::AnalyzerError;
pub use parser::{LogRecord, parse_line, parse_lines, parse_lines_counted};
pub use report::render;
pub use timestamp::Timestamp;
