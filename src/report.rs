//! Text report rendering for an [`AnalysisSummary`].
//!
//! Presentation concerns live here, decoupled from aggregation: count
//! sections are sorted by descending count for display (stable on
//! first-seen ties), percentages are computed against the total, and
//! long error messages are truncated. Colorization is optional and
//! follows the level's severity where one is recognizable.

use std::fmt::Write;

use owo_colors::{OwoColorize, Style};

use crate::analyzer::AnalysisSummary;
use crate::config::Config;

/// Render the full analysis report into `out`.
pub fn render(summary: &AnalysisSummary, config: &Config, use_color: bool, out: &mut String) {
    heading("=== Log File Analysis Results ===", use_color, out);
    out.push('\n');

    let _ = writeln!(out, "Total logs processed: {}", summary.total);
    render_time_range(summary, config, use_color, out);
    out.push('\n');

    heading("=== Log Level Distribution ===", use_color, out);
    for (level, count) in summary.level_counts.sorted_by_count() {
        let pct = percent(count, summary.total);
        if use_color && let Some(style) = level_style(level) {
            let _ = writeln!(out, "{}: {count} ({pct:.1}%)", level.style(style));
        } else {
            let _ = writeln!(out, "{level}: {count} ({pct:.1}%)");
        }
    }
    out.push('\n');

    heading("=== Service Distribution ===", use_color, out);
    for (service, count) in summary.service_counts.sorted_by_count() {
        let pct = percent(count, summary.total);
        let _ = writeln!(out, "{service}: {count} ({pct:.2}%)");
    }

    let Some(ref errors) = summary.errors else {
        return;
    };

    out.push('\n');
    heading("=== Error Distribution by Service ===", use_color, out);
    for (service, count) in errors.by_service.sorted_by_count() {
        let _ = writeln!(out, "{service}: {count} errors");
    }

    out.push('\n');
    heading("=== Most Common Error Messages ===", use_color, out);
    for entry in &errors.top_messages {
        let message = truncate_message(&entry.message, config.max_message_length);
        let _ = writeln!(out, "{}x: {message}", entry.count);
    }
}

/// Write a section heading, bold when colored.
fn heading(text: &str, use_color: bool, out: &mut String) {
    if use_color {
        let _ = writeln!(out, "{}", text.bold());
    } else {
        out.push_str(text);
        out.push('\n');
    }
}

/// Write the time range line, or a marker when no timestamp parsed.
fn render_time_range(summary: &AnalysisSummary, config: &Config, use_color: bool, out: &mut String) {
    match (summary.earliest, summary.latest) {
        (Some(earliest), Some(latest)) => {
            let from = earliest.strftime(&config.timestamp_format).to_string();
            let to = latest.strftime(&config.timestamp_format).to_string();
            if use_color {
                let _ = writeln!(out, "Time range: {} to {}", from.bold(), to.bold());
            } else {
                let _ = writeln!(out, "Time range: {from} to {to}");
            }
        }
        _ => {
            let _ = writeln!(out, "Time range: no parseable timestamps");
        }
    }
}

/// Percentage of `count` over `total`.
#[allow(clippy::cast_precision_loss)] // counts are far below f64 integer precision
fn percent(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count as f64 / total as f64 * 100.0
}

/// Display style for well-known severity names, matched loosely.
///
/// Counting is case-exact, but coloring is a display concern only, so a
/// case-insensitive match is fine here. Unrecognized levels get no style.
fn level_style(level: &str) -> Option<Style> {
    match level.to_lowercase().as_str() {
        "trace" => Some(Style::new().cyan().bold()),
        "debug" => Some(Style::new().blue().bold()),
        "info" => Some(Style::new().green().bold()),
        "warn" | "warning" => Some(Style::new().yellow().bold()),
        "error" => Some(Style::new().red().bold()),
        "fatal" | "critical" => Some(Style::new().magenta().bold()),
        _ => None,
    }
}

/// Truncate a message to `max_len` characters, appending `…` if truncated.
///
/// If `max_len` is `0`, no truncation is applied.
fn truncate_message(s: &str, max_len: usize) -> String {
    if max_len == 0 || s.chars().count() <= max_len {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max_len).collect();
    format!("{truncated}…")
}
