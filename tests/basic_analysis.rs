//! Integration tests for analyzing a log file end to end.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

#[allow(deprecated)]
fn logsum() -> Command {
    let mut cmd = Command::cargo_bin("logsum").unwrap();
    cmd.env("XDG_CONFIG_HOME", "/tmp/logsum-test-no-config");
    cmd
}

fn log_file(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{line}").unwrap();
    }
    file
}

#[test]
fn standard_log_file_full_report() {
    let file = log_file(&[
        "2023-01-01 10:00:00 - auth - INFO - User login successful",
        "2023-01-01 10:01:00 - database - ERROR - Connection timeout",
        "2023-01-01 10:02:00 - api - WARNING - High response time",
    ]);

    logsum()
        .arg("--color=never")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Total logs processed: 3"))
        .stdout(predicate::str::contains(
            "Time range: 2023-01-01 10:00:00 to 2023-01-01 10:02:00",
        ))
        .stdout(predicate::str::contains("INFO: 1 (33.3%)"))
        .stdout(predicate::str::contains("auth: 1 (33.33%)"))
        .stdout(predicate::str::contains("database: 1 errors"))
        .stdout(predicate::str::contains("1x: Connection timeout"));
}

#[test]
fn alternate_timestamp_format_and_mixed_case() {
    let file = log_file(&[
        "01/02/2023 08:15:00 - AUTH - info - Login attempt",
        "01/02/2023 08:16:00 - DB - error - Connection failed",
        "01/02/2023 08:17:00 - API - WARNING - Slow response",
    ]);

    logsum()
        .arg("--color=never")
        .arg(file.path())
        .assert()
        .success()
        // Casing preserved exactly; 01/02 read as DD/MM → February 1st.
        .stdout(predicate::str::contains("AUTH: 1 (33.33%)"))
        .stdout(predicate::str::contains("info: 1 (33.3%)"))
        .stdout(predicate::str::contains("2023-02-01 08:15:00"))
        // Lowercase "error" does not trigger the error sections.
        .stdout(predicate::str::contains("Error Distribution").not());
}

#[test]
fn reads_stdin_when_no_file_given() {
    logsum()
        .arg("--color=never")
        .write_stdin("2023-01-01 10:00:00 - auth - INFO - hello\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total logs processed: 1"));
}

#[test]
fn empty_input_reports_no_records() {
    logsum()
        .arg("--color=never")
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("No log records found."));
}

#[test]
fn missing_file_is_fatal() {
    logsum()
        .arg("/nonexistent/path/to/app.log")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("logsum:"));
}

#[test]
fn unparseable_timestamps_reported_as_none() {
    let file = log_file(&["sometime - auth - INFO - no usable date"]);

    logsum()
        .arg("--color=never")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Time range: no parseable timestamps",
        ));
}

#[test]
fn long_error_messages_truncated_in_report() {
    let long_msg = "y".repeat(100);
    let line = format!("2023-01-01 10:00:00 - svc - ERROR - {long_msg}");
    let file = log_file(&[line.as_str()]);

    let output = logsum()
        .arg("--color=never")
        .arg(file.path())
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains('…'), "long message should be truncated");
    assert!(!stdout.contains(&long_msg), "full message should not appear");
}

#[test]
fn truncation_length_configurable() {
    let long_msg = "y".repeat(100);
    let line = format!("2023-01-01 10:00:00 - svc - ERROR - {long_msg}");
    let file = log_file(&[line.as_str()]);

    let output = logsum()
        .arg("--color=never")
        .arg("--max-message-length=0")
        .arg(file.path())
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains(&long_msg),
        "full message should appear when truncation is disabled"
    );
}
