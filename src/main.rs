use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, IsTerminal, Write};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};

use logsum::analyzer::analyze;
use logsum::cli::{Cli, ColorMode};
use logsum::config::Config;
use logsum::parser::parse_lines_counted;
use logsum::report;

fn main() -> ExitCode {
    // Reset SIGPIPE to default behavior so piping the report into e.g.
    // `head` terminates logsum cleanly instead of raising BrokenPipe.
    reset_sigpipe();

    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "logsum", &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    let config = match Config::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("logsum: {e}");
            return ExitCode::from(1);
        }
    };

    let lines = match read_lines(cli.file.as_deref()) {
        Ok(lines) => lines,
        Err(e) => {
            eprintln!("logsum: {e}");
            return ExitCode::from(2);
        }
    };

    let (records, skipped) = parse_lines_counted(lines.iter().map(String::as_str));
    if skipped > 0 {
        eprintln!("logsum: skipped {skipped} malformed line(s)");
    }

    let summary = analyze(&records);

    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());

    let result = if config.json_output {
        write_json(summary.as_ref(), &mut writer)
    } else {
        write_report(summary.as_ref(), &config, &mut writer)
    };

    if let Err(e) = result.and_then(|()| writer.flush()) {
        if e.kind() == io::ErrorKind::BrokenPipe {
            return ExitCode::SUCCESS;
        }
        eprintln!("logsum: write error: {e}");
        return ExitCode::from(2);
    }

    ExitCode::SUCCESS
}

/// Read every line from the given file, or from stdin when no path is set.
///
/// Any read failure (missing file, permission, invalid encoding) is
/// fatal: the analysis never runs on a partially read source.
fn read_lines(path: Option<&std::path::Path>) -> io::Result<Vec<String>> {
    match path {
        Some(path) => BufReader::new(File::open(path)?).lines().collect(),
        None => io::stdin().lock().lines().collect(),
    }
}

fn write_report(
    summary: Option<&logsum::AnalysisSummary>,
    config: &Config,
    writer: &mut impl Write,
) -> io::Result<()> {
    let Some(summary) = summary else {
        return writeln!(writer, "No log records found.");
    };
    let use_color = resolve_color_mode(config.color_mode);
    let mut out = String::new();
    report::render(summary, config, use_color, &mut out);
    writer.write_all(out.as_bytes())
}

fn write_json(
    summary: Option<&logsum::AnalysisSummary>,
    writer: &mut impl Write,
) -> io::Result<()> {
    // An empty batch serializes as an empty object.
    match summary {
        Some(summary) => serde_json::to_writer_pretty(&mut *writer, summary)?,
        None => serde_json::to_writer_pretty(&mut *writer, &serde_json::json!({}))?,
    }
    writeln!(writer)
}

fn resolve_color_mode(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            let stdout = io::stdout();
            if !stdout.is_terminal() {
                return false;
            }
            if std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()) {
                return false;
            }
            if std::env::var("TERM").is_ok_and(|v| v == "dumb") {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some_and(|v| !v.is_empty()) {
                return true;
            }
            true
        }
    }
}

/// Reset SIGPIPE to the default (terminate) behavior.
///
/// By default, Rust ignores SIGPIPE to surface `BrokenPipe` I/O errors.
/// Restoring `SIG_DFL` lets the OS handle the signal normally when the
/// report is piped into a pager or `head`.
#[cfg(unix)]
fn reset_sigpipe() {
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}

#[cfg(not(unix))]
fn reset_sigpipe() {}
