//! Report formatting and printing utilities.
//!
//! This module provides functions to display issues in cargo-style format.
//! Separate from core logic to allow checktext to be used as a library.

use std::io::{self, Write};

use colored::Colorize;
use serde_json::json;
use unicode_width::UnicodeWidthStr;

use super::args::OutputFormat;
use super::commands::{CheckSummary, CommandResult, CommandSummary, ExtractSummary, InitSummary};
use crate::config::CONFIG_FILE_NAME;
use crate::core::ExtractedCall;
use crate::core::data::CallArg;
use crate::core::validate::ValidationEvent;
use crate::issues::{Issue, Report, ReportLocation, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print issues in cargo-style format to stdout.
///
/// Issues are sorted and displayed with severity, location, source context,
/// and details, followed by a problem summary.
pub fn report(issues: &[Issue]) {
    report_to(issues, &mut io::stdout().lock());
}

/// Print issues to a custom writer.
///
/// Useful for testing or redirecting output.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort();

    let max_line_width = calculate_max_line_width(&sorted);

    for issue in &sorted {
        print_issue(issue, writer, max_line_width);
    }

    print_summary(&sorted, writer);
}

/// Print a success message when no issues are found.
pub fn print_success(source_files: usize, catalogs: usize) {
    print_success_to(source_files, catalogs, &mut io::stdout().lock());
}

/// Print a success message to a custom writer.
pub fn print_success_to<W: Write>(source_files: usize, catalogs: usize, writer: &mut W) {
    let files = format!(
        "{} source {}",
        source_files,
        if source_files == 1 { "file" } else { "files" }
    );
    let text = if catalogs == 0 {
        format!("Checked {} - no issues found", files)
    } else {
        format!(
            "Checked {} against {} {} - no issues found",
            files,
            catalogs,
            if catalogs == 1 { "catalog" } else { "catalogs" }
        )
    };
    let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), text.green());
}

/// List messages that were found translated (`--show-translated`).
pub fn print_translated_to<W: Write>(events: &[ValidationEvent], writer: &mut W) {
    for event in events {
        let _ = writeln!(
            writer,
            "{} \"{}\" ({})  {}:{}:{}",
            SUCCESS_MARK.green(),
            event.message_id,
            event.language,
            event.source.file_path(),
            event.source.line(),
            event.source.col()
        );
    }
    if !events.is_empty() {
        let _ = writeln!(writer);
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn print_issue<W: Write>(issue: &Issue, writer: &mut W, max_line_width: usize) {
    let loc = issue.location();
    let (file_path, line, col, source_line) = extract_location_info(&loc);

    let severity = issue.report_severity();
    let severity_str = match severity {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: \"{}\"  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    // Clickable location: --> path:line:col (path only for file-level issues)
    if !file_path.is_empty() {
        if line > 0 {
            let _ = writeln!(writer, "  {} {}:{}:{}", "-->".blue(), file_path, line, col);
        } else {
            let _ = writeln!(writer, "  {} {}", "-->".blue(), file_path);
        }
    }

    if let Some(source_line) = source_line {
        let caret_char = match severity {
            Severity::Error => "^".red(),
            Severity::Warning => "^".yellow(),
        };

        let _ = writeln!(
            writer,
            "{:>width$} {}",
            "",
            "|".blue(),
            width = max_line_width
        );
        let _ = writeln!(
            writer,
            "{:>width$} {} {}",
            line.to_string().blue(),
            "|".blue(),
            source_line,
            width = max_line_width
        );

        // Caret under the call (col is 1-based)
        let prefix = if col > 1 {
            source_line.chars().take(col - 1).collect::<String>()
        } else {
            String::new()
        };
        let caret_padding = UnicodeWidthStr::width(prefix.as_str());
        let _ = writeln!(
            writer,
            "{:>width$} {} {:>padding$}{}",
            "",
            "|".blue(),
            "",
            caret_char,
            width = max_line_width,
            padding = caret_padding
        );
    }

    if let Some(details) = issue.details() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "note:".bold(),
            details,
            width = max_line_width
        );
    }

    if let Some(hint) = issue.hint() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "hint:".bold().cyan(),
            hint,
            width = max_line_width
        );
    }

    let _ = writeln!(writer);
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Error)
        .count();
    let total_warnings = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Warning)
        .count();
    let total_problems = total_errors + total_warnings;

    if total_problems > 0 {
        let _ = writeln!(
            writer,
            "{} {} {} ({} {}, {} {})",
            FAILURE_MARK.red(),
            total_problems,
            if total_problems == 1 {
                "problem"
            } else {
                "problems"
            },
            total_errors,
            if total_errors == 1 { "error" } else { "errors" }.red(),
            total_warnings,
            if total_warnings == 1 {
                "warning"
            } else {
                "warnings"
            }
            .yellow()
        );
    }
}

fn extract_location_info<'a>(
    loc: &'a ReportLocation<'a>,
) -> (&'a str, usize, usize, Option<&'a str>) {
    match loc {
        ReportLocation::Source(ctx) => (
            ctx.file_path(),
            ctx.line(),
            ctx.col(),
            Some(&ctx.source_line),
        ),
        ReportLocation::Position(loc) => (&loc.file_path, loc.line, loc.col, None),
        ReportLocation::File { path } => (path, 0, 0, None),
    }
}

fn calculate_max_line_width(issues: &[Issue]) -> usize {
    issues
        .iter()
        .filter_map(|i| match i.location() {
            ReportLocation::Source(ctx) => Some(ctx.line()),
            ReportLocation::Position(_) | ReportLocation::File { .. } => None,
        })
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1)
}

// ============================================================
// Command output
// ============================================================

pub fn print(result: &CommandResult, verbose: bool) {
    match &result.summary {
        CommandSummary::Check(summary) => print_check(result, summary),
        CommandSummary::Extract(summary) => print_extract(result, summary, verbose),
        CommandSummary::Init(summary) => print_init(summary),
    }
}

fn print_check(result: &CommandResult, summary: &CheckSummary) {
    let mut stdout = io::stdout().lock();
    match summary.format {
        OutputFormat::Pretty => {
            print_translated_to(&summary.translated, &mut stdout);
            report_to(&result.issues, &mut stdout);
        }
        OutputFormat::Plain => print_summary(&result.issues, &mut stdout),
        // Service messages already carry every result.
        OutputFormat::Teamcity => return,
    }
    if result.issues.is_empty() {
        print_success_to(
            result.source_files_checked,
            summary.catalogs_loaded,
            &mut stdout,
        );
    }
}

fn print_extract(result: &CommandResult, summary: &ExtractSummary, verbose: bool) {
    let mut stdout = io::stdout().lock();
    if summary.json {
        print_extract_json(result, summary, &mut stdout);
        return;
    }

    print_calls_to(summary, &mut stdout);
    report_to(&result.issues, &mut stdout);

    let text = format!(
        "Found {} gettext {} ({} literal) in {} source {}",
        summary.call_count(),
        if summary.call_count() == 1 { "call" } else { "calls" },
        summary.literal_count(),
        result.source_files_checked,
        if result.source_files_checked == 1 {
            "file"
        } else {
            "files"
        }
    );
    let _ = writeln!(stdout, "{} {}", SUCCESS_MARK.green(), text.green());

    if verbose {
        let empty = summary.files.values().filter(|calls| calls.is_empty()).count();
        eprintln!("Note: {} file(s) contain no gettext calls", empty);
    }
}

/// Print every extracted call, grouped by file, in source order.
pub fn print_calls_to<W: Write>(summary: &ExtractSummary, writer: &mut W) {
    for (file, calls) in &summary.files {
        if calls.is_empty() {
            continue;
        }
        let _ = writeln!(writer, "{}", file.bold());

        let mut all: Vec<&ExtractedCall> = calls
            .literal_calls
            .iter()
            .chain(&calls.complex_calls)
            .collect();
        all.sort_by_key(|call| (call.context.line(), call.context.col()));

        for call in all {
            let position = format!("{}:{}", call.context.line(), call.context.col());
            let rendered = format_call(call);
            if call.is_literal() {
                let _ = writeln!(writer, "  {:<8} {}", position, rendered);
            } else {
                let _ = writeln!(
                    writer,
                    "  {:<8} {}  {}",
                    position,
                    rendered,
                    "(expression)".dimmed()
                );
            }
        }
        let _ = writeln!(writer);
    }
}

fn format_call(call: &ExtractedCall) -> String {
    let args = call
        .args
        .iter()
        .map(|arg| match arg {
            CallArg::Literal(text) => format!("{:?}", text),
            CallArg::Expression(text) => text.clone(),
        })
        .collect::<Vec<_>>()
        .join(", ");
    format!("{}({})", call.function, args)
}

fn print_extract_json<W: Write>(result: &CommandResult, summary: &ExtractSummary, writer: &mut W) {
    let errors: Vec<_> = result
        .issues
        .iter()
        .filter_map(|issue| match issue {
            Issue::ParseError(error) => Some(json!({
                "file": error.location.file_path,
                "line": error.location.line,
                "col": error.location.col,
                "message": error.error,
            })),
            _ => None,
        })
        .collect();

    let output = json!({
        "files": summary.files,
        "errors": errors,
    });
    match serde_json::to_string_pretty(&output) {
        Ok(text) => {
            let _ = writeln!(writer, "{}", text);
        }
        Err(e) => eprintln!("Error: failed to serialize calls: {}", e),
    }
}

fn print_init(summary: &InitSummary) {
    if summary.created {
        println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    }
    if let Some(ref error) = summary.error {
        eprintln!("Error: {}", error);
    }
}

// ============================================================
// Tests
// ============================================================
