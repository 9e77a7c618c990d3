//! TeamCity service messages.
//!
//! Each catalog-existence and token-existence check is reported as a test so
//! that missing translations show up as failed tests in the build.

use std::io::{self, Stdout, Write};

use chrono::Local;

use super::{ReportingSink, ScanTarget};
use crate::core::error::{CatalogError, SourceSyntaxError};
use crate::core::validate::{ValidationEvent, ValidationStatus};

pub const SUITE_NAME: &str = "checkGettextTokens";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

/// Escape a value for use inside a service message attribute.
pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '|' => escaped.push_str("||"),
            '\'' => escaped.push_str("|'"),
            '\n' => escaped.push_str("|n"),
            '\r' => escaped.push_str("|r"),
            '[' => escaped.push_str("|["),
            ']' => escaped.push_str("|]"),
            '\u{0085}' => escaped.push_str("|x"),
            '\u{2028}' => escaped.push_str("|l"),
            '\u{2029}' => escaped.push_str("|p"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub struct TeamCitySink<W: Write> {
    writer: W,
    timestamps: bool,
}

impl TeamCitySink<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TeamCitySink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            timestamps: true,
        }
    }

    /// Omit the `timestamp` attribute, for reproducible output.
    pub fn without_timestamps(mut self) -> Self {
        self.timestamps = false;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn emit(&mut self, message: &str, attrs: &[(&str, &str)]) {
        let mut line = format!("##teamcity[{}", message);
        for (key, value) in attrs {
            line.push_str(&format!(" {}='{}'", key, escape(value)));
        }
        if self.timestamps {
            let now = Local::now().format(TIMESTAMP_FORMAT).to_string();
            line.push_str(&format!(" timestamp='{}'", now));
        }
        line.push(']');
        let _ = writeln!(self.writer, "{}", line);
    }

    fn test_started(&mut self, name: &str) {
        self.emit(
            "testStarted",
            &[("name", name), ("captureStandardOutput", "false")],
        );
    }

    fn test_failed(&mut self, name: &str, message: &str, details: &str, kind: &str) {
        self.emit(
            "testFailed",
            &[
                ("name", name),
                ("message", message),
                ("details", details),
                ("type", kind),
            ],
        );
    }

    fn test_finished(&mut self, name: &str) {
        self.emit("testFinished", &[("name", name)]);
    }
}

fn language_test_name(language: &str, domain: &str) -> String {
    format!("checkLanguageExistence.{}.{}", domain, language)
}

fn token_test_name(language: &str, file: &str) -> String {
    format!("checkTokenExistence.{}.{}", file, language)
}

impl<W: Write> ReportingSink for TeamCitySink<W> {
    fn suite_started(&mut self, target: ScanTarget<'_>) {
        self.emit("testSuiteStarted", &[("name", SUITE_NAME)]);
        let text = match target {
            ScanTarget::Folder(path) => format!("Checking tokens in folder {}", path.display()),
            ScanTarget::File(path) => format!("Checking tokens in file {}", path.display()),
        };
        self.emit("message", &[("text", &text), ("status", "NORMAL")]);
    }

    fn parse_failed(&mut self, error: &SourceSyntaxError) {
        let name = format!("parseSource.{}", error.file);
        self.test_started(&name);
        self.test_failed(&name, &error.message, &error.to_string(), "syntaxError");
        self.test_finished(&name);
    }

    fn catalog_check_started(&mut self, language: &str, domain: &str) {
        self.test_started(&language_test_name(language, domain));
    }

    fn catalog_found(&mut self, language: &str, domain: &str) {
        self.test_finished(&language_test_name(language, domain));
    }

    fn catalog_missing(&mut self, language: &str, domain: &str) {
        let name = language_test_name(language, domain);
        let message = format!(
            "Language file {} is missing in domain {}",
            language, domain
        );
        self.test_failed(&name, &message, "", "missingFile");
        self.test_finished(&name);
    }

    fn catalog_invalid(&mut self, language: &str, domain: &str, error: &CatalogError) {
        let name = language_test_name(language, domain);
        let message = format!(
            "Language file {} in domain {} is invalid",
            language, domain
        );
        self.test_failed(&name, &message, &error.to_string(), "invalidFile");
        self.test_finished(&name);
    }

    fn token_check_started(&mut self, language: &str, file: &str) {
        self.test_started(&token_test_name(language, file));
    }

    fn token_reported(&mut self, event: &ValidationEvent) {
        let (text, status) = match event.status {
            ValidationStatus::Translated => {
                (format!("msgid {} is translated", event.message_id), "NORMAL")
            }
            ValidationStatus::MissingMessage => (
                format!("msgid {} is missing a translation", event.message_id),
                "WARNING",
            ),
            ValidationStatus::MissingPluralForm { bucket, sample } => (
                format!(
                    "msgid {} is missing a translation for plural id {} (n = {})",
                    event.message_id, bucket, sample
                ),
                "WARNING",
            ),
        };
        self.emit("message", &[("text", &text), ("status", status)]);
    }

    fn token_check_finished(&mut self, language: &str, file: &str, missing_count: usize) {
        let name = token_test_name(language, file);
        if missing_count > 0 {
            let details = format!("{} missing translation(s)", missing_count);
            self.test_failed(&name, "Missing tokens found", &details, "missingToken");
        }
        self.test_finished(&name);
    }

    fn suite_finished(&mut self) {
        self.emit("testSuiteFinished", &[("name", SUITE_NAME)]);
    }
}
