use std::io::{self, Stdout, Write};

use super::{ReportingSink, ScanTarget};
use crate::core::error::{CatalogError, SourceSyntaxError};
use crate::core::validate::{ValidationEvent, ValidationStatus};

/// Writes one human-readable line per event.
pub struct PlainSink<W: Write> {
    writer: W,
}

impl PlainSink<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> PlainSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn line(&mut self, text: &str) {
        let _ = writeln!(self.writer, "{}", text);
    }
}

impl<W: Write> ReportingSink for PlainSink<W> {
    fn suite_started(&mut self, target: ScanTarget<'_>) {
        self.line("Validating gettext tokens");
        let text = match target {
            ScanTarget::Folder(path) => {
                format!("Checking gettext tokens in folder '{}'", path.display())
            }
            ScanTarget::File(path) => format!("Checking gettext tokens in file '{}'", path.display()),
        };
        self.line(&text);
    }

    fn parse_failed(&mut self, error: &SourceSyntaxError) {
        self.line(&format!("Could not parse {}", error));
    }

    fn catalog_check_started(&mut self, language: &str, domain: &str) {
        self.line(&format!(
            "Checking existence of language {} in domain '{}'",
            language, domain
        ));
    }

    fn catalog_found(&mut self, language: &str, domain: &str) {
        self.line(&format!("Language {} in domain '{}' found.", language, domain));
    }

    fn catalog_missing(&mut self, language: &str, domain: &str) {
        self.line(&format!(
            "Language file {} is missing in domain '{}'",
            language, domain
        ));
    }

    fn catalog_invalid(&mut self, language: &str, domain: &str, error: &CatalogError) {
        self.line(&format!(
            "Language file {} in domain '{}' is invalid: {}",
            language, domain, error
        ));
    }

    fn token_check_started(&mut self, language: &str, file: &str) {
        self.line(&format!(
            "Verifying tokens for language {} in file '{}'",
            language, file
        ));
    }

    fn token_reported(&mut self, event: &ValidationEvent) {
        let msgid = match &event.context {
            Some(context) => format!("msgid '{}' (context '{}')", event.message_id, context),
            None => format!("msgid '{}'", event.message_id),
        };
        let text = match event.status {
            ValidationStatus::Translated => {
                format!("{} is translated in language '{}'", msgid, event.language)
            }
            ValidationStatus::MissingMessage => format!(
                "{} is missing a translation in language '{}'",
                msgid, event.language
            ),
            ValidationStatus::MissingPluralForm { bucket, sample } => format!(
                "{} is missing a translation in language '{}' for plural id {} (n = {})",
                msgid, event.language, bucket, sample
            ),
        };
        self.line(&text);
    }
}
