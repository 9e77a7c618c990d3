//! Issue types for check results.
//!
//! Validation events, catalog failures and parse failures are folded into
//! issues for the cargo-style report. Events for the same call site are merged
//! so one call missing in several languages is reported once.

use std::collections::BTreeMap;

use enum_dispatch::enum_dispatch;

use crate::core::check::CheckOutcome;
use crate::core::error::{CatalogError, SourceSyntaxError};
use crate::core::signatures::CallKind;
use crate::core::validate::ValidationStatus;
use crate::core::{SourceContext, SourceLocation};

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    MissingMessage,
    MissingPluralForm,
    MissingCatalog,
    InvalidCatalog,
    ParseError,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::MissingMessage => write!(f, "missing-message"),
            Rule::MissingPluralForm => write!(f, "missing-plural-form"),
            Rule::MissingCatalog => write!(f, "missing-catalog"),
            Rule::InvalidCatalog => write!(f, "invalid-catalog"),
            Rule::ParseError => write!(f, "parse-error"),
        }
    }
}

// ============================================================
// Issue Types - Source Code (SourceContext)
// ============================================================

/// Literal call whose message has no translation in one or more languages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingMessageIssue {
    pub context: SourceContext,
    pub function: CallKind,
    pub msgid: String,
    pub msgctxt: Option<String>,
    /// Languages without a translation, in report order.
    pub languages: Vec<String>,
}

impl MissingMessageIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::MissingMessage
    }
}

/// A plural form that a language's plural rule can select but the catalog lacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingPluralForm {
    pub language: String,
    pub bucket: usize,
    /// Smallest probed count selecting `bucket`.
    pub sample: u64,
}

/// Plural call with one or more untranslated forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingPluralFormIssue {
    pub context: SourceContext,
    pub function: CallKind,
    pub msgid: String,
    pub msgctxt: Option<String>,
    pub forms: Vec<MissingPluralForm>,
}

impl MissingPluralFormIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::MissingPluralForm
    }
}

// ============================================================
// Issue Types - Catalogs
// ============================================================

/// No catalog file exists for a requested language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingCatalogIssue {
    pub language: String,
    pub domain: String,
    /// Where the catalog was expected.
    pub expected_path: String,
}

impl MissingCatalogIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::MissingCatalog
    }
}

/// A catalog file exists but could not be read or decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidCatalogIssue {
    pub language: String,
    pub domain: String,
    pub path: String,
    pub error: String,
}

impl InvalidCatalogIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::InvalidCatalog
    }
}

// ============================================================
// Special Issue Types
// ============================================================

/// File could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorIssue {
    pub location: SourceLocation,
    pub error: String,
}

impl ParseErrorIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::ParseError
    }
}

impl From<&SourceSyntaxError> for ParseErrorIssue {
    fn from(error: &SourceSyntaxError) -> Self {
        Self {
            location: SourceLocation::new(error.file.clone(), error.line, error.col),
            error: error.message.clone(),
        }
    }
}

// ============================================================
// Issue Enum
// ============================================================

/// A problem found by a check run.
#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    MissingMessage(MissingMessageIssue),
    MissingPluralForm(MissingPluralFormIssue),
    MissingCatalog(MissingCatalogIssue),
    InvalidCatalog(InvalidCatalogIssue),
    ParseError(ParseErrorIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        match self {
            Issue::MissingMessage(_) => MissingMessageIssue::severity(),
            Issue::MissingPluralForm(_) => MissingPluralFormIssue::severity(),
            Issue::MissingCatalog(_) => MissingCatalogIssue::severity(),
            Issue::InvalidCatalog(_) => InvalidCatalogIssue::severity(),
            Issue::ParseError(_) => ParseErrorIssue::severity(),
        }
    }

    pub fn rule(&self) -> Rule {
        match self {
            Issue::MissingMessage(_) => MissingMessageIssue::rule(),
            Issue::MissingPluralForm(_) => MissingPluralFormIssue::rule(),
            Issue::MissingCatalog(_) => MissingCatalogIssue::rule(),
            Issue::InvalidCatalog(_) => InvalidCatalogIssue::rule(),
            Issue::ParseError(_) => ParseErrorIssue::rule(),
        }
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location information for report output.
pub enum ReportLocation<'a> {
    /// Source code location (has source_line for context display).
    Source(&'a SourceContext),
    /// Position in a file without source context (parse errors).
    Position(&'a SourceLocation),
    /// File-level only (catalogs).
    File { path: &'a str },
}

/// Trait for types that can be reported to CLI.
///
/// Implemented by all issue types to provide a consistent interface for the
/// report functions. Uses `enum_dispatch` for zero-cost dispatch on the
/// `Issue` enum.
#[enum_dispatch]
pub trait Report {
    /// Get the location for this issue.
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display (msgid, language, error, etc.).
    fn message(&self) -> String;

    /// Severity level.
    fn report_severity(&self) -> Severity;

    /// Rule identifier.
    fn report_rule(&self) -> Rule;

    /// Optional hint for fixing the issue.
    fn hint(&self) -> Option<String> {
        None
    }

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }
}

// ============================================================
// Report Implementations
// ============================================================

fn context_note(msgctxt: &Option<String>) -> String {
    match msgctxt {
        Some(ctx) => format!(" (context \"{}\")", ctx),
        None => String::new(),
    }
}

impl Report for MissingMessageIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        self.msgid.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!(
            "{}{} has no translation in: {}",
            self.function,
            context_note(&self.msgctxt),
            self.languages.join(", ")
        ))
    }
}

impl Report for MissingPluralFormIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        self.msgid.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        let forms = self
            .forms
            .iter()
            .map(|form| format!("{} form {} (n = {})", form.language, form.bucket, form.sample))
            .collect::<Vec<_>>()
            .join(", ");
        Some(format!(
            "{}{} is missing {}",
            self.function,
            context_note(&self.msgctxt),
            forms
        ))
    }
}

impl Report for MissingCatalogIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.expected_path,
        }
    }

    fn message(&self) -> String {
        self.language.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!(
            "Language file {} is missing in domain '{}'",
            self.language, self.domain
        ))
    }

    fn hint(&self) -> Option<String> {
        Some("compile the catalog with msgfmt or remove the language".to_string())
    }
}

impl Report for InvalidCatalogIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File { path: &self.path }
    }

    fn message(&self) -> String {
        self.language.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(self.error.clone())
    }
}

impl Report for ParseErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Position(&self.location)
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

// ============================================================
// Building issues from a check outcome
// ============================================================

/// Fold a check outcome into sorted issues.
pub fn collect_issues(outcome: &CheckOutcome, locale_root: &std::path::Path) -> Vec<Issue> {
    let mut issues: Vec<Issue> = Vec::new();

    issues.extend(
        outcome
            .extraction
            .errors
            .iter()
            .map(|error| Issue::ParseError(error.into())),
    );

    for language in &outcome.languages {
        if outcome.loaded.missing.contains(language) {
            let expected = locale_root
                .join(language)
                .join(crate::core::catalog::loader::MESSAGES_DIR)
                .join(format!("{}.mo", outcome.domain));
            issues.push(Issue::MissingCatalog(MissingCatalogIssue {
                language: language.clone(),
                domain: outcome.domain.clone(),
                expected_path: expected.to_string_lossy().to_string(),
            }));
        }
    }
    issues.extend(outcome.loaded.invalid.iter().map(|(language, error)| {
        let (path, reason) = match error {
            CatalogError::Invalid { path, source } => (path.clone(), source.to_string()),
            CatalogError::Unreadable { path, message } => (path.clone(), message.clone()),
            CatalogError::NotFound { .. } => (String::new(), error.to_string()),
        };
        Issue::InvalidCatalog(InvalidCatalogIssue {
            language: language.clone(),
            domain: outcome.domain.clone(),
            path,
            error: reason,
        })
    }));

    // One issue per call site and rule.
    let mut messages: BTreeMap<SiteKey, MissingMessageIssue> = BTreeMap::new();
    let mut plurals: BTreeMap<SiteKey, MissingPluralFormIssue> = BTreeMap::new();
    for event in outcome.missing_events() {
        let key = SiteKey {
            location: event.source.location.clone(),
            msgid: event.message_id.clone(),
            msgctxt: event.context.clone(),
        };
        match event.status {
            ValidationStatus::MissingMessage => {
                let issue = messages.entry(key).or_insert_with(|| MissingMessageIssue {
                    context: event.source.clone(),
                    function: event.function,
                    msgid: event.message_id.clone(),
                    msgctxt: event.context.clone(),
                    languages: Vec::new(),
                });
                if !issue.languages.contains(&event.language) {
                    issue.languages.push(event.language.clone());
                }
            }
            ValidationStatus::MissingPluralForm { bucket, sample } => {
                plurals
                    .entry(key)
                    .or_insert_with(|| MissingPluralFormIssue {
                        context: event.source.clone(),
                        function: event.function,
                        msgid: event.message_id.clone(),
                        msgctxt: event.context.clone(),
                        forms: Vec::new(),
                    })
                    .forms
                    .push(MissingPluralForm {
                        language: event.language.clone(),
                        bucket,
                        sample,
                    });
            }
            ValidationStatus::Translated => {}
        }
    }
    issues.extend(messages.into_values().map(Issue::MissingMessage));
    issues.extend(plurals.into_values().map(Issue::MissingPluralForm));

    issues.sort();
    issues
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct SiteKey {
    location: SourceLocation,
    msgid: String,
    msgctxt: Option<String>,
}

// ============================================================
// Ordering for Issue (for sorting in reports)
// ============================================================

impl Issue {
    /// Get file path for sorting.
    fn sort_file_path(&self) -> Option<&str> {
        match self.location() {
            ReportLocation::Source(ctx) => Some(ctx.file_path()),
            ReportLocation::Position(loc) => Some(&loc.file_path),
            ReportLocation::File { path } if !path.is_empty() => Some(path),
            ReportLocation::File { .. } => None,
        }
    }

    /// Get line number for sorting.
    fn sort_line(&self) -> usize {
        match self.location() {
            ReportLocation::Source(ctx) => ctx.line(),
            ReportLocation::Position(loc) => loc.line,
            ReportLocation::File { .. } => 0,
        }
    }

    /// Get column number for sorting.
    fn sort_col(&self) -> usize {
        match self.location() {
            ReportLocation::Source(ctx) => ctx.col(),
            ReportLocation::Position(loc) => loc.col,
            ReportLocation::File { .. } => 0,
        }
    }
}

impl Ord for Issue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use std::cmp::Ordering;

        // Sort by: file_path (None last), line, col, rule, message
        match (self.sort_file_path(), other.sort_file_path()) {
            (Some(a), Some(b)) => a
                .cmp(b)
                .then_with(|| self.sort_line().cmp(&other.sort_line()))
                .then_with(|| self.sort_col().cmp(&other.sort_col()))
                .then_with(|| self.rule().cmp(&other.rule()))
                .then_with(|| self.message().cmp(&other.message())),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self
                .rule()
                .cmp(&other.rule())
                .then_with(|| self.message().cmp(&other.message())),
        }
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ============================================================
// Tests
// ============================================================
