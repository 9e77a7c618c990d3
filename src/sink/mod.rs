//! Progress reporting for a check run.
//!
//! The orchestrator reports what it does through a [`ReportingSink`]; the sink
//! decides how (or whether) to render it. Every hook has a no-op default, so
//! [`NullSink`] is just the trait with nothing overridden.
//!
//! - [`PlainSink`]: human-readable progress lines
//! - [`TeamCitySink`]: TeamCity service messages for CI builds

pub mod plain;
pub mod teamcity;

use std::path::Path;

pub use plain::PlainSink;
pub use teamcity::TeamCitySink;

use crate::core::error::{CatalogError, SourceSyntaxError};
use crate::core::validate::ValidationEvent;

/// What a check run scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanTarget<'a> {
    Folder(&'a Path),
    File(&'a Path),
}

impl ScanTarget<'_> {
    pub fn path(&self) -> &Path {
        match self {
            ScanTarget::Folder(path) | ScanTarget::File(path) => path,
        }
    }
}

/// Receives structured events from a check run, in order.
///
/// A run emits `suite_started`, any `parse_failed`, one catalog-existence
/// check per requested language, one token-existence check per
/// (loaded language, scanned file), then `suite_finished`.
#[allow(unused_variables)]
pub trait ReportingSink {
    fn suite_started(&mut self, target: ScanTarget<'_>) {}

    fn parse_failed(&mut self, error: &SourceSyntaxError) {}

    fn catalog_check_started(&mut self, language: &str, domain: &str) {}

    fn catalog_found(&mut self, language: &str, domain: &str) {}

    fn catalog_missing(&mut self, language: &str, domain: &str) {}

    fn catalog_invalid(&mut self, language: &str, domain: &str, error: &CatalogError) {}

    fn token_check_started(&mut self, language: &str, file: &str) {}

    /// A validation event for the current token check (missing, or translated
    /// when translated events were requested).
    fn token_reported(&mut self, event: &ValidationEvent) {}

    fn token_check_finished(&mut self, language: &str, file: &str, missing_count: usize) {}

    fn suite_finished(&mut self) {}
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl ReportingSink for NullSink {}
