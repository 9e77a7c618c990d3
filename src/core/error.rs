//! Typed errors for the extraction and catalog layers.
//!
//! Application plumbing (config loading, CLI dispatch) stays on `anyhow`;
//! the variants here are the conditions callers need to match on.

use thiserror::Error;

/// A scanned file could not be parsed.
///
/// The file contributes no calls when this is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{file}:{line}:{col}: {message}")]
pub struct SourceSyntaxError {
    pub file: String,
    /// 1-based line, or 0 when the file could not be read at all.
    pub line: usize,
    /// 1-based column, or 0 when the file could not be read at all.
    pub col: usize,
    pub message: String,
}

impl SourceSyntaxError {
    pub fn new(file: impl Into<String>, line: usize, col: usize, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            line,
            col,
            message: message.into(),
        }
    }

    /// An error that is not tied to a position in the file (unreadable input).
    pub fn unpositioned(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(file, 0, 0, message)
    }
}

/// Alias configuration named a canonical function that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown canonical name '{canonical}' for alias '{alias}'")]
pub struct UnknownCanonicalName {
    pub alias: String,
    pub canonical: String,
}

/// Structural problems in a compiled `.mo` catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoError {
    #[error("file is too short to be a compiled catalog ({0} bytes)")]
    TooShort(usize),
    #[error("bad magic number {0:#010x}")]
    BadMagic(u32),
    #[error("unsupported major revision {0}")]
    UnsupportedRevision(u32),
    #[error("string table entry {index} points outside the file")]
    OutOfBounds { index: usize },
    #[error("invalid Plural-Forms header: {0}")]
    PluralForms(String),
    #[error("unsupported charset '{0}'")]
    UnsupportedCharset(String),
}

/// Per-language catalog loading failures.
///
/// Both variants are recoverable: the language is excluded from validation and
/// the rest of the batch continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Language file {language} is missing in domain '{domain}'")]
    NotFound { language: String, domain: String },
    #[error("{path}: {source}")]
    Invalid {
        path: String,
        #[source]
        source: MoError,
    },
    #[error("{path}: {message}")]
    Unreadable { path: String, message: String },
}
