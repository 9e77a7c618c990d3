//! Core engine: extraction, catalogs and validation.
//!
//! ## Pipeline
//!
//! 1. **Extraction** (`extract`): parse sources and collect gettext call sites
//! 2. **Loading** (`catalog`): load one compiled catalog per requested language
//! 3. **Validation** (`validate`): replay literal calls against each catalog,
//!    probing every plural form (`probe`)
//!
//! `check` runs the whole pipeline for a [`CheckContext`].

pub mod catalog;
pub mod check;
pub mod context;
pub mod data;
pub mod error;
pub mod extract;
pub mod parsers;
pub mod probe;
pub mod signatures;
pub mod validate;

#[cfg(test)]
pub mod test_utils;

pub use check::{CheckOutcome, run_check};
pub use context::CheckContext;
pub use data::{CallArg, ExtractedCall, FileCallSet, MessageRef, SourceContext, SourceLocation};
