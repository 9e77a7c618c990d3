//! Checktext - gettext call checker for JavaScript and TypeScript
//!
//! Checktext is a CLI tool and library that finds gettext-family calls in
//! JavaScript/TypeScript sources and verifies that every literal message is
//! translated, in every plural form, by the compiled `.mo` catalogs of the
//! requested languages.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (commands and report output)
//! - `config`: Configuration file loading and parsing
//! - `core`: Extraction, catalog loading and validation
//! - `issues`: Issue type definitions for the cargo-style report
//! - `sink`: Progress reporting sinks (plain text and TeamCity)

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod sink;
