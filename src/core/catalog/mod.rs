//! Translation catalogs as seen by the validator.
//!
//! The validator only talks to the [`Catalog`] trait. Every lookup answers
//! with [`Lookup::Found`] for a real catalog entry or [`Lookup::Missing`]
//! carrying the untranslated text, so "not translated" is never confused
//! with a translation that happens to equal its msgid.

pub mod loader;
pub mod mo_catalog;

pub use loader::{LoadedCatalogs, expand_language, find_catalog, load_catalogs};
pub use mo_catalog::MoCatalog;

/// Result of a catalog lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    /// Translated text from the catalog.
    Found(&'a str),
    /// No usable entry; carries the msgid (the singular msgid for plural lookups).
    Missing(&'a str),
}

impl<'a> Lookup<'a> {
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Lookup::Missing(_))
    }

    /// The text a program would display: the translation, or the original when missing.
    pub fn text(&self) -> &'a str {
        match self {
            Lookup::Found(text) | Lookup::Missing(text) => text,
        }
    }
}

/// A compiled message catalog for one (domain, language) pair.
pub trait Catalog {
    fn domain(&self) -> &str;

    /// The language code the catalog was requested for.
    fn language(&self) -> &str;

    /// Number of plural forms declared by the catalog.
    fn nplurals(&self) -> usize;

    /// Plural bucket selected for count `n`.
    fn plural(&self, n: u64) -> usize;

    fn gettext<'a>(&'a self, msgid: &'a str) -> Lookup<'a>;

    fn pgettext<'a>(&'a self, context: &str, msgid: &'a str) -> Lookup<'a>;

    fn ngettext<'a>(&'a self, msgid: &'a str, msgid_plural: &'a str, n: u64) -> Lookup<'a>;

    fn npgettext<'a>(
        &'a self,
        context: &str,
        msgid: &'a str,
        msgid_plural: &'a str,
        n: u64,
    ) -> Lookup<'a>;
}
