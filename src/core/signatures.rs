//! Recognized gettext-family functions and the argument positions they translate.
//!
//! Every function name the extractor tracks resolves to one [`CallKind`]. The
//! twelve canonical names are always present; aliases (e.g. `_` for `gettext`)
//! are registered per table and point at the canonical kind by value.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use super::error::UnknownCanonicalName;

/// The twelve canonical gettext call shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CallKind {
    Gettext,
    Lgettext,
    Ngettext,
    Lngettext,
    Dgettext,
    Ldgettext,
    Dngettext,
    Ldngettext,
    Pgettext,
    Npgettext,
    Dpgettext,
    Dnpgettext,
}

impl CallKind {
    pub const ALL: [CallKind; 12] = [
        CallKind::Gettext,
        CallKind::Lgettext,
        CallKind::Ngettext,
        CallKind::Lngettext,
        CallKind::Dgettext,
        CallKind::Ldgettext,
        CallKind::Dngettext,
        CallKind::Ldngettext,
        CallKind::Pgettext,
        CallKind::Npgettext,
        CallKind::Dpgettext,
        CallKind::Dnpgettext,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CallKind::Gettext => "gettext",
            CallKind::Lgettext => "lgettext",
            CallKind::Ngettext => "ngettext",
            CallKind::Lngettext => "lngettext",
            CallKind::Dgettext => "dgettext",
            CallKind::Ldgettext => "ldgettext",
            CallKind::Dngettext => "dngettext",
            CallKind::Ldngettext => "ldngettext",
            CallKind::Pgettext => "pgettext",
            CallKind::Npgettext => "npgettext",
            CallKind::Dpgettext => "dpgettext",
            CallKind::Dnpgettext => "dnpgettext",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Zero-based positions of the arguments that carry translatable text.
    ///
    /// The trailing count argument of plural calls is not tracked.
    pub fn tracked_indices(self) -> &'static [usize] {
        match self {
            CallKind::Gettext | CallKind::Lgettext => &[0],
            CallKind::Ngettext
            | CallKind::Lngettext
            | CallKind::Dgettext
            | CallKind::Ldgettext
            | CallKind::Pgettext => &[0, 1],
            CallKind::Dngettext
            | CallKind::Ldngettext
            | CallKind::Npgettext
            | CallKind::Dpgettext => &[0, 1, 2],
            CallKind::Dnpgettext => &[0, 1, 2, 3],
        }
    }

    pub fn arity(self) -> usize {
        self.tracked_indices().len()
    }

    pub fn is_plural(self) -> bool {
        matches!(
            self,
            CallKind::Ngettext
                | CallKind::Lngettext
                | CallKind::Dngettext
                | CallKind::Ldngettext
                | CallKind::Npgettext
                | CallKind::Dnpgettext
        )
    }

    pub fn has_domain(self) -> bool {
        matches!(
            self,
            CallKind::Dgettext
                | CallKind::Ldgettext
                | CallKind::Dngettext
                | CallKind::Ldngettext
                | CallKind::Dpgettext
                | CallKind::Dnpgettext
        )
    }

    pub fn has_context(self) -> bool {
        matches!(
            self,
            CallKind::Pgettext | CallKind::Npgettext | CallKind::Dpgettext | CallKind::Dnpgettext
        )
    }
}

impl fmt::Display for CallKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Name → call kind lookup used by the extractor.
///
/// Built fresh for every extractor so alias registration never leaks between runs.
#[derive(Debug, Clone)]
pub struct SignatureTable {
    entries: HashMap<String, CallKind>,
}

impl SignatureTable {
    pub fn new() -> Self {
        let entries = CallKind::ALL
            .into_iter()
            .map(|kind| (kind.name().to_string(), kind))
            .collect();
        Self { entries }
    }

    /// Build a table with every alias in `aliases` registered.
    ///
    /// Fails on the first alias whose target is not a canonical name.
    pub fn with_aliases<'a, I>(aliases: I) -> Result<Self, UnknownCanonicalName>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut table = Self::new();
        for (alias, canonical) in aliases {
            table.register_alias(alias, canonical)?;
        }
        Ok(table)
    }

    /// Register `alias` as another name for `canonical`.
    ///
    /// Only the twelve canonical names are valid targets; aliases of aliases are
    /// rejected. Re-registering a name replaces its previous target.
    pub fn register_alias(&mut self, alias: &str, canonical: &str) -> Result<(), UnknownCanonicalName> {
        let kind = CallKind::from_name(canonical).ok_or_else(|| UnknownCanonicalName {
            alias: alias.to_string(),
            canonical: canonical.to_string(),
        })?;
        self.entries.insert(alias.to_string(), kind);
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<CallKind> {
        self.entries.get(name).copied()
    }

    pub fn tracked_indices(&self, name: &str) -> Option<&'static [usize]> {
        self.lookup(name).map(CallKind::tracked_indices)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SignatureTable {
    fn default() -> Self {
        Self::new()
    }
}
