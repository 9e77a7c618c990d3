use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::{Catalog, Lookup};
use crate::core::error::{CatalogError, MoError};
use crate::core::parsers::mo::{MoFile, MoHeader, context_key};
use crate::core::parsers::plural::PluralRule;

/// A catalog backed by a compiled `.mo` file.
///
/// Lookups follow GNU gettext: singular lookups fall back to the plural entry's
/// form for `n = 1`, and plural lookups are keyed by the singular msgid only.
/// Entries with an empty translation count as untranslated.
#[derive(Debug, Clone)]
pub struct MoCatalog {
    domain: String,
    language: String,
    header: MoHeader,
    plural_rule: PluralRule,
    messages: HashMap<String, String>,
    plurals: HashMap<String, Vec<String>>,
}

impl MoCatalog {
    pub fn from_mo_file(domain: &str, language: &str, mo: MoFile) -> Result<Self, MoError> {
        let plural_rule = match &mo.header.plural_forms {
            Some(forms) => PluralRule::parse(forms)?,
            None => PluralRule::germanic(),
        };

        Ok(Self {
            domain: domain.to_string(),
            language: language.to_string(),
            header: mo.header,
            plural_rule,
            messages: mo.messages,
            plurals: mo.plurals,
        })
    }

    pub fn from_bytes(domain: &str, language: &str, bytes: &[u8]) -> Result<Self, MoError> {
        Self::from_mo_file(domain, language, MoFile::parse(bytes)?)
    }

    pub fn open(path: &Path, domain: &str, language: &str) -> Result<Self, CatalogError> {
        let bytes = fs::read(path).map_err(|e| CatalogError::Unreadable {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_bytes(domain, language, &bytes).map_err(|source| CatalogError::Invalid {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn header(&self) -> &MoHeader {
        &self.header
    }

    pub fn len(&self) -> usize {
        self.messages.len() + self.plurals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn singular(&self, key: &str) -> Option<&str> {
        // The header lives under the empty msgid; it is not a translation.
        if key.is_empty() {
            return None;
        }
        self.messages
            .get(key)
            .map(String::as_str)
            .or_else(|| self.plural_form(key, 1))
            .filter(|text| !text.is_empty())
    }

    fn plural_form(&self, key: &str, n: u64) -> Option<&str> {
        self.plurals
            .get(key)
            .and_then(|forms| forms.get(self.plural(n)))
            .map(String::as_str)
            .filter(|text| !text.is_empty())
    }
}

impl Catalog for MoCatalog {
    fn domain(&self) -> &str {
        &self.domain
    }

    fn language(&self) -> &str {
        &self.language
    }

    fn nplurals(&self) -> usize {
        self.plural_rule.nplurals
    }

    fn plural(&self, n: u64) -> usize {
        self.plural_rule.select(n)
    }

    fn gettext<'a>(&'a self, msgid: &'a str) -> Lookup<'a> {
        match self.singular(msgid) {
            Some(text) => Lookup::Found(text),
            None => Lookup::Missing(msgid),
        }
    }

    fn pgettext<'a>(&'a self, context: &str, msgid: &'a str) -> Lookup<'a> {
        match self.singular(&context_key(context, msgid)) {
            Some(text) => Lookup::Found(text),
            None => Lookup::Missing(msgid),
        }
    }

    fn ngettext<'a>(&'a self, msgid: &'a str, _msgid_plural: &'a str, n: u64) -> Lookup<'a> {
        match self.plural_form(msgid, n) {
            Some(text) => Lookup::Found(text),
            None => Lookup::Missing(msgid),
        }
    }

    fn npgettext<'a>(
        &'a self,
        context: &str,
        msgid: &'a str,
        _msgid_plural: &'a str,
        n: u64,
    ) -> Lookup<'a> {
        match self.plural_form(&context_key(context, msgid), n) {
            Some(text) => Lookup::Found(text),
            None => Lookup::Missing(msgid),
        }
    }
}
