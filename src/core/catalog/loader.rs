use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use super::MoCatalog;
use crate::core::error::CatalogError;

/// Sub-directory between the language directory and the catalog file.
pub const MESSAGES_DIR: &str = "LC_MESSAGES";

/// Outcome of loading one catalog per requested language.
#[derive(Debug, Default)]
pub struct LoadedCatalogs {
    pub catalogs: BTreeMap<String, MoCatalog>,
    pub missing: BTreeSet<String>,
    /// Catalog files that exist but could not be read or decoded.
    pub invalid: Vec<(String, CatalogError)>,
}

impl LoadedCatalogs {
    pub fn len(&self) -> usize {
        self.catalogs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalogs.is_empty()
    }
}

/// Load `{locale_root}/{language}/LC_MESSAGES/{domain}.mo` for every language.
///
/// A missing or broken catalog never aborts the batch; the language is recorded
/// in `missing` or `invalid` and excluded from validation.
pub fn load_catalogs(languages: &[String], domain: &str, locale_root: &Path) -> LoadedCatalogs {
    let mut loaded = LoadedCatalogs::default();

    for language in languages {
        if loaded.catalogs.contains_key(language)
            || loaded.missing.contains(language)
            || loaded.invalid.iter().any(|(seen, _)| seen == language)
        {
            continue;
        }

        let Some(path) = find_catalog(language, domain, locale_root) else {
            loaded.missing.insert(language.clone());
            continue;
        };

        match MoCatalog::open(&path, domain, language) {
            Ok(catalog) => {
                loaded.catalogs.insert(language.clone(), catalog);
            }
            Err(error) => loaded.invalid.push((language.clone(), error)),
        }
    }

    loaded
}

/// Path of the first existing catalog for `language`, trying its expansions in order.
pub fn find_catalog(language: &str, domain: &str, locale_root: &Path) -> Option<PathBuf> {
    expand_language(language)
        .into_iter()
        .map(|variant| {
            locale_root
                .join(variant)
                .join(MESSAGES_DIR)
                .join(format!("{}.mo", domain))
        })
        .find(|path| path.is_file())
}

/// Expand a locale code into the directory names gettext would try, most
/// specific first.
///
/// `de_DE.UTF-8@euro` yields `de_DE.UTF-8@euro`, `de.UTF-8@euro`, `de_DE@euro`,
/// `de@euro`, `de_DE.UTF-8`, `de.UTF-8`, `de_DE`, `de`.
pub fn expand_language(language: &str) -> Vec<String> {
    let (rest, modifier) = split_component(language, '@');
    let (rest, codeset) = split_component(rest, '.');
    let (lang, territory) = split_component(rest, '_');

    // Bit order matches gettext: territory, codeset, modifier.
    const TERRITORY: u8 = 1;
    const CODESET: u8 = 2;
    const MODIFIER: u8 = 4;

    let present = territory.map_or(0, |_| TERRITORY)
        | codeset.map_or(0, |_| CODESET)
        | modifier.map_or(0, |_| MODIFIER);

    let mut variants = Vec::new();
    for mask in (0..=present).rev() {
        if mask & !present != 0 {
            continue;
        }
        let mut value = lang.to_string();
        if mask & TERRITORY != 0
            && let Some(territory) = territory
        {
            value.push('_');
            value.push_str(territory);
        }
        if mask & CODESET != 0
            && let Some(codeset) = codeset
        {
            value.push('.');
            value.push_str(codeset);
        }
        if mask & MODIFIER != 0
            && let Some(modifier) = modifier
        {
            value.push('@');
            value.push_str(modifier);
        }
        variants.push(value);
    }
    variants
}

fn split_component(value: &str, separator: char) -> (&str, Option<&str>) {
    match value.split_once(separator) {
        Some((head, tail)) => (head, Some(tail)),
        None => (value, None),
    }
}
