//! Replays literal calls against loaded catalogs.
//!
//! Non-plural calls need one lookup. Plural calls are replayed once per
//! [`PluralProbe`] sample so that every plural form the catalog's rule can
//! select is checked.

use std::collections::BTreeMap;

use serde::Serialize;

use super::catalog::{Catalog, LoadedCatalogs, Lookup};
use super::data::{ExtractedCall, FileCallSet, MessageRef, SourceContext};
use super::probe::PluralProbe;
use super::signatures::CallKind;

/// Outcome of replaying one call (or one plural form of it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum ValidationStatus {
    Translated,
    MissingMessage,
    MissingPluralForm { bucket: usize, sample: u64 },
}

impl ValidationStatus {
    pub fn is_missing(&self) -> bool {
        !matches!(self, ValidationStatus::Translated)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationEvent {
    pub file: String,
    pub language: String,
    pub function: CallKind,
    pub message_id: String,
    pub context: Option<String>,
    #[serde(skip)]
    pub source: SourceContext,
    #[serde(flatten)]
    pub status: ValidationStatus,
}

impl ValidationEvent {
    pub fn is_missing(&self) -> bool {
        self.status.is_missing()
    }
}

/// Validates calls against a single catalog.
pub struct Validator<'a> {
    catalog: &'a dyn Catalog,
    probe: PluralProbe,
    include_translated: bool,
}

impl<'a> Validator<'a> {
    pub fn new(catalog: &'a dyn Catalog, include_translated: bool) -> Self {
        Self {
            catalog,
            probe: PluralProbe::for_catalog(catalog),
            include_translated,
        }
    }

    /// Plural forms the catalog declares that no probed count selects.
    pub fn unprobed_forms(&self) -> Vec<usize> {
        let probed = self.probe.buckets();
        (0..self.catalog.nplurals())
            .filter(|bucket| !probed.contains(bucket))
            .collect()
    }

    /// A domain-qualified call only applies to the catalog of that domain.
    pub fn applies_to(&self, call: &ExtractedCall) -> bool {
        call.message()
            .is_some_and(|message| message.domain.is_none_or(|d| d == self.catalog.domain()))
    }

    pub fn validate_call(&self, file: &str, call: &ExtractedCall) -> Vec<ValidationEvent> {
        let Some(message) = call.message() else {
            return Vec::new();
        };
        if !self.applies_to(call) {
            return Vec::new();
        }

        let event = |status: ValidationStatus| ValidationEvent {
            file: file.to_string(),
            language: self.catalog.language().to_string(),
            function: call.function,
            message_id: message.msgid.to_string(),
            context: message.context.map(str::to_string),
            source: call.context.clone(),
            status,
        };

        if !call.function.is_plural() {
            let status = if self.is_found(&message, None) {
                ValidationStatus::Translated
            } else {
                ValidationStatus::MissingMessage
            };
            return self.keep(status).map(event).into_iter().collect();
        }

        let mut events = Vec::new();
        let mut all_found = true;
        for (sample, bucket) in self.probe.iter() {
            if !self.is_found(&message, Some(sample)) {
                all_found = false;
                events.push(event(ValidationStatus::MissingPluralForm { bucket, sample }));
            }
        }
        if all_found && self.include_translated {
            events.push(event(ValidationStatus::Translated));
        }
        events
    }

    /// Validate every literal call of one file, in source order.
    pub fn validate_file(&self, file: &str, calls: &FileCallSet) -> Vec<ValidationEvent> {
        calls
            .literal_calls
            .iter()
            .flat_map(|call| self.validate_call(file, call))
            .collect()
    }

    fn keep(&self, status: ValidationStatus) -> Option<ValidationStatus> {
        (status.is_missing() || self.include_translated).then_some(status)
    }

    fn is_found(&self, message: &MessageRef<'_>, n: Option<u64>) -> bool {
        let catalog = self.catalog;
        let lookup: Lookup<'_> = match (message.context, message.msgid_plural.zip(n)) {
            (None, None) => catalog.gettext(message.msgid),
            (Some(context), None) => catalog.pgettext(context, message.msgid),
            (None, Some((plural, n))) => catalog.ngettext(message.msgid, plural, n),
            (Some(context), Some((plural, n))) => {
                catalog.npgettext(context, message.msgid, plural, n)
            }
        };
        lookup.is_found()
    }
}

/// Validate every file against every loaded catalog.
///
/// Events are ordered by language, then file, then call position.
pub fn validate(
    files: &BTreeMap<String, FileCallSet>,
    loaded: &LoadedCatalogs,
    include_translated: bool,
) -> Vec<ValidationEvent> {
    let mut events = Vec::new();
    for catalog in loaded.catalogs.values() {
        let validator = Validator::new(catalog, include_translated);
        for (file, calls) in files {
            events.extend(validator.validate_file(file, calls));
        }
    }
    events
}
