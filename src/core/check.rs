//! Check pipeline: extract calls, load catalogs, validate, report.

use super::{
    CheckContext,
    catalog::LoadedCatalogs,
    extract::FolderExtraction,
    validate::{ValidationEvent, Validator},
};
use crate::sink::ReportingSink;

/// Everything a check run produced.
#[derive(Debug)]
pub struct CheckOutcome {
    pub extraction: FolderExtraction,
    pub loaded: LoadedCatalogs,
    /// Requested languages, deduplicated, in request order.
    pub languages: Vec<String>,
    pub domain: String,
    /// Ordered by language, then file, then call position.
    pub events: Vec<ValidationEvent>,
}

impl CheckOutcome {
    pub fn missing_events(&self) -> impl Iterator<Item = &ValidationEvent> {
        self.events.iter().filter(|event| event.is_missing())
    }

    pub fn missing_count(&self) -> usize {
        self.missing_events().count()
    }

    pub fn parse_error_count(&self) -> usize {
        self.extraction.errors.len()
    }

}

/// Run a full check, reporting progress to `sink`.
pub fn run_check(
    ctx: &CheckContext,
    include_translated: bool,
    sink: &mut dyn ReportingSink,
) -> CheckOutcome {
    sink.suite_started(ctx.target());

    let extraction = ctx.extract();
    for error in &extraction.errors {
        sink.parse_failed(error);
    }

    let domain = ctx.domain().to_string();
    let mut languages: Vec<String> = Vec::new();
    for language in ctx.languages() {
        if !languages.contains(language) {
            languages.push(language.clone());
        }
    }

    let loaded = ctx.load_catalogs();
    for language in &languages {
        sink.catalog_check_started(language, &domain);
        if loaded.catalogs.contains_key(language) {
            sink.catalog_found(language, &domain);
        } else if let Some((_, error)) = loaded.invalid.iter().find(|(l, _)| l == language) {
            sink.catalog_invalid(language, &domain, error);
        } else {
            sink.catalog_missing(language, &domain);
        }
    }

    if ctx.verbose {
        report_foreign_domain_calls(&extraction, &domain);
    }

    let mut events = Vec::new();
    for (language, catalog) in &loaded.catalogs {
        let validator = Validator::new(catalog, include_translated);
        if ctx.verbose {
            report_unprobed_forms(language, &validator);
        }
        for (file, calls) in &extraction.files {
            sink.token_check_started(language, file);
            let file_events = validator.validate_file(file, calls);
            for event in &file_events {
                sink.token_reported(event);
            }
            let missing = file_events.iter().filter(|e| e.is_missing()).count();
            sink.token_check_finished(language, file, missing);
            events.extend(file_events);
        }
    }

    sink.suite_finished();

    CheckOutcome {
        extraction,
        loaded,
        languages,
        domain,
        events,
    }
}

fn report_foreign_domain_calls(extraction: &FolderExtraction, domain: &str) {
    let skipped = extraction
        .files
        .values()
        .flat_map(|calls| &calls.literal_calls)
        .filter_map(|call| call.message()?.domain)
        .filter(|call_domain| *call_domain != domain)
        .count();
    if skipped > 0 {
        eprintln!(
            "Note: {} call(s) for domains other than '{}' are not validated",
            skipped, domain
        );
    }
}

fn report_unprobed_forms(language: &str, validator: &Validator<'_>) {
    let unprobed = validator.unprobed_forms();
    if !unprobed.is_empty() {
        let forms = unprobed
            .iter()
            .map(usize::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        eprintln!(
            "Note: plural form(s) {} of language {} are not selected by any probed count",
            forms, language
        );
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;
    use crate::config::Config;
    use crate::core::test_utils::MoBuilder;
    use crate::core::validate::ValidationStatus;
    use crate::sink::{NullSink, PlainSink, ScanTarget};

    fn project(root: &Path) -> CheckContext {
        let config = Config {
            source_root: root.join("src").to_string_lossy().to_string(),
            locale_root: root.join("locale").to_string_lossy().to_string(),
            languages: vec!["de".to_string(), "en".to_string(), "de".to_string()],
            ..Default::default()
        };
        CheckContext::from_config(config, false).unwrap()
    }

    fn write_sources(root: &Path) {
        fs::create_dir_all(root.join("src")).unwrap();
        fs::write(
            root.join("src/app.js"),
            "gettext('herring');\ngettext('spam');\nngettext('swallow', 'swallows', n);\n",
        )
        .unwrap();
        MoBuilder::new()
            .plural_forms("nplurals=2; plural=(n != 1);")
            .message("herring", "Hering")
            .plural("swallow", "swallows", &["Schwalbe", "Schwalben"])
            .write_to(&root.join("locale"), "de", "messages");
    }

    #[test]
    fn test_run_check() {
        let dir = tempdir().unwrap();
        write_sources(dir.path());

        let outcome = run_check(&project(dir.path()), false, &mut NullSink);

        assert_eq!(outcome.languages, vec!["de", "en"]);
        assert_eq!(outcome.loaded.len(), 1);
        assert!(outcome.loaded.missing.contains("en"));
        assert_eq!(outcome.missing_count(), 1);
        let event = outcome.missing_events().next().unwrap();
        assert_eq!(event.message_id, "spam");
        assert_eq!(event.status, ValidationStatus::MissingMessage);
    }

    #[test]
    fn test_missing_catalog_alone_has_no_failures() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/app.js"), "gettext('herring');").unwrap();

        let outcome = run_check(&project(dir.path()), false, &mut NullSink);

        assert_eq!(outcome.loaded.missing.len(), 2);
        assert!(outcome.events.is_empty());
        assert_eq!(outcome.missing_count(), 0);
        assert_eq!(outcome.parse_error_count(), 0);
        assert!(outcome.loaded.invalid.is_empty());
    }

    #[test]
    fn test_parse_error_fails_check() {
        let dir = tempdir().unwrap();
        write_sources(dir.path());
        fs::write(dir.path().join("src/broken.js"), "gettext('x'").unwrap();

        let outcome = run_check(&project(dir.path()), false, &mut NullSink);
        assert_eq!(outcome.parse_error_count(), 1);
    }

    #[test]
    fn test_invalid_catalog_fails_check() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        let messages = dir.path().join("locale/en/LC_MESSAGES");
        fs::create_dir_all(&messages).unwrap();
        fs::write(messages.join("messages.mo"), b"\x00\x01").unwrap();

        let outcome = run_check(&project(dir.path()), false, &mut NullSink);
        assert_eq!(outcome.loaded.invalid.len(), 1);
    }

    #[test]
    fn test_sink_receives_events_in_order() {
        let dir = tempdir().unwrap();
        write_sources(dir.path());
        let ctx = project(dir.path());

        let mut sink = PlainSink::new(Vec::new());
        run_check(&ctx, false, &mut sink);
        let output = String::from_utf8(sink.into_inner()).unwrap();
        let file = dir.path().join("src").join("app.js");
        let expected = format!(
            "Validating gettext tokens\n\
             Checking gettext tokens in folder '{}'\n\
             Checking existence of language de in domain 'messages'\n\
             Language de in domain 'messages' found.\n\
             Checking existence of language en in domain 'messages'\n\
             Language file en is missing in domain 'messages'\n\
             Verifying tokens for language de in file '{}'\n\
             msgid 'spam' is missing a translation in language 'de'\n",
            ctx.target().path().display(),
            file.display()
        );
        assert_eq!(output, expected);
        assert!(matches!(ctx.target(), ScanTarget::Folder(_)));
    }

    #[test]
    fn test_plural_ids_follow_the_catalog_rule() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src")).unwrap();
        fs::write(root.join("src/app.js"), "ngettext('swallow', 'swallows', n);\n").unwrap();
        MoBuilder::new()
            .plural_forms("nplurals=3; plural=(n%10==1 && n%100!=11 ? 0 : n%10>=2 && n%10<=4 && (n%100<10 || n%100>=20) ? 1 : 2);")
            .write_to(&root.join("locale"), "ru", "messages");
        let config = Config {
            source_root: root.join("src").to_string_lossy().to_string(),
            locale_root: root.join("locale").to_string_lossy().to_string(),
            languages: vec!["ru".to_string()],
            ..Default::default()
        };
        let ctx = CheckContext::from_config(config, false).unwrap();

        let mut sink = PlainSink::new(Vec::new());
        let outcome = run_check(&ctx, false, &mut sink);
        let output = String::from_utf8(sink.into_inner()).unwrap();

        let statuses: Vec<ValidationStatus> =
            outcome.events.iter().map(|e| e.status).collect();
        assert_eq!(
            statuses,
            vec![
                ValidationStatus::MissingPluralForm { bucket: 2, sample: 0 },
                ValidationStatus::MissingPluralForm { bucket: 0, sample: 1 },
                ValidationStatus::MissingPluralForm { bucket: 1, sample: 2 },
            ]
        );
        let plural_lines: Vec<&str> = output.lines().filter(|l| l.contains("plural id")).collect();
        assert_eq!(
            plural_lines,
            vec![
                "msgid 'swallow' is missing a translation in language 'ru' for plural id 2 (n = 0)",
                "msgid 'swallow' is missing a translation in language 'ru' for plural id 0 (n = 1)",
                "msgid 'swallow' is missing a translation in language 'ru' for plural id 1 (n = 2)",
            ]
        );
    }

    #[test]
    fn test_include_translated_events() {
        let dir = tempdir().unwrap();
        write_sources(dir.path());

        let outcome = run_check(&project(dir.path()), true, &mut NullSink);
        let translated = outcome
            .events
            .iter()
            .filter(|e| e.status == ValidationStatus::Translated)
            .count();
        assert_eq!(translated, 2);
        assert_eq!(outcome.missing_count(), 1);
    }
}
