use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, ENGLISH_PLURALS, stderr, stdout};

fn german_project(source: &str, entries: &[(&str, &str)]) -> Result<CliTest> {
    let test = CliTest::with_file("src/app.js", source)?;
    test.write_mo("de", "messages", ENGLISH_PLURALS, entries)?;
    Ok(test)
}

// ============================================================
// Exit status
// ============================================================

#[test]
fn test_all_translated_succeeds() -> Result<()> {
    let test = german_project(
        "gettext('herring');\npgettext('rude', 'parrot');\n",
        &[("herring", "Hering"), ("rude\x04parrot", "Papagei")],
    )?;

    let output = test.check_command().args(["-l", "de"]).output()?;

    assert_eq!(output.status.code(), Some(0));
    assert!(
        stdout(&output).contains("Checked 1 source file against 1 catalog - no issues found"),
        "stdout: {}",
        stdout(&output)
    );
    Ok(())
}

#[test]
fn test_missing_message_fails() -> Result<()> {
    let test = german_project(
        "gettext('herring');\ngettext('shrubbery');\n",
        &[("herring", "Hering")],
    )?;

    let output = test.check_command().args(["-l", "de"]).output()?;
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(1));
    assert!(out.contains("error: \"shrubbery\"  missing-message"), "{}", out);
    assert!(out.contains("src/app.js:2:1"), "{}", out);
    assert!(out.contains("gettext has no translation in: de"), "{}", out);
    assert!(!out.contains("\"herring\""), "{}", out);
    assert!(out.contains("1 problem (1 error, 0 warnings)"), "{}", out);
    Ok(())
}

#[test]
fn test_empty_translation_counts_as_missing() -> Result<()> {
    let test = german_project("gettext('blank');\n", &[("blank", "")])?;

    let output = test.check_command().args(["-l", "de"]).output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("\"blank\"  missing-message"));
    Ok(())
}

#[test]
fn test_missing_catalog_is_only_a_warning() -> Result<()> {
    let test = CliTest::with_file("src/app.js", "gettext('herring');\n")?;

    let output = test.check_command().args(["-l", "xx"]).output()?;
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(0));
    assert!(out.contains("warning: \"xx\"  missing-catalog"), "{}", out);
    assert!(out.contains("Language file xx is missing in domain 'messages'"), "{}", out);
    assert!(out.contains("1 problem (0 errors, 1 warning)"), "{}", out);
    Ok(())
}

#[test]
fn test_invalid_catalog_fails() -> Result<()> {
    let test = CliTest::with_file("src/app.js", "gettext('herring');\n")?;
    test.write_bytes(
        "locale/fr/LC_MESSAGES/messages.mo",
        b"this is not a compiled catalog",
    )?;

    let output = test.check_command().args(["-l", "fr"]).output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("error: \"fr\"  invalid-catalog"));
    Ok(())
}

#[test]
fn test_parse_error_fails() -> Result<()> {
    let test = CliTest::with_file("src/broken.js", "gettext('herring';\n")?;

    let output = test.check_command().output()?;
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(1));
    assert!(out.contains("parse-error"), "{}", out);
    assert!(out.contains("src/broken.js:1:"), "{}", out);
    Ok(())
}

#[test]
fn test_expression_calls_are_not_validated() -> Result<()> {
    let test = german_project("gettext(name);\nngettext(one, other, n);\n", &[])?;

    let output = test.check_command().args(["-l", "de"]).output()?;

    assert_eq!(output.status.code(), Some(0));
    Ok(())
}

#[test]
fn test_invalid_config_is_an_error() -> Result<()> {
    let test = CliTest::with_file("src/app.js", "gettext('herring');\n")?;
    test.write_file(".checktextrc.json", "{ not json")?;

    let output = test.check_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Failed to parse config file"));
    Ok(())
}

#[test]
fn test_unknown_alias_target_is_an_error() -> Result<()> {
    let test = CliTest::with_file("src/app.js", "_('herring');\n")?;

    let output = test
        .check_command()
        .args(["--alias", "_=notgettext"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Invalid --alias argument"));
    Ok(())
}

// ============================================================
// Aliases, plurals and config
// ============================================================

#[test]
fn test_alias_calls_are_checked() -> Result<()> {
    let test = german_project("_('spam');\n", &[])?;

    let output = test
        .check_command()
        .args(["-l", "de", "--alias", "_=gettext"])
        .output()?;
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(1));
    assert!(out.contains("\"spam\"  missing-message"), "{}", out);
    Ok(())
}

#[test]
fn test_missing_plural_form() -> Result<()> {
    let test = german_project(
        "ngettext('coconut', 'coconuts', count);\n",
        &[("coconut\0coconuts", "Kokosnuss\0")],
    )?;

    let output = test.check_command().args(["-l", "de"]).output()?;
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(1));
    assert!(out.contains("\"coconut\"  missing-plural-form"), "{}", out);
    assert!(out.contains("ngettext is missing de form 1 (n = 0)"), "{}", out);
    Ok(())
}

#[test]
fn test_config_file_languages_and_domain() -> Result<()> {
    let test = CliTest::with_file("app/main.ts", "dgettext('shop', 'basket');\n")?;
    test.write_file(
        ".checktextrc.json",
        r#"{
  "sourceRoot": "./app",
  "localeRoot": "./i18n",
  "domain": "shop",
  "languages": ["de"]
}"#,
    )?;
    test.write_mo("de", "shop", ENGLISH_PLURALS, &[])?;
    std::fs::rename(test.root().join("locale"), test.root().join("i18n"))?;

    let output = test.check_command().output()?;
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(1));
    assert!(out.contains("\"basket\"  missing-message"), "{}", out);
    assert!(out.contains("app/main.ts:1:1"), "{}", out);
    Ok(())
}

#[test]
fn test_single_file() -> Result<()> {
    let test = german_project("gettext('herring');\n", &[("herring", "Hering")])?;
    test.write_file("src/other.js", "gettext('shrubbery');\n")?;

    let output = test
        .check_command()
        .args(["-l", "de", "--file", "src/app.js"])
        .output()?;

    assert_eq!(output.status.code(), Some(0));
    assert!(!stdout(&output).contains("shrubbery"));
    Ok(())
}

#[test]
fn test_show_translated() -> Result<()> {
    let test = german_project("gettext('herring');\n", &[("herring", "Hering")])?;

    let output = test
        .check_command()
        .args(["-l", "de", "--show-translated"])
        .output()?;
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(0));
    assert!(out.contains("\"herring\" (de)"), "{}", out);
    Ok(())
}

// ============================================================
// Output formats
// ============================================================

#[test]
fn test_plain_format() -> Result<()> {
    let test = german_project("gettext('shrubbery');\n", &[])?;

    let output = test
        .check_command()
        .args(["-l", "de", "--format", "plain"])
        .output()?;
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(1));
    assert!(out.starts_with("Validating gettext tokens\n"), "{}", out);
    assert!(out.contains("Checking existence of language de in domain 'messages'"), "{}", out);
    assert!(out.contains("Language de in domain 'messages' found."), "{}", out);
    assert!(
        out.contains("msgid 'shrubbery' is missing a translation in language 'de'"),
        "{}",
        out
    );
    Ok(())
}

#[test]
fn test_teamcity_format_from_environment() -> Result<()> {
    let test = german_project("gettext('shrubbery');\n", &[])?;

    let output = test
        .check_command()
        .args(["-l", "de"])
        .env("TEAMCITY_VERSION", "2024.1")
        .output()?;
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(1));
    assert!(
        out.starts_with("##teamcity[testSuiteStarted name='checkGettextTokens'"),
        "{}",
        out
    );
    assert!(out.contains("##teamcity[testStarted name='checkLanguageExistence.messages.de'"));
    assert!(out.contains("##teamcity[testFailed name='checkTokenExistence."));
    assert!(out.contains("type='missingToken'"));
    assert!(out.contains("##teamcity[testSuiteFinished name='checkGettextTokens'"));
    assert!(!out.contains("problem"));
    Ok(())
}

#[test]
fn test_explicit_format_overrides_teamcity_environment() -> Result<()> {
    let test = german_project("gettext('herring');\n", &[("herring", "Hering")])?;

    let output = test
        .check_command()
        .args(["-l", "de", "--format", "pretty"])
        .env("TEAMCITY_VERSION", "2024.1")
        .output()?;

    assert_eq!(output.status.code(), Some(0));
    assert!(!stdout(&output).contains("##teamcity"));
    Ok(())
}
