use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::{CliTest, stdout};

#[test]
fn test_extract_lists_calls_in_source_order() -> Result<()> {
    let test = CliTest::with_file(
        "src/app.js",
        "ngettext('egg', 'eggs', n);\ngettext(label);\nnpgettext('menu', 'spam', 'spams', 3);\n",
    )?;

    let output = test.extract_command().output()?;
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(0));
    assert!(out.contains("src/app.js\n"), "{}", out);
    assert!(out.contains("1:1      ngettext(\"egg\", \"eggs\")\n"), "{}", out);
    assert!(out.contains("2:1      gettext(label)  (expression)\n"), "{}", out);
    assert!(
        out.contains("3:1      npgettext(\"menu\", \"spam\", \"spams\")\n"),
        "{}",
        out
    );
    assert!(
        out.contains("Found 3 gettext calls (2 literal) in 1 source file"),
        "{}",
        out
    );
    Ok(())
}

#[test]
fn test_extract_json() -> Result<()> {
    let test = CliTest::with_file("src/app.ts", "gettext('herring');\ngettext(name);\n")?;

    let output = test.extract_command().arg("--json").output()?;
    assert_eq!(output.status.code(), Some(0));

    let parsed: Value = serde_json::from_str(&stdout(&output))?;
    assert_eq!(parsed["errors"], Value::Array(Vec::new()));

    let files = parsed["files"].as_object().expect("files should be an object");
    assert_eq!(files.len(), 1);
    let (path, calls) = files.iter().next().expect("one file");
    assert!(path.ends_with("app.ts"));
    assert_eq!(calls["literal_calls"].as_array().map(Vec::len), Some(1));
    assert_eq!(calls["complex_calls"].as_array().map(Vec::len), Some(1));
    assert_eq!(calls["literal_calls"][0]["args"][0]["text"], "herring");
    Ok(())
}

#[test]
fn test_extract_with_alias() -> Result<()> {
    let test = CliTest::with_file("src/app.js", "__('herring');\n")?;

    let output = test
        .extract_command()
        .args(["--alias", "__=gettext"])
        .output()?;
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(0));
    assert!(out.contains("gettext(\"herring\")"), "{}", out);
    Ok(())
}

#[test]
fn test_extract_reports_parse_errors() -> Result<()> {
    let test = CliTest::with_file("src/bad.js", "gettext('herring'\n")?;
    test.write_file("src/good.js", "gettext('spam');\n")?;

    let output = test.extract_command().arg("--json").output()?;
    assert_eq!(output.status.code(), Some(1));

    let parsed: Value = serde_json::from_str(&stdout(&output))?;
    let errors = parsed["errors"].as_array().expect("errors should be an array");
    assert_eq!(errors.len(), 1);
    assert!(
        errors[0]["file"]
            .as_str()
            .is_some_and(|f| f.ends_with("bad.js"))
    );
    Ok(())
}
