use std::env;

use anyhow::{Ok, Result};
use colored::Colorize;

use super::super::args::{CheckCommand, OutputFormat};
use super::{
    helper::finish,
    {CheckSummary, CommandResult, CommandSummary},
};

use crate::{
    core::{CheckContext, run_check, validate::ValidationStatus},
    issues::collect_issues,
    sink::{NullSink, PlainSink, ReportingSink, TeamCitySink},
};

/// Environment variable TeamCity sets for build steps.
pub const TEAMCITY_ENV: &str = "TEAMCITY_VERSION";

/// The explicit `--format`, else TeamCity messages inside a TeamCity build.
pub fn resolve_format(explicit: Option<OutputFormat>) -> OutputFormat {
    explicit.unwrap_or_else(|| {
        if env::var_os(TEAMCITY_ENV).is_some() {
            OutputFormat::Teamcity
        } else {
            OutputFormat::Pretty
        }
    })
}

pub fn check(cmd: CheckCommand) -> Result<CommandResult> {
    let args = &cmd.args;
    let ctx = CheckContext::new(&args.common, &args.catalog)?;
    let format = resolve_format(args.format);

    if ctx.languages().is_empty() {
        eprintln!(
            "{} no languages configured; only source files are checked (use {} or 'languages')",
            "warning:".bold().yellow(),
            "-l".cyan()
        );
    }

    let mut sink: Box<dyn ReportingSink> = match format {
        OutputFormat::Pretty => Box::new(NullSink),
        OutputFormat::Plain => Box::new(PlainSink::stdout()),
        OutputFormat::Teamcity => Box::new(TeamCitySink::stdout()),
    };
    let outcome = run_check(&ctx, args.show_translated, sink.as_mut());
    drop(sink);

    let issues = collect_issues(&outcome, &ctx.locale_root);
    let translated = outcome
        .events
        .iter()
        .filter(|event| event.status == ValidationStatus::Translated)
        .cloned()
        .collect();

    Ok(finish(
        CommandSummary::Check(CheckSummary {
            format,
            translated,
            catalogs_loaded: outcome.loaded.len(),
        }),
        issues,
        outcome.extraction.files_scanned(),
        true,
    ))
}
