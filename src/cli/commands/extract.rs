use anyhow::{Ok, Result};

use super::super::args::{CatalogArgs, ExtractCommand};
use super::{
    helper::finish,
    {CommandResult, CommandSummary, ExtractSummary},
};

use crate::{
    core::CheckContext,
    issues::{Issue, ParseErrorIssue},
};

pub fn extract(cmd: ExtractCommand) -> Result<CommandResult> {
    let args = &cmd.args;
    let ctx = CheckContext::new(&args.common, &CatalogArgs::default())?;

    let extraction = ctx.extract();
    let issues = extraction
        .errors
        .iter()
        .map(|error| Issue::ParseError(ParseErrorIssue::from(error)))
        .collect();
    let files_scanned = extraction.files_scanned();

    Ok(finish(
        CommandSummary::Extract(ExtractSummary {
            files: extraction.files,
            json: args.json,
        }),
        issues,
        files_scanned,
        true,
    ))
}
