use std::collections::BTreeMap;

use crate::cli::args::OutputFormat;
use crate::cli::exit_status::ExitStatus;
use crate::core::FileCallSet;
use crate::core::validate::ValidationEvent;
use crate::issues::Issue;

#[derive(Debug)]
pub enum CommandSummary {
    Check(CheckSummary),
    Extract(ExtractSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct CheckSummary {
    pub format: OutputFormat,
    /// Translated events, only collected with `--show-translated`.
    pub translated: Vec<ValidationEvent>,
    pub catalogs_loaded: usize,
}

#[derive(Debug)]
pub struct ExtractSummary {
    pub files: BTreeMap<String, FileCallSet>,
    pub json: bool,
}

impl ExtractSummary {
    pub fn call_count(&self) -> usize {
        self.files.values().map(FileCallSet::len).sum()
    }

    pub fn literal_count(&self) -> usize {
        self.files.values().map(|calls| calls.literal_calls.len()).sum()
    }
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
    pub error: Option<String>,
}

/// Result of running a checktext command.
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
    pub warning_count: usize,
    /// If true, exit code 1 should be returned when error_count > 0.
    pub exit_on_errors: bool,
    /// All issues found, sorted.
    pub issues: Vec<Issue>,
    /// Number of files that failed to parse.
    pub parse_error_count: usize,
    /// Number of source files that were scanned.
    pub source_files_checked: usize,
}

impl CommandResult {
    pub fn exit_status(&self) -> ExitStatus {
        if self.exit_on_errors && self.error_count > 0 {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
}
