//! CLI argument definitions using clap.
//!
//! This module defines the command-line interface structure for all checktext commands.
//! It uses clap's derive API for declarative argument parsing.
//!
//! ## Commands
//!
//! - `check`: Validate gettext calls against compiled catalogs
//! - `extract`: List the gettext calls found in the sources
//! - `init`: Initialize checktext configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Check(cmd)) => cmd.args.common.verbose,
            Some(Command::Extract(cmd)) => cmd.args.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Parse an `ALIAS=CANONICAL` pair.
pub fn parse_alias(value: &str) -> Result<(String, String), String> {
    match value.split_once('=') {
        Some((alias, canonical)) if !alias.is_empty() && !canonical.is_empty() => {
            Ok((alias.trim().to_string(), canonical.trim().to_string()))
        }
        _ => Err(format!("expected ALIAS=CANONICAL, got '{}'", value)),
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Source code root directory (overrides config file)
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Check a single source file instead of the source root
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Treat ALIAS as another name for a gettext function (e.g. `_=gettext`)
    #[arg(long = "alias", value_name = "ALIAS=CANONICAL", value_parser = parse_alias)]
    pub aliases: Vec<(String, String)>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Where compiled catalogs live and which ones to load.
#[derive(Debug, Clone, Default, Args)]
pub struct CatalogArgs {
    /// Catalog root containing `<lang>/LC_MESSAGES/<domain>.mo` (overrides config file)
    #[arg(long)]
    pub locale_root: Option<PathBuf>,

    /// Gettext domain (overrides config file)
    #[arg(long)]
    pub domain: Option<String>,

    /// Language to validate; repeat for several (overrides config file)
    #[arg(short = 'l', long = "language", value_name = "LANG")]
    pub languages: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Cargo-style issue report
    Pretty,
    /// Progress lines followed by a summary
    Plain,
    /// TeamCity service messages
    Teamcity,
}

#[derive(Debug, Parser)]
pub struct CheckArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// Output format (default: teamcity when TEAMCITY_VERSION is set, pretty otherwise)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Also report messages that are translated
    #[arg(long)]
    pub show_translated: bool,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub args: CheckArgs,
}

#[derive(Debug, Parser)]
pub struct ExtractArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Print calls as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ExtractCommand {
    #[command(flatten)]
    pub args: ExtractArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check that every literal gettext call has a translation in each language
    Check(CheckCommand),
    /// List the gettext calls found in the sources
    Extract(ExtractCommand),
    /// Initialize a new .checktextrc.json configuration file
    Init,
}
