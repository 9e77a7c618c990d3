use super::{
    args::{Arguments, Command},
    commands::{CommandResult, check::check, extract::extract, init::init},
};
use anyhow::Result;

/// Dispatch to the command handler for the parsed arguments.
///
/// # Returns
/// - `Ok(CommandResult)` with issues, counts and exit behavior
/// - `Err` if the command could not run (e.g., invalid config or alias)
pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Check(cmd)) => check(cmd),
        Some(Command::Extract(cmd)) => extract(cmd),
        Some(Command::Init) => init(),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
