use std::process::ExitCode;

/// Process exit status of a checktext run.
///
/// - `Success` (0): nothing failed; missing catalogs alone are only warnings
/// - `Failure` (1): a file failed to parse, a catalog was invalid, or a translation is missing
/// - `Error` (2): the run could not start (bad config, unknown alias target, I/O failure)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
