//! CLI-level errors (wraps domain, input and config errors)

use thiserror::Error;

use crate::config::SettingsError;
use crate::domain::ValidationError;
use crate::parser::ParseError;
use crate::render::RenderError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Parse(#[from] ParseError),

    #[error("{0}")]
    Settings(#[from] SettingsError),

    #[error("{0}")]
    Render(#[from] RenderError),

    #[error("{0}")]
    Usage(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Validation(_) => crate::exitcode::DATAERR,
            CliError::Parse(e) => match e {
                ParseError::Io { .. } => crate::exitcode::NOINPUT,
                ParseError::InvalidLine { .. } | ParseError::Toml(_) => crate::exitcode::DATAERR,
            },
            CliError::Settings(_) => crate::exitcode::CONFIG,
            CliError::Render(_) => crate::exitcode::DATAERR,
        }
    }
}
