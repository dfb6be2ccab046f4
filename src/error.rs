use std::process::ExitCode;

use thiserror::Error;

use crate::api::ApiError;
use crate::api::auth::AuthError;
use crate::config::ConfigError;

/// Exit status used when a command was interrupted (128 + SIGINT)
const EXIT_INTERRUPTED: u8 = 130;

/// Failure of a single command invocation
#[derive(Error, Debug)]
pub enum CommandError {
    #[error(transparent)]
    Configuration(#[from] ConfigError),

    #[error("Invalid argument: {0}")]
    Validation(String),

    #[error(transparent)]
    Remote(#[from] ApiError),

    #[error(transparent)]
    Authentication(#[from] AuthError),

    #[error("Failed to write output: {0}")]
    Output(String),

    #[error("Interrupted")]
    Interrupted,
}

impl CommandError {
    /// Process exit status for this failure
    pub fn exit_status(&self) -> u8 {
        match self {
            CommandError::Interrupted => EXIT_INTERRUPTED,
            _ => 1,
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_status())
    }
}

/// Reject a required value that was supplied blank
pub fn require_non_blank(name: &str, value: &str) -> Result<(), CommandError> {
    if value.trim().is_empty() {
        Err(CommandError::Validation(format!("{name} must not be blank")))
    } else {
        Ok(())
    }
}
