//! CLI error types for structured error handling.
//!
//! Core errors are translated here into typed CLI errors that carry exit
//! codes. A wrong password and a corrupted note produce the same message.

use std::fmt;

use sealnote_core::SealnoteError;

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Resource not found (config, database, note)
    NotFound { message: String, hint: String },

    /// Wrong master password or corrupted data
    AuthFailed { message: String },

    /// Invalid user input
    InvalidInput(String),

    /// Concurrent modification; retry
    Conflict(String),

    /// Internal failure; details stay in the log
    Internal,
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound { message, hint } => {
                write!(f, "{}\n{}", message, hint)
            }
            CliError::AuthFailed { message } => write!(f, "{}", message),
            CliError::InvalidInput(message) => write!(f, "{}", message),
            CliError::Conflict(message) => write!(f, "{}", message),
            CliError::Internal => write!(f, "Internal error; see the log for details"),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Create a NotFound error with message and hint.
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Create an AuthFailed error.
    pub fn auth_failed(message: impl Into<String>) -> Self {
        CliError::AuthFailed {
            message: message.into(),
        }
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    /// Create a Conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        CliError::Conflict(message.into())
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        use super::constants::exit_codes;
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::AuthFailed { .. } => exit_codes::AUTH_FAILED,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
            CliError::Conflict(_) => exit_codes::CONFLICT,
            CliError::Internal => exit_codes::INTERNAL,
        }
    }

    /// Print error message to stderr and exit with appropriate code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);
        std::process::exit(self.exit_code())
    }
}

/// Translate a core error into what the CLI reports.
pub fn from_core(err: SealnoteError) -> anyhow::Error {
    match err {
        SealnoteError::WrongPasswordOrCorrupt => {
            CliError::auth_failed("Wrong master password or corrupted data").into()
        }
        SealnoteError::NoteNotFound(id) => CliError::not_found(
            format!("Note not found: {}", id),
            "Hint: Run `sealnote list` to see note IDs.",
        )
        .into(),
        SealnoteError::InvalidInput(message) => CliError::invalid_input(message).into(),
        SealnoteError::Conflict(id) => CliError::conflict(format!(
            "Note {} was changed by another process; nothing was written",
            id
        ))
        .into(),
        SealnoteError::Internal(_) => CliError::Internal.into(),
        other => anyhow::Error::new(other),
    }
}
