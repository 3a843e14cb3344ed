//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// Resource not found (config, database, note).
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or arguments.
    pub const INVALID_INPUT: i32 = 4;

    /// Wrong master password or corrupted note data.
    pub const AUTH_FAILED: i32 = 5;

    /// Internal invariant violated.
    pub const INTERNAL: i32 = 6;

    /// Note changed concurrently; nothing was written.
    pub const CONFLICT: i32 = 7;
}

/// Environment variable holding the master password for non-interactive use.
pub const MASTER_PASSWORD_ENV: &str = "SEALNOTE_MASTER_PASSWORD";

/// Environment variable holding the new master password for `passwd`.
pub const NEW_MASTER_PASSWORD_ENV: &str = "SEALNOTE_NEW_MASTER_PASSWORD";
