//! Argument parsing helpers.

use uuid::Uuid;

use crate::errors::CliError;

/// Parse a note or user ID given on the command line.
pub fn parse_id(value: &str, what: &str) -> anyhow::Result<Uuid> {
    Uuid::parse_str(value.trim()).map_err(|_| {
        CliError::invalid_input(format!(
            "Invalid {} ID: {} (expected a UUID such as 7a2e3c0b-1234-5678-9abc-def012345678)",
            what, value
        ))
        .into()
    })
}
