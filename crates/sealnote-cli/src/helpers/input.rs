//! Input handling helpers for master passwords and note bodies.

use std::io::{self, IsTerminal, Read};

use dialoguer::{Input, Password};
use secrecy::{ExposeSecret, SecretString};

use sealnote_core::crypto::validate_master_password;

use crate::constants::{MASTER_PASSWORD_ENV, NEW_MASTER_PASSWORD_ENV};
use crate::errors::CliError;

fn password_from_env(var: &str) -> Option<SecretString> {
    std::env::var(var)
        .ok()
        .filter(|value| !value.is_empty())
        .map(SecretString::from)
}

/// Prompt for the master password of an existing note, or read it from
/// `SEALNOTE_MASTER_PASSWORD`.
///
/// No policy is applied: a wrong password is the decryptor's business.
pub fn prompt_master_password(no_input: bool) -> anyhow::Result<SecretString> {
    if let Some(value) = password_from_env(MASTER_PASSWORD_ENV) {
        return Ok(value);
    }
    if no_input || !io::stderr().is_terminal() {
        return Err(anyhow::anyhow!(
            "No master password provided and no TTY available. Set {}.",
            MASTER_PASSWORD_ENV
        ));
    }
    Password::new()
        .with_prompt("Master password")
        .interact()
        .map(SecretString::from)
        .map_err(|e| anyhow::anyhow!("Failed to read master password: {}", e))
}

/// Prompt for a newly chosen master password with confirmation, or read it
/// from `env_var`. The password policy is enforced either way.
pub fn prompt_new_master_password(
    no_input: bool,
    env_var: &str,
    min_length: usize,
) -> anyhow::Result<SecretString> {
    if let Some(value) = password_from_env(env_var) {
        validate_master_password(value.expose_secret(), min_length)
            .map_err(|e| {
                CliError::invalid_input(format!(
                    "Master password does not meet requirements: {}",
                    e
                ))
            })?;
        return Ok(value);
    }
    if no_input || !io::stderr().is_terminal() {
        return Err(anyhow::anyhow!(
            "No master password provided and no TTY available. Set {}.",
            env_var
        ));
    }
    let prompt = if env_var == NEW_MASTER_PASSWORD_ENV {
        "New master password"
    } else {
        "Master password"
    };
    loop {
        let password = Password::new()
            .with_prompt(prompt)
            .with_confirmation("Confirm master password", "Passwords do not match")
            .interact()
            .map_err(|e| anyhow::anyhow!("Failed to read master password: {}", e))?;
        if let Err(err) = validate_master_password(&password, min_length) {
            eprintln!("Master password does not meet requirements: {}", err);
            continue;
        }
        return Ok(SecretString::from(password));
    }
}

/// Read a note body from `--body`, stdin, or an interactive prompt.
///
/// An empty body is allowed.
pub fn read_note_body(no_input: bool, body: Option<String>) -> anyhow::Result<String> {
    if let Some(value) = body {
        return Ok(value);
    }

    if !io::stdin().is_terminal() {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| anyhow::anyhow!("Failed to read stdin: {}", e))?;
        return Ok(buffer.trim_end_matches(['\r', '\n']).to_string());
    }

    if no_input {
        return Err(anyhow::anyhow!(
            "No note body provided. Use --body or pipe the body on stdin."
        ));
    }

    Input::<String>::new()
        .with_prompt("Note")
        .allow_empty(true)
        .interact_text()
        .map_err(|e| anyhow::anyhow!("Failed to read note body: {}", e))
}
