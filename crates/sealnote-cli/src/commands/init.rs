//! `sealnote init`: write a config file and create the note database.

use std::path::PathBuf;

use sealnote_core::crypto::{DEFAULT_ITERATIONS, MIN_PASSWORD_LENGTH};
use sealnote_core::SqliteNoteStore;
use tracing::info;

use crate::app::AppContext;
use crate::cli::InitArgs;
use crate::config::{default_database_path, write_config, SealnoteConfig};
use crate::errors::{from_core, CliError};

pub fn handle_init(ctx: &AppContext, args: &InitArgs) -> anyhow::Result<()> {
    let config_path = ctx.config_path();
    if config_path.exists() && !args.force {
        return Err(CliError::invalid_input(format!(
            "Config file already exists: {}\nHint: Pass --force to overwrite it.",
            config_path.display()
        ))
        .into());
    }

    let iterations = args.iterations.unwrap_or(DEFAULT_ITERATIONS);
    if iterations == 0 {
        return Err(CliError::invalid_input("--iterations must be positive").into());
    }
    let min_password_length = args.min_password_length.unwrap_or(MIN_PASSWORD_LENGTH);

    let database_path = match ctx.cli().db.as_deref() {
        Some(path) => PathBuf::from(path),
        None => default_database_path()?,
    };

    // Opening applies the schema; the store is dropped right away.
    SqliteNoteStore::open(&database_path).map_err(from_core)?;

    let config = SealnoteConfig::new(database_path.clone(), iterations, min_password_length);
    write_config(config_path, &config)?;
    info!(config = %config_path.display(), "wrote config");

    if !ctx.quiet() {
        println!("Initialized note database at {}", database_path.display());
        println!("Config written to {}", config_path.display());
    }
    Ok(())
}
