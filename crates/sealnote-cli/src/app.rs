//! Application context for the Sealnote CLI.
//!
//! Bundles the parsed arguments with the config file (if one exists) and
//! resolves where the note database lives.

use std::path::{Path, PathBuf};

use sealnote_core::{NoteService, ServiceSettings, SqliteNoteStore};

use crate::cli::Cli;
use crate::config::{default_config_path, read_config, SealnoteConfig};
use crate::errors::{from_core, CliError};

pub struct AppContext<'a> {
    cli: &'a Cli,
    config_path: PathBuf,
    config: Option<SealnoteConfig>,
}

impl<'a> AppContext<'a> {
    /// Resolve the config path and load the config if it exists.
    pub fn new(cli: &'a Cli) -> anyhow::Result<Self> {
        let config_path = match cli.config.as_deref() {
            Some(value) if !value.trim().is_empty() => PathBuf::from(value),
            _ => default_config_path()?,
        };
        let config = if config_path.exists() {
            Some(read_config(&config_path)?)
        } else {
            None
        };
        Ok(Self {
            cli,
            config_path,
            config,
        })
    }

    pub fn cli(&self) -> &Cli {
        self.cli
    }

    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn config(&self) -> Option<&SealnoteConfig> {
        self.config.as_ref()
    }

    /// Database path from `--db`/`SEALNOTE_DB`, else from the config file.
    pub fn database_path(&self) -> anyhow::Result<PathBuf> {
        if let Some(path) = self.cli.db.as_deref() {
            return Ok(PathBuf::from(path));
        }
        match &self.config {
            Some(config) => Ok(PathBuf::from(&config.database.path)),
            None => Err(CliError::not_found(
                format!("Config file not found: {}", self.config_path.display()),
                "Hint: Run `sealnote init`, or pass --db /path/to/notes.db.",
            )
            .into()),
        }
    }

    pub fn settings(&self) -> anyhow::Result<ServiceSettings> {
        match &self.config {
            Some(config) => config.service_settings(),
            None => Ok(ServiceSettings::default()),
        }
    }

    /// Open the note database and build the service over it.
    pub fn open_service(&self) -> anyhow::Result<NoteService<SqliteNoteStore>> {
        let path = self.database_path()?;
        let store = SqliteNoteStore::open(&path).map_err(from_core)?;
        Ok(NoteService::new(store, self.settings()?))
    }
}
