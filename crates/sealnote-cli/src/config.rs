use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use sealnote_core::crypto::{DEFAULT_ITERATIONS, MIN_PASSWORD_LENGTH};
use sealnote_core::ServiceSettings;

#[derive(Debug, Serialize, Deserialize)]
pub struct SealnoteConfig {
    pub database: DatabaseSection,
    #[serde(default)]
    pub crypto: CryptoSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DatabaseSection {
    pub path: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CryptoSection {
    pub kdf_iterations: u32,
    pub min_password_length: usize,
}

impl Default for CryptoSection {
    fn default() -> Self {
        Self {
            kdf_iterations: DEFAULT_ITERATIONS,
            min_password_length: MIN_PASSWORD_LENGTH,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct LoggingSection {
    pub filter: Option<String>,
}

impl SealnoteConfig {
    pub fn new(
        database_path: PathBuf,
        kdf_iterations: u32,
        min_password_length: usize,
    ) -> Self {
        Self {
            database: DatabaseSection {
                path: database_path.to_string_lossy().to_string(),
            },
            crypto: CryptoSection {
                kdf_iterations,
                min_password_length,
            },
            logging: LoggingSection::default(),
        }
    }

    pub fn service_settings(&self) -> anyhow::Result<ServiceSettings> {
        if self.crypto.kdf_iterations == 0 {
            return Err(anyhow::anyhow!(
                "crypto.kdf_iterations must be positive"
            ));
        }
        Ok(ServiceSettings {
            kdf_iterations: self.crypto.kdf_iterations,
            min_password_length: self.crypto.min_password_length,
        })
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_database_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_data_dir()?.join("notes.db"))
}

pub fn read_config(path: &Path) -> anyhow::Result<SealnoteConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn write_config(path: &Path, config: &SealnoteConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    std::fs::write(path, contents)
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    Ok(())
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("sealnote"));
        }
    }
    Ok(home_dir()?.join(".config").join("sealnote"))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("sealnote"));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join("sealnote"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}
