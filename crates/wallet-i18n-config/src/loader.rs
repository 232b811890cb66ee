//! Configuration loading and persistence with atomic file operations.

use crate::schema::Config;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use wallet_i18n_common::{CommonError, LocaleTag, Result};

/// Environment variable overriding the startup locale.
pub const ENV_LOCALE: &str = "WALLET_I18N_LOCALE";

/// Environment variable overriding the catalogue directory.
pub const ENV_LOCALES_DIR: &str = "WALLET_I18N_LOCALES_DIR";

/// Serialization format of a configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML (`.toml`).
    Toml,
    /// YAML (`.yaml`, `.yml`).
    Yaml,
    /// JSON (`.json`).
    Json,
}

impl ConfigFormat {
    /// Picks the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("toml") => Ok(Self::Toml),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            _ => Err(CommonError::Config(format!(
                "Unsupported configuration file type: {}",
                path.display()
            ))
            .into()),
        }
    }

    /// Parses configuration text in this format.
    pub fn parse(self, content: &str) -> Result<Config> {
        let config: Config = match self {
            Self::Toml => toml::from_str(content)
                .map_err(|e| CommonError::Serialization(e.to_string()))?,
            Self::Yaml => serde_yaml::from_str(content)
                .map_err(|e| CommonError::Serialization(e.to_string()))?,
            Self::Json => serde_json::from_str(content)
                .map_err(|e| CommonError::Serialization(e.to_string()))?,
        };
        Ok(config)
    }

    /// Renders configuration in this format.
    pub fn render(self, config: &Config) -> Result<String> {
        let rendered = match self {
            Self::Toml => toml::to_string_pretty(config)
                .map_err(|e| CommonError::Serialization(e.to_string()))?,
            Self::Yaml => serde_yaml::to_string(config)
                .map_err(|e| CommonError::Serialization(e.to_string()))?,
            Self::Json => serde_json::to_string_pretty(config)
                .map_err(|e| CommonError::Serialization(e.to_string()))?,
        };
        Ok(rendered)
    }
}

/// Configuration loader with atomic file operations.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    path: PathBuf,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this loader reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads configuration from file, applies environment overrides and
    /// validates the result.
    pub fn load(&self) -> Result<Config> {
        let mut config = self.load_file()?;
        apply_overrides(&mut config, |key| std::env::var(key).ok())?;
        config.validate()?;
        info!(
            "Loaded catalogue configuration from {:?} (locale {})",
            self.path, config.catalogue.locale
        );
        Ok(config)
    }

    /// Loads configuration from file without environment overrides.
    pub fn load_file(&self) -> Result<Config> {
        let format = ConfigFormat::from_path(&self.path)?;
        debug!("Reading {:?} configuration from {:?}", format, self.path);
        let content = fs::read_to_string(&self.path).map_err(CommonError::Io)?;
        format.parse(&content)
    }

    /// Saves configuration to file atomically.
    pub fn save(&self, config: &Config) -> Result<()> {
        config.validate()?;
        let format = ConfigFormat::from_path(&self.path)?;
        let rendered = format.render(config)?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut staging = tempfile::NamedTempFile::new_in(dir).map_err(CommonError::Io)?;
        staging
            .write_all(rendered.as_bytes())
            .map_err(CommonError::Io)?;
        staging
            .persist(&self.path)
            .map_err(|e| CommonError::Io(e.error))?;

        debug!("Saved configuration to {:?}", self.path);
        Ok(())
    }
}

/// Applies environment-style overrides from a key lookup.
pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(locale) = lookup(ENV_LOCALE).filter(|v| !v.trim().is_empty()) {
        config.catalogue.locale = LocaleTag::parse(&locale)?;
        debug!("Locale overridden from {}: {}", ENV_LOCALE, config.catalogue.locale);
    }

    if let Some(dir) = lookup(ENV_LOCALES_DIR).filter(|v| !v.trim().is_empty()) {
        config.catalogue.locales_dir = PathBuf::from(dir);
        debug!(
            "Catalogue directory overridden from {}: {:?}",
            ENV_LOCALES_DIR, config.catalogue.locales_dir
        );
    }

    Ok(())
}
