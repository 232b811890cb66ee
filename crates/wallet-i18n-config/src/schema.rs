//! Configuration schema definitions using serde with validation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use wallet_i18n_common::{CommonError, LocaleTag};

/// Main configuration structure for catalogue selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalogue location and selection.
    pub catalogue: CatalogueConfig,
    /// Plural rule overrides.
    pub plural: PluralConfig,
}

/// Where catalogues live and which one is active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogueConfig {
    /// Directory holding the `.ts` catalogue files.
    pub locales_dir: PathBuf,
    /// File name prefix before the locale tag (`bitcoin_`).
    pub file_prefix: String,
    /// File extension without the dot (`ts`).
    pub file_extension: String,
    /// Locale selected at startup.
    pub locale: LocaleTag,
    /// Use the catalogue compiled into the library when the configured one
    /// cannot be loaded.
    pub fallback_to_bundled: bool,
}

/// Plural rule configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluralConfig {
    /// Built-in rule name per locale tag, e.g. `pt_BR = "zero_one_other"`.
    pub overrides: BTreeMap<String, String>,
}

impl CatalogueConfig {
    /// File name of the catalogue for a locale, e.g. `bitcoin_en_GB.ts`.
    pub fn file_name(&self, locale: &LocaleTag) -> String {
        format!("{}{}.{}", self.file_prefix, locale, self.file_extension)
    }

    /// Full path of the catalogue for a locale.
    pub fn path_for(&self, locale: &LocaleTag) -> PathBuf {
        self.locales_dir.join(self.file_name(locale))
    }
}

impl Config {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), CommonError> {
        let catalogue = &self.catalogue;

        if catalogue.file_extension.is_empty() {
            return Err(CommonError::Config(
                "Catalogue file extension cannot be empty".to_string(),
            ));
        }

        if catalogue.file_extension.starts_with('.') {
            return Err(CommonError::Config(format!(
                "Catalogue file extension must not start with a dot: {}",
                catalogue.file_extension
            )));
        }

        if catalogue.file_prefix.contains(['/', '\\']) {
            return Err(CommonError::Config(format!(
                "Catalogue file prefix must not contain path separators: {}",
                catalogue.file_prefix
            )));
        }

        for (locale, rule) in &self.plural.overrides {
            LocaleTag::parse(locale)?;
            if rule.trim().is_empty() {
                return Err(CommonError::Config(format!(
                    "Plural override for {locale} names no rule"
                )));
            }
        }

        Ok(())
    }
}
