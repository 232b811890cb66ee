//! Default values matching the wallet's `locale/` directory layout.

use crate::schema::*;
use wallet_i18n_common::LocaleTag;

/// Default catalogue directory.
pub const DEFAULT_LOCALES_DIR: &str = "locale";

/// Default catalogue file prefix.
pub const DEFAULT_FILE_PREFIX: &str = "bitcoin_";

/// Default catalogue file extension.
pub const DEFAULT_FILE_EXTENSION: &str = "ts";

impl Default for Config {
    fn default() -> Self {
        Self {
            catalogue: CatalogueConfig::default(),
            plural: PluralConfig::default(),
        }
    }
}

impl Default for CatalogueConfig {
    fn default() -> Self {
        Self {
            locales_dir: DEFAULT_LOCALES_DIR.into(),
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
            file_extension: DEFAULT_FILE_EXTENSION.to_string(),
            locale: LocaleTag::default(),
            fallback_to_bundled: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.catalogue.locale.as_str(), "en_GB");
    }

    #[test]
    fn test_default_file_naming() {
        let config = CatalogueConfig::default();
        let locale = LocaleTag::parse("de_DE").unwrap();
        assert_eq!(config.file_name(&locale), "bitcoin_de_DE.ts");
        assert_eq!(
            config.path_for(&locale),
            std::path::Path::new("locale").join("bitcoin_de_DE.ts")
        );
    }
}
