//! Catalogue file discovery

use crate::error::{I18nError, I18nResult};
use crate::loader;
use crate::locale::negotiate;
use crate::model::Catalogue;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use wallet_i18n_common::LocaleTag;
use wallet_i18n_config::CatalogueConfig;

/// Maps locale tags to catalogue files in a directory.
#[derive(Debug, Clone)]
pub struct ResourceManager {
    /// Directory and file naming of the catalogues
    layout: CatalogueConfig,
}

impl ResourceManager {
    /// Create a ResourceManager using the wallet's `bitcoin_<locale>.ts` naming
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        Self {
            layout: CatalogueConfig {
                locales_dir: base_dir.as_ref().to_path_buf(),
                ..CatalogueConfig::default()
            },
        }
    }

    /// Create a ResourceManager from catalogue configuration
    pub fn from_config(config: &CatalogueConfig) -> Self {
        Self {
            layout: config.clone(),
        }
    }

    /// Paths tried for a locale, most specific first
    pub fn candidate_paths(&self, locale: &LocaleTag) -> Vec<PathBuf> {
        let mut paths = vec![self.layout.path_for(locale)];
        if locale.is_regional() {
            paths.push(self.layout.path_for(&locale.language_only()));
        }
        paths
    }

    /// First existing catalogue file for a locale
    pub fn locate(&self, locale: &LocaleTag) -> I18nResult<PathBuf> {
        let candidates = self.candidate_paths(locale);
        if let Some(path) = candidates.iter().find(|path| path.is_file()) {
            return Ok(path.clone());
        }

        warn!("No catalogue file for locale {} in {:?}", locale, self.base_dir());
        Err(I18nError::NotFound {
            locale: locale.to_string(),
            searched: candidates
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", "),
        })
    }

    /// Load the catalogue for a locale
    pub fn load(&self, locale: &LocaleTag) -> I18nResult<Catalogue> {
        let path = self.locate(locale)?;
        let mut catalogue = loader::load_file(&path)?;

        match catalogue.language.clone() {
            None => catalogue.language = Some(locale.clone()),
            Some(declared) if declared.language() != locale.language() => warn!(
                "Catalogue {:?} declares language {} but was loaded for {}",
                path, declared, locale
            ),
            Some(_) => {}
        }

        info!("Loaded catalogue for locale {} from {:?}", locale, path);
        Ok(catalogue)
    }

    /// Locales with a catalogue file in the base directory, sorted
    pub fn available_locales(&self) -> I18nResult<Vec<LocaleTag>> {
        let suffix = format!(".{}", self.layout.file_extension);
        let mut locales = Vec::new();

        for entry in fs::read_dir(self.base_dir())? {
            let path = entry?.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let Some(tag) = name
                .strip_prefix(self.layout.file_prefix.as_str())
                .and_then(|rest| rest.strip_suffix(suffix.as_str()))
            else {
                continue;
            };
            match LocaleTag::parse(tag) {
                Ok(locale) if path.is_file() => locales.push(locale),
                Ok(_) => {}
                Err(_) => debug!("Ignoring {:?}: not a locale catalogue", path),
            }
        }

        locales.sort();
        locales.dedup();
        Ok(locales)
    }

    /// Best available locale for a request
    pub fn negotiate(&self, requested: &LocaleTag) -> I18nResult<Option<LocaleTag>> {
        let available = self.available_locales()?;
        Ok(negotiate(requested, &available).cloned())
    }

    /// Get the base directory for catalogues
    pub fn base_dir(&self) -> &Path {
        &self.layout.locales_dir
    }
}

impl Default for ResourceManager {
    fn default() -> Self {
        Self::from_config(&CatalogueConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wallet_i18n_common::test_utils::{create_temp_dir, fixtures, write_fixture};

    fn tag(s: &str) -> LocaleTag {
        LocaleTag::parse(s).unwrap()
    }

    #[test]
    fn test_candidate_paths() {
        let resources = ResourceManager::new("locale");
        let paths = resources.candidate_paths(&tag("en-GB"));
        assert_eq!(
            paths,
            vec![
                PathBuf::from("locale/bitcoin_en_GB.ts"),
                PathBuf::from("locale/bitcoin_en.ts")
            ]
        );
        assert_eq!(resources.candidate_paths(&tag("de")).len(), 1);
    }

    #[test]
    fn test_language_file_fallback() {
        let dir = create_temp_dir();
        write_fixture(
            dir.path(),
            "bitcoin_de.ts",
            &fixtures::single_message_catalogue("de", "SendCoinsDialog", "Send", "Senden"),
        );

        let resources = ResourceManager::new(dir.path());
        let catalogue = resources.load(&tag("de_AT")).unwrap();
        assert_eq!(
            catalogue.find("SendCoinsDialog", "Send").unwrap().translation(),
            Some("Senden")
        );
    }

    #[test]
    fn test_missing_locale() {
        let dir = create_temp_dir();
        let resources = ResourceManager::new(dir.path());

        match resources.load(&tag("fr_FR")) {
            Err(I18nError::NotFound { locale, searched }) => {
                assert_eq!(locale, "fr_FR");
                assert!(searched.contains("bitcoin_fr_FR.ts"));
                assert!(searched.contains("bitcoin_fr.ts"));
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_available_locales_and_negotiation() {
        let dir = create_temp_dir();
        for name in [
            "bitcoin_en_GB.ts",
            "bitcoin_pt_BR.ts",
            "bitcoin_de.ts",
            "bitcoin_sr@latin.ts",
            "notes.txt",
            "bitcoin_xx_bogus.ts",
        ] {
            write_fixture(dir.path(), name, "<TS/>");
        }

        let resources = ResourceManager::new(dir.path());
        let available: Vec<String> = resources
            .available_locales()
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(available, vec!["de", "en_GB", "pt_BR", "sr@latin"]);
        assert_eq!(resources.negotiate(&tag("de_CH")).unwrap(), Some(tag("de")));
        assert_eq!(resources.negotiate(&tag("ja")).unwrap(), None);
    }

    #[test]
    fn test_variant_catalogue_and_language_fallback() {
        let dir = create_temp_dir();
        write_fixture(
            dir.path(),
            "bitcoin_sr@latin.ts",
            &fixtures::single_message_catalogue("sr@latin", "SendCoinsDialog", "Send", "Pošalji"),
        );
        write_fixture(
            dir.path(),
            "bitcoin_sr.ts",
            &fixtures::single_message_catalogue("sr", "SendCoinsDialog", "Send", "Пошаљи"),
        );

        let resources = ResourceManager::new(dir.path());
        let latin = resources.load(&tag("sr@latin")).unwrap();
        assert_eq!(latin.language.as_ref().map(LocaleTag::as_str), Some("sr@latin"));
        assert_eq!(
            latin.find("SendCoinsDialog", "Send").unwrap().translation(),
            Some("Pošalji")
        );
        assert_eq!(
            resources.candidate_paths(&tag("sr_RS@latin")),
            vec![dir.path().join("bitcoin_sr_RS@latin.ts"), dir.path().join("bitcoin_sr.ts")]
        );
        assert_eq!(
            resources.load(&tag("sr_RS@latin")).unwrap().language.map(|l| l.to_string()),
            Some("sr".to_string())
        );
    }

    #[test]
    fn test_custom_naming_from_config() {
        let dir = create_temp_dir();
        write_fixture(
            dir.path(),
            "wallet-nl.xml",
            &fixtures::single_message_catalogue("nl", "OverviewPage", "Balances", "Saldi"),
        );
        let config = CatalogueConfig {
            locales_dir: dir.path().to_path_buf(),
            file_prefix: "wallet-".to_string(),
            file_extension: "xml".to_string(),
            ..Default::default()
        };

        let resources = ResourceManager::from_config(&config);
        assert!(resources.load(&tag("nl")).is_ok());
    }
}
