//! Active locale management

use crate::bundled::{bundled_catalogue, bundled_locales};
use crate::context::TranslationArgs;
use crate::error::{I18nError, I18nResult};
use crate::model::Catalogue;
use crate::plural::PluralRuleRegistry;
use crate::resource::ResourceManager;
use crate::translator::Translator;
use arc_swap::ArcSwap;
use std::sync::Arc;
use tracing::{debug, info, warn};
use wallet_i18n_common::LocaleTag;
use wallet_i18n_config::{Config, ConfigValidator};

/// Owns the active [`Translator`] and swaps it when the locale changes.
///
/// Readers take a snapshot with [`current`](Self::current) or translate
/// directly; a concurrent [`switch_locale`](Self::switch_locale) replaces the
/// whole translator at once, so a reader sees either the old catalogue or
/// the new one and never a mix.
#[derive(Debug)]
pub struct LocaleManager {
    /// Resource manager for locating catalogue files
    resources: ResourceManager,
    /// Plural rules applied to newly loaded catalogues
    registry: PluralRuleRegistry,
    active: ArcSwap<Translator>,
    fallback_to_bundled: bool,
}

impl LocaleManager {
    /// Create a manager with a source-only translator active.
    pub fn new(resources: ResourceManager, registry: PluralRuleRegistry) -> Self {
        Self {
            resources,
            registry,
            active: ArcSwap::from_pointee(Translator::source_only()),
            fallback_to_bundled: true,
        }
    }

    /// Build a manager from configuration and activate the configured
    /// locale.
    ///
    /// When the configured catalogue cannot be loaded the bundled catalogue
    /// is activated instead (if allowed), and failing that a source-only
    /// translator. Only invalid configuration is an error.
    pub fn from_config(config: &Config) -> I18nResult<Self> {
        config.validate()?;

        let mut registry = PluralRuleRegistry::new();
        let overrides =
            ConfigValidator::plural_overrides(config).map_err(|e| I18nError::Config(e.to_string()))?;
        for (locale, rule) in overrides {
            registry.register_builtin(&locale, &rule)?;
        }

        let mut manager = Self::new(ResourceManager::from_config(&config.catalogue), registry);
        manager.fallback_to_bundled = config.catalogue.fallback_to_bundled;

        let locale = &config.catalogue.locale;
        if let Err(e) = manager.switch_locale(locale) {
            warn!("Failed to load catalogue for locale {}: {}", locale, e);
            if manager.fallback_to_bundled {
                if let Err(e) = manager.use_bundled(&LocaleTag::default()) {
                    warn!("Bundled catalogue unavailable, using source text: {}", e);
                }
            }
        }

        info!(
            "LocaleManager initialized with locale: {}",
            manager
                .active_locale()
                .map_or_else(|| "<source>".to_string(), |l| l.to_string())
        );
        Ok(manager)
    }

    /// Load the catalogue for `locale` and make it active.
    ///
    /// On failure the active translator is left unchanged.
    pub fn switch_locale(&self, locale: &LocaleTag) -> I18nResult<Arc<Translator>> {
        debug!("Switching locale to {}", locale);
        let catalogue = self.resources.load(locale)?;
        let translator = Arc::new(Translator::with_registry(catalogue, &self.registry, Some(locale)));
        self.active.store(Arc::clone(&translator));
        info!("Active locale is now {}", locale);
        Ok(translator)
    }

    /// Activate the catalogue compiled into the library for `locale`.
    pub fn use_bundled(&self, locale: &LocaleTag) -> I18nResult<Arc<Translator>> {
        let catalogue = bundled_catalogue(locale)?;
        let translator = Arc::new(Translator::from_shared(catalogue, &self.registry));
        self.active.store(Arc::clone(&translator));
        info!("Active locale is now bundled {}", locale);
        Ok(translator)
    }

    /// Make an in-memory catalogue active.
    pub fn install(&self, catalogue: Catalogue) -> Arc<Translator> {
        let translator = Arc::new(Translator::with_registry(catalogue, &self.registry, None));
        self.active.store(Arc::clone(&translator));
        translator
    }

    /// Snapshot of the active translator.
    pub fn current(&self) -> Arc<Translator> {
        self.active.load_full()
    }

    /// Locale of the active catalogue, if known.
    pub fn active_locale(&self) -> Option<LocaleTag> {
        self.active.load().locale().cloned()
    }

    /// Translate through the active translator.
    pub fn translate(&self, context: &str, source: &str, quantity: Option<i64>, args: &[&str]) -> String {
        self.active.load().translate(context, source, quantity, args)
    }

    /// Translate through the active translator with a [`TranslationArgs`]
    /// bundle.
    pub fn translate_with(&self, context: &str, source: &str, args: &TranslationArgs) -> String {
        self.active.load().translate_with(context, source, args)
    }

    /// Locales available from the catalogue directory and the bundle.
    pub fn available_locales(&self) -> Vec<LocaleTag> {
        let mut locales = self.resources.available_locales().unwrap_or_else(|e| {
            debug!("Cannot list {:?}: {}", self.resources.base_dir(), e);
            Vec::new()
        });
        if self.fallback_to_bundled {
            locales.extend(bundled_locales());
        }
        locales.sort();
        locales.dedup();
        locales
    }

    /// Plural rules used for newly activated catalogues.
    pub fn registry(&self) -> &PluralRuleRegistry {
        &self.registry
    }

    /// Resource manager used by [`switch_locale`](Self::switch_locale).
    pub fn resources(&self) -> &ResourceManager {
        &self.resources
    }
}

impl Default for LocaleManager {
    fn default() -> Self {
        Self::new(ResourceManager::default(), PluralRuleRegistry::new())
    }
}
