//! Catalogues compiled into the library
//!
//! The wallet ships its `en_GB` catalogue inside the binary so that a usable
//! translator exists without any file I/O. The document is parsed on first
//! use and shared afterwards.

use crate::error::{I18nError, I18nResult};
use crate::loader;
use crate::model::Catalogue;
use once_cell::sync::Lazy;
use std::sync::Arc;
use tracing::debug;
use wallet_i18n_common::{LocaleTag, DEFAULT_LOCALE};

const EN_GB: &str = include_str!("../locales/bitcoin_en_GB.ts");

static EN_GB_CATALOGUE: Lazy<Result<Arc<Catalogue>, String>> = Lazy::new(|| {
    debug!("Parsing bundled {} catalogue", DEFAULT_LOCALE);
    loader::parse_str(EN_GB, "bundled:bitcoin_en_GB.ts")
        .map(Arc::new)
        .map_err(|e| e.to_string())
});

/// Locales with a bundled catalogue.
pub fn bundled_locales() -> Vec<LocaleTag> {
    vec![LocaleTag::default()]
}

/// Raw TS document bundled for a locale.
pub fn bundled_source(locale: &LocaleTag) -> Option<&'static str> {
    (locale.as_str() == DEFAULT_LOCALE).then_some(EN_GB)
}

/// Parsed bundled catalogue for a locale.
///
/// A regional tag of the same language (`en_US`) also resolves to the
/// bundled `en_GB` catalogue.
pub fn bundled_catalogue(locale: &LocaleTag) -> I18nResult<Arc<Catalogue>> {
    if locale.language() != LocaleTag::default().language() {
        return Err(I18nError::NotFound {
            locale: locale.to_string(),
            searched: "bundled catalogues".to_string(),
        });
    }

    match &*EN_GB_CATALOGUE {
        Ok(catalogue) => Ok(Arc::clone(catalogue)),
        Err(reason) => Err(I18nError::Parse {
            origin: "bundled:bitcoin_en_GB.ts".to_string(),
            reason: reason.clone(),
        }),
    }
}
