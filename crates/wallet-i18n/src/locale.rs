//! Locale parsing and negotiation

use crate::error::{I18nError, I18nResult};
use unic_langid::LanguageIdentifier;
use wallet_i18n_common::LocaleTag;

/// Parse a locale in either `en_GB` or `en-GB` spelling.
pub fn parse_locale(input: &str) -> I18nResult<LocaleTag> {
    Ok(LocaleTag::parse(input)?)
}

/// Convert to a BCP 47 language identifier.
pub fn to_language_identifier(locale: &LocaleTag) -> I18nResult<LanguageIdentifier> {
    locale
        .to_bcp47()
        .parse()
        .map_err(|_| I18nError::InvalidLocale(locale.to_string()))
}

/// Pick the best available locale for a request.
///
/// Preference order: exact tag, same language and region (ignoring script),
/// the bare language, then any locale sharing the language.
pub fn negotiate<'a>(requested: &LocaleTag, available: &'a [LocaleTag]) -> Option<&'a LocaleTag> {
    if let Some(exact) = available.iter().find(|tag| *tag == requested) {
        return Some(exact);
    }

    let wanted = to_language_identifier(requested).ok()?;
    let candidates: Vec<(&LocaleTag, LanguageIdentifier)> = available
        .iter()
        .filter_map(|tag| to_language_identifier(tag).ok().map(|id| (tag, id)))
        .filter(|(_, id)| id.language == wanted.language)
        .collect();

    if wanted.region.is_some() {
        if let Some((tag, _)) = candidates.iter().find(|(_, id)| id.region == wanted.region) {
            return Some(*tag);
        }
    }

    candidates
        .iter()
        .find(|(tag, _)| !tag.is_regional())
        .or_else(|| candidates.first())
        .map(|(tag, _)| *tag)
}
