//! Lookup and rendering against one loaded catalogue

use crate::context::TranslationArgs;
use crate::format::substitute;
use crate::model::{Catalogue, Message, TranslationText};
use crate::plural::{default_rule, PluralRule, PluralRuleRegistry};
use std::sync::Arc;
use tracing::{debug, trace, warn};
use wallet_i18n_common::{truncate_string, LocaleTag};

const LOG_SOURCE_CHARS: usize = 60;

/// A read-only view of one catalogue plus the plural rule for its locale.
///
/// Lookups never fail. A missing context or message, an unfinished or
/// obsolete entry, and an empty translation all render the source text.
#[derive(Debug, Clone)]
pub struct Translator {
    catalogue: Arc<Catalogue>,
    locale: Option<LocaleTag>,
    rule: Arc<dyn PluralRule>,
}

impl Translator {
    /// Create a translator using the built-in rule for the catalogue's
    /// language.
    pub fn new(catalogue: Catalogue) -> Self {
        Self::from_shared(Arc::new(catalogue), &PluralRuleRegistry::new())
    }

    /// Create a translator with an explicit plural rule.
    pub fn with_rule(catalogue: Catalogue, rule: Arc<dyn PluralRule>) -> Self {
        Self {
            locale: catalogue.language.clone(),
            catalogue: Arc::new(catalogue),
            rule,
        }
    }

    /// Create a translator resolving its rule through a registry.
    ///
    /// `fallback_locale` is used when the catalogue declares no language.
    pub fn with_registry(
        catalogue: Catalogue,
        registry: &PluralRuleRegistry,
        fallback_locale: Option<&LocaleTag>,
    ) -> Self {
        let mut catalogue = catalogue;
        if catalogue.language.is_none() {
            catalogue.language = fallback_locale.cloned();
        }
        Self::from_shared(Arc::new(catalogue), registry)
    }

    /// Create a translator over an already shared catalogue.
    pub fn from_shared(catalogue: Arc<Catalogue>, registry: &PluralRuleRegistry) -> Self {
        let locale = catalogue.language.clone();
        let rule = match &locale {
            Some(locale) => registry.rule_for(locale),
            None => {
                warn!("Catalogue declares no language, using the default one/other plural rule");
                default_rule()
            }
        };
        debug!(
            "Translator for {} uses plural rule '{}'",
            locale.as_ref().map_or("<none>", LocaleTag::as_str),
            rule.name()
        );
        Self {
            catalogue,
            locale,
            rule,
        }
    }

    /// A translator with no entries; every lookup returns the source text.
    pub fn source_only() -> Self {
        Self {
            catalogue: Arc::new(Catalogue::default()),
            locale: None,
            rule: default_rule(),
        }
    }

    /// Translate `source` in `context`.
    pub fn translate(&self, context: &str, source: &str, quantity: Option<i64>, args: &[&str]) -> String {
        match self.catalogue.find(context, source) {
            Some(message) => self.render(message, quantity, args),
            None => {
                trace!(
                    "No translation for '{}' in context {}",
                    truncate_string(source, LOG_SOURCE_CHARS),
                    context
                );
                source.to_string()
            }
        }
    }

    /// Translate a message selected by source text and disambiguation
    /// comment.
    pub fn translate_disambiguated(
        &self,
        context: &str,
        source: &str,
        comment: &str,
        quantity: Option<i64>,
        args: &[&str],
    ) -> String {
        match self.catalogue.find_with_comment(context, source, comment) {
            Some(message) => self.render(message, quantity, args),
            None => {
                trace!(
                    "No translation for '{}' ({}) in context {}",
                    truncate_string(source, LOG_SOURCE_CHARS),
                    comment,
                    context
                );
                source.to_string()
            }
        }
    }

    /// Translate with a [`TranslationArgs`] bundle.
    pub fn translate_with(&self, context: &str, source: &str, args: &TranslationArgs) -> String {
        let positional: Vec<&str> = args.args.iter().map(String::as_str).collect();
        self.translate_disambiguated(context, source, args.comment_key(), args.quantity, &positional)
    }

    /// The stored message, if any.
    pub fn lookup(&self, context: &str, source: &str) -> Option<&Message> {
        self.catalogue.find(context, source)
    }

    /// Whether the catalogue has an entry for `source` in `context`.
    pub fn contains(&self, context: &str, source: &str) -> bool {
        self.lookup(context, source).is_some()
    }

    /// The underlying catalogue.
    pub fn catalogue(&self) -> &Arc<Catalogue> {
        &self.catalogue
    }

    /// Locale of the catalogue, if known.
    pub fn locale(&self) -> Option<&LocaleTag> {
        self.locale.as_ref()
    }

    /// Plural rule used for numerus messages.
    pub fn plural_rule(&self) -> &Arc<dyn PluralRule> {
        &self.rule
    }

    fn render(&self, message: &Message, quantity: Option<i64>, args: &[&str]) -> String {
        let text = if message.status.is_finished() {
            self.select_text(message, quantity)
        } else {
            None
        };
        substitute(text.unwrap_or(&message.source), quantity, args)
    }

    fn select_text<'a>(&self, message: &'a Message, quantity: Option<i64>) -> Option<&'a str> {
        let text = match &message.text {
            TranslationText::Single(text) => text.as_str(),
            TranslationText::Plural(forms) => {
                let n = quantity.unwrap_or(0).unsigned_abs();
                let index = self.rule.form_index(n).min(forms.len().checked_sub(1)?);
                forms[index].as_str()
            }
        };
        (!text.is_empty()).then_some(text)
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::source_only()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TranslationStatus;
    use crate::plural::{BuiltinRule, FnRule};

    fn translator() -> Translator {
        let mut catalogue = Catalogue::new(Some("en_GB".parse().unwrap()));
        catalogue.insert_message("BanTableModel", Message::new("IP/Netmask", "IP/Netmask"));
        catalogue.insert_message("AddressBookPage", Message::unfinished("Choose the address to send coins to"));
        catalogue.insert_message(
            "AddressBookPage",
            Message::new("Exporting Failed", "Export failed: %1"),
        );
        catalogue.insert_message(
            "BitcoinGUI",
            Message::plural("%n active connection(s)", ["%n active connection", "%n active connections"]),
        );
        catalogue.insert_message("BitcoinGUI", Message::plural("%n day(s)", ["%n day"]));
        catalogue.insert_message(
            "BitcoinGUI",
            Message::new("Obsolete", "Old").with_status(TranslationStatus::Obsolete),
        );
        catalogue.insert_message("BitcoinGUI", Message::new("Empty", ""));
        catalogue.insert_message(
            "SendCoinsDialog",
            Message::new("Clear", "Clear all").with_comment("button"),
        );
        Translator::new(catalogue)
    }

    #[test]
    fn test_finished_translation() {
        let t = translator();
        assert_eq!(t.translate("BanTableModel", "IP/Netmask", None, &[]), "IP/Netmask");
        assert_eq!(
            t.translate("AddressBookPage", "Exporting Failed", None, &["wallet.csv"]),
            "Export failed: wallet.csv"
        );
    }

    #[test]
    fn test_unrenderable_entries_fall_back_to_source() {
        let t = translator();
        assert_eq!(
            t.translate("AddressBookPage", "Choose the address to send coins to", None, &[]),
            "Choose the address to send coins to"
        );
        assert_eq!(t.translate("BitcoinGUI", "Obsolete", None, &[]), "Obsolete");
        assert_eq!(t.translate("BitcoinGUI", "Empty", None, &[]), "Empty");
    }

    #[test]
    fn test_misses_return_source_unchanged() {
        let t = translator();
        assert_eq!(t.translate("NoSuchContext", "Send %1", None, &["x"]), "Send %1");
        assert_eq!(t.translate("BanTableModel", "Unknown %n", Some(3), &[]), "Unknown %n");
        assert!(!t.contains("BanTableModel", "Unknown %n"));
        assert!(t.lookup("BanTableModel", "IP/Netmask").is_some());
    }

    #[test]
    fn test_plural_selection() {
        let t = translator();
        let render = |n| t.translate("BitcoinGUI", "%n active connection(s)", n, &[]);
        assert_eq!(render(Some(1)), "1 active connection");
        assert_eq!(render(Some(5)), "5 active connections");
        assert_eq!(render(Some(-1)), "-1 active connection");
        assert_eq!(render(None), "%n active connections");
        // index past the stored forms uses the last one
        assert_eq!(t.translate("BitcoinGUI", "%n day(s)", Some(4), &[]), "4 day");
    }

    #[test]
    fn test_disambiguated_lookup() {
        let t = translator();
        assert_eq!(t.translate_disambiguated("SendCoinsDialog", "Clear", "button", None, &[]), "Clear all");
        assert_eq!(t.translate("SendCoinsDialog", "Clear", None, &[]), "Clear");
        let args = TranslationArgs::new().comment("button");
        assert_eq!(t.translate_with("SendCoinsDialog", "Clear", &args), "Clear all");
    }

    #[test]
    fn test_custom_rule() {
        let mut catalogue = Catalogue::new(None);
        catalogue.insert_message("Intro", Message::plural("%n GB", ["few", "many"]));
        let rule = FnRule::new("threshold", 2, |n| usize::from(n >= 10));
        let t = Translator::with_rule(catalogue, Arc::new(rule));

        assert_eq!(t.translate("Intro", "%n GB", Some(9), &[]), "few");
        assert_eq!(t.translate("Intro", "%n GB", Some(10), &[]), "many");
        assert_eq!(t.plural_rule().name(), "threshold");
    }

    #[test]
    fn test_registry_rule_from_language() {
        let mut catalogue = Catalogue::new(None);
        catalogue.insert_message("BitcoinGUI", Message::plural("%n day(s)", ["%n dzień", "%n dni", "%n dni"]));
        let pl: LocaleTag = "pl".parse().unwrap();
        let t = Translator::with_registry(catalogue, &PluralRuleRegistry::new(), Some(&pl));

        assert_eq!(t.locale(), Some(&pl));
        assert_eq!(t.plural_rule().form_count(), BuiltinRule::Polish.form_count());
        assert_eq!(t.translate("BitcoinGUI", "%n day(s)", Some(22), &[]), "22 dni");
        assert_eq!(t.translate("BitcoinGUI", "%n day(s)", Some(5), &[]), "5 dni");
    }

    #[test]
    fn test_source_only() {
        let t = Translator::source_only();
        assert_eq!(t.translate("BitcoinGUI", "%1 and %2", None, &["a", "b"]), "%1 and %2");
        assert!(t.locale().is_none());
    }
}
