//! Translation completeness reporting

use crate::format::{placeholders, Placeholder};
use crate::model::{Catalogue, Context, Message, TranslationStatus};
use crate::plural::PluralRule;
use serde::Serialize;
use std::collections::BTreeSet;
use wallet_i18n_common::has_mnemonic;

/// Message counts by translation state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogueStats {
    /// All messages.
    pub total: usize,
    /// Finished messages with text.
    pub finished: usize,
    /// Messages marked unfinished.
    pub unfinished: usize,
    /// Messages marked obsolete or vanished.
    pub obsolete: usize,
    /// Finished messages whose translation is empty.
    pub empty_finished: usize,
    /// Messages with plural forms.
    pub numerus: usize,
}

impl CatalogueStats {
    /// Counts for one context.
    pub fn of_context(context: &Context) -> Self {
        context.messages().iter().fold(Self::default(), |mut stats, message| {
            stats.record(message);
            stats
        })
    }

    /// Counts for a whole catalogue.
    pub fn of_catalogue(catalogue: &Catalogue) -> Self {
        catalogue
            .contexts()
            .iter()
            .map(Self::of_context)
            .fold(Self::default(), Self::merge)
    }

    /// Share of non-obsolete messages that render a translation, 0.0..=1.0.
    /// An empty catalogue counts as complete.
    pub fn completion(&self) -> f64 {
        let live = self.total - self.obsolete;
        if live == 0 {
            return 1.0;
        }
        self.finished as f64 / live as f64
    }

    /// Sum of two sets of counts.
    pub fn merge(self, other: Self) -> Self {
        Self {
            total: self.total + other.total,
            finished: self.finished + other.finished,
            unfinished: self.unfinished + other.unfinished,
            obsolete: self.obsolete + other.obsolete,
            empty_finished: self.empty_finished + other.empty_finished,
            numerus: self.numerus + other.numerus,
        }
    }

    fn record(&mut self, message: &Message) {
        self.total += 1;
        if message.is_numerus() {
            self.numerus += 1;
        }
        match message.status {
            TranslationStatus::Finished if message.text.is_empty() => self.empty_finished += 1,
            TranslationStatus::Finished => self.finished += 1,
            TranslationStatus::Unfinished => self.unfinished += 1,
            TranslationStatus::Obsolete => self.obsolete += 1,
        }
    }
}

/// Per-context counts in document order.
pub fn context_stats(catalogue: &Catalogue) -> Vec<(String, CatalogueStats)> {
    catalogue
        .contexts()
        .iter()
        .map(|ctx| (ctx.name().to_string(), CatalogueStats::of_context(ctx)))
        .collect()
}

/// A finished numerus message whose form count does not match the rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluralFormIssue {
    /// Context name.
    pub context: String,
    /// Source text.
    pub source: String,
    /// Forms stored in the catalogue.
    pub found: usize,
    /// Forms the rule expects.
    pub expected: usize,
}

/// Finished numerus messages whose form count differs from `rule`.
pub fn plural_form_issues(catalogue: &Catalogue, rule: &dyn PluralRule) -> Vec<PluralFormIssue> {
    let expected = rule.form_count();
    catalogue
        .iter_messages()
        .filter(|(_, msg)| msg.is_numerus() && msg.status.is_finished())
        .filter(|(_, msg)| msg.forms().len() != expected)
        .map(|(ctx, msg)| PluralFormIssue {
            context: ctx.to_string(),
            source: msg.source.clone(),
            found: msg.forms().len(),
            expected,
        })
        .collect()
}

/// A renderable message whose translation uses different placeholders than
/// its source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaceholderIssue {
    /// Context name.
    pub context: String,
    /// Source text.
    pub source: String,
    /// Placeholders in the source but in no translation form.
    pub missing: Vec<String>,
    /// Placeholders in a translation form but not in the source.
    pub unexpected: Vec<String>,
}

/// Renderable messages whose placeholders disagree with their source.
///
/// `%n` is not required in every plural form, since singular forms often
/// spell the quantity out.
pub fn placeholder_issues(catalogue: &Catalogue) -> Vec<PlaceholderIssue> {
    catalogue
        .iter_messages()
        .filter(|(_, msg)| msg.is_renderable())
        .filter_map(|(ctx, msg)| {
            let expected = placeholders(&msg.source);
            let found: BTreeSet<Placeholder> = match msg.translation() {
                Some(text) => placeholders(text),
                None => msg.forms().iter().flat_map(|f| placeholders(f)).collect(),
            };

            let missing: Vec<String> = expected
                .difference(&found)
                .filter(|p| !(msg.is_numerus() && **p == Placeholder::Quantity))
                .map(ToString::to_string)
                .collect();
            let unexpected: Vec<String> = found.difference(&expected).map(ToString::to_string).collect();

            (!missing.is_empty() || !unexpected.is_empty()).then(|| PlaceholderIssue {
                context: ctx.to_string(),
                source: msg.source.clone(),
                missing,
                unexpected,
            })
        })
        .collect()
}

/// Renderable flat messages where exactly one of source and translation
/// carries a mnemonic marker, as `(context, source)` pairs.
pub fn mnemonic_issues(catalogue: &Catalogue) -> Vec<(String, String)> {
    catalogue
        .iter_messages()
        .filter(|(_, msg)| msg.is_renderable())
        .filter_map(|(ctx, msg)| {
            let translation = msg.translation()?;
            (has_mnemonic(&msg.source) != has_mnemonic(translation))
                .then(|| (ctx.to_string(), msg.source.clone()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plural::BuiltinRule;

    fn catalogue() -> Catalogue {
        let mut catalogue = Catalogue::new(None);
        catalogue.insert_message("AddressBookPage", Message::new("&Copy", "&Copy"));
        catalogue.insert_message("AddressBookPage", Message::unfinished("C&hoose"));
        catalogue.insert_message("AddressBookPage", Message::new("Export", ""));
        catalogue.insert_message(
            "BitcoinGUI",
            Message::plural("%n hour(s)", ["%n hour", "%n hours"]),
        );
        catalogue.insert_message(
            "BitcoinGUI",
            Message::new("Old", "Old").with_status(TranslationStatus::Obsolete),
        );
        catalogue.insert_message("BitcoinGUI", Message::new("%1 behind", "behind"));
        catalogue
    }

    #[test]
    fn test_counts() {
        let stats = CatalogueStats::of_catalogue(&catalogue());
        assert_eq!(
            stats,
            CatalogueStats {
                total: 6,
                finished: 3,
                unfinished: 1,
                obsolete: 1,
                empty_finished: 1,
                numerus: 1,
            }
        );
        assert!((stats.completion() - 0.6).abs() < f64::EPSILON);
        assert_eq!(CatalogueStats::default().completion(), 1.0);
    }

    #[test]
    fn test_context_breakdown() {
        let per_context = context_stats(&catalogue());
        assert_eq!(per_context.len(), 2);
        assert_eq!(per_context[0].0, "AddressBookPage");
        assert_eq!(per_context[0].1.total, 3);
        assert_eq!(per_context[1].1.numerus, 1);
    }

    #[test]
    fn test_plural_form_issues() {
        let catalogue = catalogue();
        assert!(plural_form_issues(&catalogue, &BuiltinRule::OneOther).is_empty());

        let issues = plural_form_issues(&catalogue, &BuiltinRule::Slavic);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].source, "%n hour(s)");
        assert_eq!((issues[0].found, issues[0].expected), (2, 3));
    }

    #[test]
    fn test_placeholder_issues() {
        let issues = placeholder_issues(&catalogue());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].source, "%1 behind");
        assert_eq!(issues[0].missing, vec!["%1"]);
        assert!(issues[0].unexpected.is_empty());
    }

    #[test]
    fn test_mnemonic_issues() {
        let mut catalogue = catalogue();
        catalogue.insert_message("AddressBookPage", Message::new("&Delete", "Delete"));
        catalogue.insert_message("AddressBookPage", Message::new("Fish && Chips", "Fish && Chips"));

        assert_eq!(
            mnemonic_issues(&catalogue),
            vec![("AddressBookPage".to_string(), "&Delete".to_string())]
        );
    }
}
