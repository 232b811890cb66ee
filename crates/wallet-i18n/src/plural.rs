//! Plural rules for numerus messages
//!
//! A numerus message stores one form per plural category of the target
//! language. A [`PluralRule`] maps a quantity to the index of the form to
//! render. Rules are looked up per locale in a [`PluralRuleRegistry`], which
//! knows the built-in families below and accepts custom rules.
//!
//! | family | forms | languages |
//! |--------|-------|-----------|
//! | `single` | 1 | ja, zh, ko, vi, th, id, ms, tr, ka, lo, my |
//! | `one_other` | 2 | en, de, nl, sv, da, nb, nn, no, it, es, pt, el, fi, hu, et, bg, he, ca, eo, eu, gl, af, sq, az, hi, bn, ... |
//! | `zero_one_other` | 2 | fr, pt_BR, hy, fil, br |
//! | `slavic` | 3 | ru, uk, be, sr, hr, bs |
//! | `polish` | 3 | pl |
//! | `czech` | 3 | cs, sk |
//! | `lithuanian` | 3 | lt |
//! | `latvian` | 3 | lv |
//! | `romanian` | 3 | ro |
//! | `slovenian` | 4 | sl |
//! | `irish` | 3 | ga |
//! | `arabic` | 6 | ar |

use crate::error::{I18nError, I18nResult};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, warn};
use wallet_i18n_common::LocaleTag;

/// Maps a quantity to a numerus form index.
pub trait PluralRule: Send + Sync + fmt::Debug {
    /// Index of the form to use for quantity `n`.
    fn form_index(&self, n: u64) -> usize;

    /// Number of forms a catalogue for this rule should carry.
    fn form_count(&self) -> usize;

    /// Name used in logs and configuration.
    fn name(&self) -> &str {
        "custom"
    }
}

/// The built-in plural families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinRule {
    /// No plural distinction.
    Single,
    /// `n == 1` vs everything else.
    OneOther,
    /// `n <= 1` vs everything else.
    ZeroOneOther,
    /// East and South Slavic: one / few / many.
    Slavic,
    /// Polish: one / few / many.
    Polish,
    /// Czech and Slovak: one / 2..4 / other.
    Czech,
    /// Lithuanian: one / few / other.
    Lithuanian,
    /// Latvian: one / other / zero.
    Latvian,
    /// Romanian: one / few / other.
    Romanian,
    /// Slovenian: one / two / few / other.
    Slovenian,
    /// Irish: one / two / other.
    Irish,
    /// Arabic: zero / one / two / few / many / other.
    Arabic,
}

impl BuiltinRule {
    /// All built-in families.
    pub const ALL: [Self; 12] = [
        Self::Single,
        Self::OneOther,
        Self::ZeroOneOther,
        Self::Slavic,
        Self::Polish,
        Self::Czech,
        Self::Lithuanian,
        Self::Latvian,
        Self::Romanian,
        Self::Slovenian,
        Self::Irish,
        Self::Arabic,
    ];

    /// Configuration name of the family.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::OneOther => "one_other",
            Self::ZeroOneOther => "zero_one_other",
            Self::Slavic => "slavic",
            Self::Polish => "polish",
            Self::Czech => "czech",
            Self::Lithuanian => "lithuanian",
            Self::Latvian => "latvian",
            Self::Romanian => "romanian",
            Self::Slovenian => "slovenian",
            Self::Irish => "irish",
            Self::Arabic => "arabic",
        }
    }

    /// Names of all built-in families.
    pub fn names() -> impl Iterator<Item = &'static str> {
        Self::ALL.into_iter().map(Self::as_str)
    }

    /// Family used by a locale, if known. Regional exceptions are checked
    /// before the language.
    pub fn for_locale(locale: &LocaleTag) -> Option<Self> {
        if locale.language() == "pt" && locale.region() == Some("BR") {
            return Some(Self::ZeroOneOther);
        }
        Self::for_language(locale.language())
    }

    /// Family used by a bare language subtag, if known.
    pub fn for_language(language: &str) -> Option<Self> {
        let rule = match language {
            "ja" | "zh" | "ko" | "vi" | "th" | "id" | "ms" | "tr" | "ka" | "lo" | "my" => Self::Single,
            "en" | "de" | "nl" | "sv" | "da" | "nb" | "nn" | "no" | "it" | "es" | "pt" | "el" | "fi"
            | "hu" | "et" | "bg" | "he" | "ca" | "eo" | "eu" | "gl" | "af" | "sq" | "az" | "hi"
            | "bn" | "fo" | "fy" | "is" | "ur" | "sw" | "ta" | "te" | "ml" | "kn" | "mr" | "gu"
            | "pa" | "ne" | "si" | "mn" | "kk" | "ky" | "uz" | "tk" | "la" => Self::OneOther,
            "fr" | "hy" | "fil" | "br" => Self::ZeroOneOther,
            "ru" | "uk" | "be" | "sr" | "hr" | "bs" => Self::Slavic,
            "pl" => Self::Polish,
            "cs" | "sk" => Self::Czech,
            "lt" => Self::Lithuanian,
            "lv" => Self::Latvian,
            "ro" | "mo" => Self::Romanian,
            "sl" => Self::Slovenian,
            "ga" => Self::Irish,
            "ar" => Self::Arabic,
            _ => return None,
        };
        Some(rule)
    }
}

impl FromStr for BuiltinRule {
    type Err = I18nError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|rule| rule.as_str() == wanted)
            .ok_or_else(|| I18nError::UnknownPluralRule(s.to_string()))
    }
}

impl fmt::Display for BuiltinRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PluralRule for BuiltinRule {
    fn form_index(&self, n: u64) -> usize {
        let n10 = n % 10;
        let n100 = n % 100;
        match self {
            Self::Single => 0,
            Self::OneOther => usize::from(n != 1),
            Self::ZeroOneOther => usize::from(n > 1),
            Self::Slavic => {
                if n10 == 1 && n100 != 11 {
                    0
                } else if (2..=4).contains(&n10) && !(12..=14).contains(&n100) {
                    1
                } else {
                    2
                }
            }
            Self::Polish => {
                if n == 1 {
                    0
                } else if (2..=4).contains(&n10) && !(12..=14).contains(&n100) {
                    1
                } else {
                    2
                }
            }
            Self::Czech => match n {
                1 => 0,
                2..=4 => 1,
                _ => 2,
            },
            Self::Lithuanian => {
                if n10 == 1 && n100 != 11 {
                    0
                } else if n10 >= 2 && !(12..=19).contains(&n100) {
                    1
                } else {
                    2
                }
            }
            Self::Latvian => {
                if n10 == 1 && n100 != 11 {
                    0
                } else if n != 0 {
                    1
                } else {
                    2
                }
            }
            Self::Romanian => {
                if n == 1 {
                    0
                } else if n == 0 || (1..20).contains(&n100) {
                    1
                } else {
                    2
                }
            }
            Self::Slovenian => match n100 {
                1 => 0,
                2 => 1,
                3 | 4 => 2,
                _ => 3,
            },
            Self::Irish => match n {
                1 => 0,
                2 => 1,
                _ => 2,
            },
            Self::Arabic => match n {
                0 => 0,
                1 => 1,
                2 => 2,
                _ if (3..=10).contains(&n100) => 3,
                _ if n100 >= 11 => 4,
                _ => 5,
            },
        }
    }

    fn form_count(&self) -> usize {
        match self {
            Self::Single => 1,
            Self::OneOther | Self::ZeroOneOther => 2,
            Self::Slavic
            | Self::Polish
            | Self::Czech
            | Self::Lithuanian
            | Self::Latvian
            | Self::Romanian
            | Self::Irish => 3,
            Self::Slovenian => 4,
            Self::Arabic => 6,
        }
    }

    fn name(&self) -> &str {
        self.as_str()
    }
}

/// A plural rule backed by a closure.
pub struct FnRule {
    name: String,
    forms: usize,
    select: Box<dyn Fn(u64) -> usize + Send + Sync>,
}

impl FnRule {
    /// Create a rule with `forms` forms selected by `select`.
    pub fn new<F>(name: impl Into<String>, forms: usize, select: F) -> Self
    where
        F: Fn(u64) -> usize + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            forms,
            select: Box::new(select),
        }
    }
}

impl fmt::Debug for FnRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnRule")
            .field("name", &self.name)
            .field("forms", &self.forms)
            .finish()
    }
}

impl PluralRule for FnRule {
    fn form_index(&self, n: u64) -> usize {
        (self.select)(n)
    }

    fn form_count(&self) -> usize {
        self.forms
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// The rule used when a locale has no registered or built-in rule.
pub fn default_rule() -> Arc<dyn PluralRule> {
    Arc::new(BuiltinRule::OneOther)
}

/// Plural rules keyed by locale.
///
/// Resolution order for a tag like `pt_BR`: a rule registered for `pt_BR`,
/// a rule registered for `pt`, the built-in family for `pt_BR`, the built-in
/// family for `pt`. When all of these miss, the default binary rule is used
/// and a warning is logged.
#[derive(Debug, Clone, Default)]
pub struct PluralRuleRegistry {
    rules: HashMap<String, Arc<dyn PluralRule>>,
}

impl PluralRuleRegistry {
    /// Create a registry that only knows the built-in families.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a rule for a locale tag or bare language.
    pub fn register<R>(&mut self, locale: &LocaleTag, rule: R)
    where
        R: PluralRule + 'static,
    {
        self.register_arc(locale, Arc::new(rule));
    }

    /// Register a shared rule for a locale tag or bare language.
    pub fn register_arc(&mut self, locale: &LocaleTag, rule: Arc<dyn PluralRule>) {
        debug!("Registered plural rule '{}' for {}", rule.name(), locale);
        self.rules.insert(locale.as_str().to_string(), rule);
    }

    /// Register a built-in family by its configuration name.
    pub fn register_builtin(&mut self, locale: &LocaleTag, name: &str) -> I18nResult<()> {
        let rule: BuiltinRule = name.parse()?;
        self.register(locale, rule);
        Ok(())
    }

    /// Rule for a locale, if one is registered or built in.
    pub fn resolve(&self, locale: &LocaleTag) -> Option<Arc<dyn PluralRule>> {
        if let Some(rule) = self.rules.get(locale.as_str()) {
            return Some(Arc::clone(rule));
        }
        if let Some(rule) = self.rules.get(locale.base()) {
            return Some(Arc::clone(rule));
        }
        if let Some(rule) = self.rules.get(locale.language()) {
            return Some(Arc::clone(rule));
        }
        BuiltinRule::for_locale(locale).map(|rule| Arc::new(rule) as Arc<dyn PluralRule>)
    }

    /// Rule for a locale, falling back to the default binary rule.
    pub fn rule_for(&self, locale: &LocaleTag) -> Arc<dyn PluralRule> {
        self.resolve(locale).unwrap_or_else(|| {
            warn!(
                "No plural rule registered for locale {}, using the default one/other rule",
                locale
            );
            default_rule()
        })
    }

    /// Whether a rule is registered explicitly for the tag.
    pub fn is_registered(&self, locale: &LocaleTag) -> bool {
        self.rules.contains_key(locale.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(s: &str) -> LocaleTag {
        LocaleTag::parse(s).unwrap()
    }

    fn indices(rule: BuiltinRule, ns: &[u64]) -> Vec<usize> {
        ns.iter().map(|&n| rule.form_index(n)).collect()
    }

    #[test]
    fn test_one_other() {
        assert_eq!(indices(BuiltinRule::OneOther, &[0, 1, 2, 5, 11, 21]), vec![1, 0, 1, 1, 1, 1]);
    }

    #[test]
    fn test_zero_one_other() {
        assert_eq!(indices(BuiltinRule::ZeroOneOther, &[0, 1, 2, 100]), vec![0, 0, 1, 1]);
    }

    #[test]
    fn test_slavic() {
        assert_eq!(
            indices(BuiltinRule::Slavic, &[1, 2, 4, 5, 11, 12, 14, 21, 22, 25, 111, 0]),
            vec![0, 1, 1, 2, 2, 2, 2, 0, 1, 2, 2, 2]
        );
    }

    #[test]
    fn test_polish() {
        assert_eq!(
            indices(BuiltinRule::Polish, &[1, 2, 5, 12, 21, 22, 0]),
            vec![0, 1, 2, 2, 2, 1, 2]
        );
    }

    #[test]
    fn test_czech_and_slovenian() {
        assert_eq!(indices(BuiltinRule::Czech, &[1, 3, 5, 0]), vec![0, 1, 2, 2]);
        assert_eq!(indices(BuiltinRule::Slovenian, &[1, 2, 3, 5, 101, 102]), vec![0, 1, 2, 3, 0, 1]);
    }

    #[test]
    fn test_arabic_covers_six_forms() {
        assert_eq!(
            indices(BuiltinRule::Arabic, &[0, 1, 2, 3, 11, 100, 102]),
            vec![0, 1, 2, 3, 4, 5, 5]
        );
        assert_eq!(BuiltinRule::Arabic.form_count(), 6);
    }

    #[test]
    fn test_every_index_is_within_form_count() {
        for rule in BuiltinRule::ALL {
            for n in 0..250 {
                assert!(rule.form_index(n) < rule.form_count(), "{rule} n={n}");
            }
        }
    }

    #[test]
    fn test_builtin_names_parse() {
        for rule in BuiltinRule::ALL {
            assert_eq!(rule.as_str().parse::<BuiltinRule>().unwrap(), rule);
        }
        assert_eq!("Zero-One-Other".parse::<BuiltinRule>().unwrap(), BuiltinRule::ZeroOneOther);
        assert!(matches!(
            "dual".parse::<BuiltinRule>(),
            Err(I18nError::UnknownPluralRule(_))
        ));
    }

    #[test]
    fn test_registry_resolution_order() {
        let mut registry = PluralRuleRegistry::new();
        assert_eq!(registry.rule_for(&tag("en_GB")).name(), "one_other");
        assert_eq!(registry.rule_for(&tag("pt_BR")).name(), "zero_one_other");
        assert_eq!(registry.rule_for(&tag("pt_PT")).name(), "one_other");
        assert_eq!(registry.rule_for(&tag("ru")).form_count(), 3);

        registry.register_builtin(&tag("en"), "single").unwrap();
        assert_eq!(registry.rule_for(&tag("en_GB")).name(), "single");

        registry.register(&tag("en_GB"), FnRule::new("british", 2, |n| usize::from(n != 1)));
        assert_eq!(registry.rule_for(&tag("en_GB")).name(), "british");
        assert_eq!(registry.rule_for(&tag("en_US")).name(), "single");
    }

    #[test]
    fn test_variant_modifier_resolution() {
        let mut registry = PluralRuleRegistry::new();
        assert_eq!(registry.rule_for(&tag("sr@latin")).name(), BuiltinRule::Slavic.as_str());

        registry.register_builtin(&tag("sr_RS"), "single").unwrap();
        assert_eq!(registry.rule_for(&tag("sr_RS@latin")).name(), "single");

        registry.register_builtin(&tag("sr_RS@latin"), "one_other").unwrap();
        assert_eq!(registry.rule_for(&tag("sr_RS@latin")).name(), "one_other");
        assert_eq!(registry.rule_for(&tag("sr_RS")).name(), "single");
    }

    #[test]
    fn test_unknown_locale_gets_default_rule() {
        let registry = PluralRuleRegistry::new();
        assert!(registry.resolve(&tag("xx")).is_none());
        let rule = registry.rule_for(&tag("xx"));
        assert_eq!(rule.form_index(1), 0);
        assert_eq!(rule.form_index(7), 1);
    }
}
