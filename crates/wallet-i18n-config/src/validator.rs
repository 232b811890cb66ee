//! Runtime validation of loaded configuration.

use crate::schema::Config;
use std::collections::BTreeSet;
use wallet_i18n_common::{CommonError, LocaleTag, Result};

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration.
    pub fn validate(config: &Config) -> Result<()> {
        config.validate().map_err(Into::into)
    }

    /// Validates a configuration and checks that every plural override
    /// names one of `known_rules`.
    pub fn validate_with_rules<'a, I>(config: &Config, known_rules: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a str>,
    {
        config.validate()?;

        let known: BTreeSet<&str> = known_rules.into_iter().collect();
        for (locale, rule) in &config.plural.overrides {
            if !known.contains(rule.as_str()) {
                return Err(CommonError::Config(format!(
                    "Unknown plural rule '{rule}' for locale {locale}"
                ))
                .into());
            }
        }
        Ok(())
    }

    /// Plural overrides keyed by parsed locale tag.
    pub fn plural_overrides(config: &Config) -> Result<Vec<(LocaleTag, String)>> {
        config
            .plural
            .overrides
            .iter()
            .map(|(locale, rule)| -> Result<(LocaleTag, String)> {
                Ok((LocaleTag::parse(locale)?, rule.trim().to_string()))
            })
            .collect()
    }
}
