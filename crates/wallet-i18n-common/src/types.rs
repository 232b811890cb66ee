//! Common type definitions and newtype wrappers for domain modeling.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Locale of the catalogue bundled with the wallet.
pub const DEFAULT_LOCALE: &str = "en_GB";

/// A locale identifier in the catalogue's spelling, e.g. `en_GB` or `pt_BR`.
///
/// Parsing accepts both `_` and `-` separators and normalizes case, so
/// `en-gb`, `en_GB` and `EN-GB` all produce the tag `en_GB`. Script subtags
/// are kept in title case (`sr_Latn_RS`). A trailing `@variant` modifier, as
/// in Qt's `sr@latin` catalogues, is kept in lower case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LocaleTag {
    tag: String,
    language_len: usize,
    base_len: usize,
}

impl LocaleTag {
    /// Parses a locale tag.
    pub fn parse(input: &str) -> std::result::Result<Self, CommonError> {
        Self::normalize(input.trim()).ok_or_else(|| {
            debug!("Rejected locale identifier {:?}", input);
            CommonError::InvalidLocale(input.to_string())
        })
    }

    fn normalize(input: &str) -> Option<Self> {
        let (base, variant) = match input.split_once('@') {
            Some((base, variant)) => (base, Some(variant)),
            None => (input, None),
        };

        let mut subtags = base.split(['_', '-']);
        let language = subtags.next()?;
        if !(2..=3).contains(&language.len()) || !language.chars().all(|c| c.is_ascii_alphabetic()) {
            return None;
        }

        let mut tag = language.to_ascii_lowercase();
        let language_len = tag.len();
        let mut seen_region = false;

        for subtag in subtags {
            let is_alpha = subtag.chars().all(|c| c.is_ascii_alphabetic());
            let is_digit = subtag.chars().all(|c| c.is_ascii_digit());
            tag.push('_');
            match subtag.len() {
                4 if is_alpha && !seen_region => {
                    let mut chars = subtag.chars();
                    if let Some(first) = chars.next() {
                        tag.push(first.to_ascii_uppercase());
                    }
                    tag.extend(chars.map(|c| c.to_ascii_lowercase()));
                }
                2 if is_alpha && !seen_region => {
                    tag.push_str(&subtag.to_ascii_uppercase());
                    seen_region = true;
                }
                3 if is_digit && !seen_region => {
                    tag.push_str(subtag);
                    seen_region = true;
                }
                _ => return None,
            }
        }

        let base_len = tag.len();
        if let Some(variant) = variant {
            if variant.is_empty() || !variant.chars().all(|c| c.is_ascii_alphanumeric()) {
                return None;
            }
            tag.push('@');
            tag.push_str(&variant.to_ascii_lowercase());
        }

        Some(Self {
            tag,
            language_len,
            base_len,
        })
    }

    /// The tag in catalogue spelling (`en_GB`, `sr@latin`).
    pub fn as_str(&self) -> &str {
        &self.tag
    }

    /// The language subtag (`en`).
    pub fn language(&self) -> &str {
        &self.tag[..self.language_len]
    }

    /// The tag without its `@variant` modifier (`sr` for `sr@latin`).
    pub fn base(&self) -> &str {
        &self.tag[..self.base_len]
    }

    /// The `@variant` modifier, if any (`latin`).
    pub fn variant(&self) -> Option<&str> {
        self.tag.get(self.base_len + 1..).filter(|v| !v.is_empty())
    }

    /// The region subtag, if any (`GB`).
    pub fn region(&self) -> Option<&str> {
        self.base()
            .split('_')
            .skip(1)
            .find(|s| s.len() == 2 || (s.len() == 3 && s.chars().all(|c| c.is_ascii_digit())))
    }

    /// Whether the tag carries anything beyond the language subtag.
    pub fn is_regional(&self) -> bool {
        self.tag.len() > self.language_len
    }

    /// The tag reduced to its language subtag.
    pub fn language_only(&self) -> Self {
        Self {
            tag: self.language().to_string(),
            language_len: self.language_len,
            base_len: self.language_len,
        }
    }

    /// The tag with `-` separators, as used by BCP 47 (`en-GB`). The
    /// `@variant` modifier has no BCP 47 spelling and is dropped.
    pub fn to_bcp47(&self) -> String {
        self.base().replace('_', "-")
    }
}

impl Default for LocaleTag {
    /// The locale of the catalogue bundled with the wallet.
    fn default() -> Self {
        Self {
            tag: DEFAULT_LOCALE.to_string(),
            language_len: 2,
            base_len: DEFAULT_LOCALE.len(),
        }
    }
}

impl fmt::Display for LocaleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag)
    }
}

impl FromStr for LocaleTag {
    type Err = CommonError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for LocaleTag {
    type Error = CommonError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<LocaleTag> for String {
    fn from(value: LocaleTag) -> Self {
        value.tag
    }
}

/// Common result type for the workspace.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Workspace-wide error type.
#[derive(thiserror::Error, Debug)]
pub enum CommonError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed locale identifier.
    #[error("Invalid locale identifier: {0}")]
    InvalidLocale(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}
