//! Error types for catalogue operations

use thiserror::Error;
use wallet_i18n_common::CommonError;

/// Errors that can occur while loading, writing or configuring catalogues.
///
/// Lookups never produce errors: a missing context or message falls back to
/// the source text.
#[derive(Error, Debug)]
pub enum I18nError {
    /// Failed to parse a locale identifier
    #[error("Invalid locale identifier: {0}")]
    InvalidLocale(String),

    /// No catalogue resource exists for the requested locale
    #[error("No catalogue found for locale {locale} (searched: {searched})")]
    NotFound {
        /// The requested locale
        locale: String,
        /// Candidate paths that were tried, comma separated
        searched: String,
    },

    /// The catalogue resource is malformed
    #[error("Failed to parse catalogue {origin}: {reason}")]
    Parse {
        /// File name or other label of the resource
        origin: String,
        /// What was wrong with it
        reason: String,
    },

    /// A configuration names a plural rule that does not exist
    #[error("Unknown plural rule: {0}")]
    UnknownPluralRule(String),

    /// Failed to render a catalogue back to XML
    #[error("Failed to serialize catalogue: {0}")]
    Serialize(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl I18nError {
    pub(crate) fn parse(origin: &str, reason: impl Into<String>) -> Self {
        Self::Parse {
            origin: origin.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<CommonError> for I18nError {
    fn from(err: CommonError) -> Self {
        match err {
            CommonError::InvalidLocale(locale) => Self::InvalidLocale(locale),
            CommonError::Config(msg) => Self::Config(msg),
            CommonError::Io(io) => Self::IoError(io),
            CommonError::Serialization(msg) => Self::Serialize(msg),
        }
    }
}

/// Result type for i18n operations
pub type I18nResult<T> = Result<T, I18nError>;
