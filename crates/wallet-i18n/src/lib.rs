//! Translation catalogues for the ATBcoin wallet
//!
//! This crate loads Qt Linguist `.ts` catalogues and answers lookups for the
//! wallet's user interface. It includes:
//!
//! - TS XML loading and writing with a lossless round trip
//! - Lookup by context, source text and disambiguation comment
//! - Pluggable plural rules per locale
//! - `%1..%9` and `%n` placeholder substitution
//! - Atomic locale switching with fallback to the bundled `en_GB` catalogue
//! - Completeness statistics for translators
//!
//! # Example
//!
//! ```rust
//! use wallet_i18n::{Catalogue, Message, Translator};
//!
//! let mut catalogue = Catalogue::new(Some("en_GB".parse().unwrap()));
//! catalogue.insert_message("BanTableModel", Message::new("IP/Netmask", "IP/Netmask"));
//! catalogue.insert_message(
//!     "BitcoinGUI",
//!     Message::plural("%n hour(s)", ["%n hour", "%n hours"]),
//! );
//!
//! let translator = Translator::new(catalogue);
//! assert_eq!(translator.translate("BitcoinGUI", "%n hour(s)", Some(1), &[]), "1 hour");
//! assert_eq!(translator.translate("BitcoinGUI", "%n hour(s)", Some(5), &[]), "5 hours");
//! assert_eq!(translator.translate("Unknown", "Send", None, &[]), "Send");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod bundled;
pub mod context;
pub mod error;
pub mod format;
pub mod loader;
pub mod locale;
pub mod manager;
pub mod model;
pub mod plural;
pub mod resource;
pub mod stats;
pub mod translator;
pub mod writer;

pub use bundled::{bundled_catalogue, bundled_locales};
pub use context::TranslationArgs;
pub use error::{I18nError, I18nResult};
pub use format::{placeholders, substitute, Placeholder};
pub use loader::{load_file, parse_reader, parse_str};
pub use locale::{negotiate, parse_locale};
pub use manager::LocaleManager;
pub use model::{Catalogue, Context, Location, Message, TranslationStatus, TranslationText};
pub use plural::{default_rule, BuiltinRule, FnRule, PluralRule, PluralRuleRegistry};
pub use resource::ResourceManager;
pub use stats::{context_stats, mnemonic_issues, placeholder_issues, plural_form_issues, CatalogueStats};
pub use translator::Translator;
pub use writer::{save, to_xml_string, write_to};

// Re-export commonly used workspace types
pub use wallet_i18n_common::LocaleTag;
pub use wallet_i18n_config::Config;
