//! # Wallet I18n Common
//!
//! Shared types, utilities, and common functionality for the wallet
//! translation catalogue.
//!
//! This crate provides the locale tag newtype, the workspace error type, and
//! text helpers used by both the configuration layer and the catalogue
//! library.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use types::*;
pub use utils::*;
