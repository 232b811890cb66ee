//! # Wallet I18n Config
//!
//! Typed configuration for locating and selecting the wallet's translation
//! catalogues.
//!
//! This crate provides configuration loading from TOML, YAML or JSON files,
//! environment overrides, defaults matching the wallet's `locale/`
//! directory layout, and validation.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validator;

pub use defaults::*;
pub use loader::*;
pub use schema::*;
pub use validator::*;
