//! Test utilities and shared fixtures for the wallet i18n workspace.
//!
//! This module provides common testing helpers and small TS catalogue
//! documents that can be used across all crates for unit and integration
//! testing.

use std::sync::Once;

#[cfg(feature = "tracing-subscriber")]
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
#[cfg(feature = "tracing-subscriber")]
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// No-op version when tracing-subscriber is not available
#[cfg(not(feature = "tracing-subscriber"))]
pub fn init_test_logging() {
    INIT.call_once(|| {});
}

/// Create a temporary directory for tests that automatically cleans up.
#[cfg(feature = "tempfile")]
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Write a file into a test directory and return its path.
pub fn write_fixture(dir: &std::path::Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("Failed to write fixture file");
    path
}

/// Small TS documents mirroring the structure of the wallet's catalogues.
pub mod fixtures {
    /// A catalogue exercising finished, unfinished, numerus, disambiguated
    /// and duplicate-context entries.
    pub const SAMPLE_CATALOGUE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE TS>
<TS version="2.1" language="en_GB">
<context>
    <name>AddressBookPage</name>
    <message>
        <source>&amp;Copy</source>
        <translation>&amp;Copy</translation>
    </message>
    <message>
        <source>Choose the address to send coins to</source>
        <translation type="unfinished"></translation>
    </message>
    <message>
        <source>There was an error trying to save the address list to %1. Please try again.</source>
        <translation>The address list could not be saved to %1. Please try again.</translation>
    </message>
</context>
<context>
    <name>BanTableModel</name>
    <message>
        <source>IP/Netmask</source>
        <translation>IP/Netmask</translation>
    </message>
</context>
<context>
    <name>BitcoinGUI</name>
    <message numerus="yes">
        <source>%n active connection(s) to ATBcoin network</source>
        <translation>
            <numerusform>%n active connection to ATBcoin network</numerusform>
            <numerusform>%n active connections to ATBcoin network</numerusform>
        </translation>
    </message>
    <message numerus="yes">
        <source>Processed %n block(s) of transaction history.</source>
        <translation type="unfinished">
            <numerusform></numerusform>
            <numerusform></numerusform>
        </translation>
    </message>
    <message>
        <source>%1 and %2</source>
        <translation>%1 and %2</translation>
    </message>
    <message>
        <source>Wallet is &lt;b&gt;encrypted&lt;/b&gt; and currently &lt;b&gt;unlocked&lt;/b&gt;</source>
        <translation>Wallet is &lt;b&gt;encrypted&lt;/b&gt; and currently &lt;b&gt;unlocked&lt;/b&gt;</translation>
    </message>
</context>
<context>
    <name>AddressBookPage</name>
    <message>
        <source>&amp;Copy</source>
        <translation>&amp;Copy to clipboard</translation>
    </message>
    <message>
        <source>&amp;Export</source>
        <translation>&amp;Export</translation>
    </message>
</context>
</TS>
"#;

    /// Build a one-message catalogue for the given language.
    pub fn single_message_catalogue(language: &str, context: &str, source: &str, translation: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="utf-8"?>
<TS version="2.1" language="{language}">
<context>
    <name>{context}</name>
    <message>
        <source>{source}</source>
        <translation>{translation}</translation>
    </message>
</context>
</TS>
"#
        )
    }
}
