//! Integration tests for catalogue lookup against the wallet's catalogues

use wallet_i18n::{
    bundled_catalogue, parse_str, tr, CatalogueStats, LocaleTag, PluralRule, Translator,
    TranslationArgs,
};
use wallet_i18n_common::test_utils::{fixtures, init_test_logging};

fn bundled() -> Translator {
    init_test_logging();
    let catalogue = bundled_catalogue(&LocaleTag::default()).expect("bundled catalogue");
    Translator::from_shared(catalogue, &Default::default())
}

fn sample() -> Translator {
    init_test_logging();
    Translator::new(parse_str(fixtures::SAMPLE_CATALOGUE, "sample.ts").expect("sample catalogue"))
}

#[test]
fn test_finished_entry_renders_translation() {
    let t = bundled();
    assert_eq!(t.translate("BanTableModel", "IP/Netmask", None, &[]), "IP/Netmask");
    assert_eq!(t.translate("AddressBookPage", "&Copy", None, &[]), "&Copy");
}

#[test]
fn test_unfinished_entry_renders_source() {
    let t = bundled();
    assert_eq!(
        t.translate("AddressBookPage", "Choose the address to send coins to", None, &[]),
        "Choose the address to send coins to"
    );
}

#[test]
fn test_unknown_context_and_source() {
    let t = bundled();
    assert_eq!(t.translate("NoSuchDialog", "IP/Netmask", None, &[]), "IP/Netmask");
    assert_eq!(
        t.translate("BanTableModel", "Not in the catalogue", None, &[]),
        "Not in the catalogue"
    );
}

#[test]
fn test_plural_forms_under_binary_rule() {
    let t = bundled();
    let source = "%n active connection(s) to ATBcoin network";
    assert_eq!(
        t.translate("BitcoinGUI", source, Some(1), &[]),
        "1 active connection to ATBcoin network"
    );
    assert_eq!(
        t.translate("BitcoinGUI", source, Some(5), &[]),
        "5 active connections to ATBcoin network"
    );
    assert_eq!(
        tr!(t, "BitcoinGUI", "%n week(s)", n = 2),
        "2 weeks"
    );
}

#[test]
fn test_unfinished_numerus_renders_source() {
    let t = bundled();
    assert_eq!(
        t.translate("TransactionDesc", "Open for %n more block(s)", Some(3), &[]),
        "Open for 3 more block(s)"
    );
}

#[test]
fn test_positional_arguments() {
    let t = bundled();
    assert_eq!(
        t.translate("BitcoinGUI", "%1 and %2", None, &["2 days", "4 hours"]),
        "2 days and 4 hours"
    );
    assert_eq!(t.translate("BitcoinGUI", "%1 and %2", None, &["only"]), "only and %2");
    assert_eq!(
        tr!(t, "BitcoinGUI", "%1 behind"; "3 weeks"),
        "3 weeks behind"
    );
}

#[test]
fn test_markup_passes_through() {
    let t = sample();
    let source = "Wallet is <b>encrypted</b> and currently <b>unlocked</b>";
    assert_eq!(t.translate("BitcoinGUI", source, None, &[]), source);
}

#[test]
fn test_duplicate_contexts_merge_with_later_entry_winning() {
    let t = sample();
    assert_eq!(t.translate("AddressBookPage", "&Copy", None, &[]), "&Copy to clipboard");
    assert_eq!(t.translate("AddressBookPage", "&Export", None, &[]), "&Export");
    assert_eq!(
        t.translate(
            "AddressBookPage",
            "There was an error trying to save the address list to %1. Please try again.",
            None,
            &["/tmp/addresses.csv"]
        ),
        "The address list could not be saved to /tmp/addresses.csv. Please try again."
    );
    assert_eq!(t.catalogue().contexts()[0].name(), "AddressBookPage");
}

#[test]
fn test_translation_args_builder() {
    let t = sample();
    let args = TranslationArgs::with_quantity(1);
    assert_eq!(
        t.translate_with("BitcoinGUI", "%n active connection(s) to ATBcoin network", &args),
        "1 active connection to ATBcoin network"
    );
    assert_eq!(
        t.translate_with(
            "BitcoinGUI",
            "Processed %n block(s) of transaction history.",
            &TranslationArgs::with_quantity(12)
        ),
        "Processed 12 block(s) of transaction history."
    );
}

#[test]
fn test_bundled_statistics() {
    let t = bundled();
    let stats = CatalogueStats::of_catalogue(t.catalogue());
    assert_eq!(stats.total, 972);
    assert_eq!(stats.finished, 400);
    assert_eq!(stats.unfinished, 572);
    assert_eq!(stats.obsolete, 0);
    assert_eq!(stats.numerus, 13);

    let report = serde_json::to_value(stats).unwrap();
    assert_eq!(report["unfinished"], 572);
}

#[test]
fn test_whitespace_translations_render_verbatim() {
    init_test_logging();
    let catalogue = parse_str(
        r#"<TS version="2.1" language="sr@latin">
<context>
    <name>TransactionView</name>
    <message>
        <source>sep</source>
        <translation> </translation>
    </message>
    <message>
        <source> </source>
        <translation>razmak</translation>
    </message>
</context>
</TS>"#,
        "sr_latin.ts",
    )
    .expect("catalogue with whitespace text");

    let t = Translator::new(catalogue);
    assert_eq!(t.locale().map(LocaleTag::as_str), Some("sr@latin"));
    assert_eq!(t.plural_rule().form_count(), 3);
    assert_eq!(t.translate("TransactionView", "sep", None, &[]), " ");
    assert_eq!(t.translate("TransactionView", " ", None, &[]), "razmak");
}
