//! TS catalogue serialization

use crate::error::{I18nError, I18nResult};
use crate::model::{Catalogue, Context, Message, TranslationText};
use std::io::Write;
use std::path::Path;
use tracing::debug;
use xmltree::{Element, EmitterConfig, XMLNode};

/// Render a catalogue as TS XML.
pub fn to_xml_string(catalogue: &Catalogue) -> I18nResult<String> {
    let mut buffer = Vec::new();
    write_to(catalogue, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| I18nError::Serialize(e.to_string()))
}

/// Write a catalogue as TS XML.
pub fn write_to<W: Write>(catalogue: &Catalogue, writer: W) -> I18nResult<()> {
    let config = EmitterConfig::new().perform_indent(true);
    document(catalogue)
        .write_with_config(writer, config)
        .map_err(|e| I18nError::Serialize(e.to_string()))
}

/// Save a catalogue to a file atomically.
///
/// The document is written to a temporary file next to `path` and renamed
/// over it, so a failed write leaves any existing catalogue untouched.
pub fn save(catalogue: &Catalogue, path: &Path) -> I18nResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staging = tempfile::NamedTempFile::new_in(dir)?;
    write_to(catalogue, staging.as_file_mut())?;
    staging.as_file_mut().flush()?;
    staging.persist(path).map_err(|e| I18nError::IoError(e.error))?;
    debug!("Wrote catalogue with {} contexts to {:?}", catalogue.len(), path);
    Ok(())
}

fn document(catalogue: &Catalogue) -> Element {
    let mut root = Element::new("TS");
    set_attribute(&mut root, "version", catalogue.version.as_deref());
    set_attribute(&mut root, "language", catalogue.language.as_ref().map(|l| l.as_str()));
    set_attribute(
        &mut root,
        "sourcelanguage",
        catalogue.source_language.as_ref().map(|l| l.as_str()),
    );
    root.children
        .extend(catalogue.contexts().iter().map(|ctx| XMLNode::Element(context_element(ctx))));
    root
}

fn context_element(context: &Context) -> Element {
    let mut el = Element::new("context");
    el.children.push(text_element("name", context.name()));
    el.children
        .extend(context.messages().iter().map(|msg| XMLNode::Element(message_element(msg))));
    el
}

fn message_element(message: &Message) -> Element {
    let mut el = Element::new("message");
    set_attribute(&mut el, "id", message.id.as_deref());
    if message.is_numerus() {
        set_attribute(&mut el, "numerus", Some("yes"));
    }

    for location in &message.locations {
        let mut loc = Element::new("location");
        set_attribute(&mut loc, "filename", location.filename.as_deref());
        set_attribute(&mut loc, "line", location.line.as_deref());
        el.children.push(XMLNode::Element(loc));
    }

    el.children.push(text_element("source", &message.source));
    for (tag, value) in [
        ("comment", &message.comment),
        ("extracomment", &message.extra_comment),
        ("translatorcomment", &message.translator_comment),
    ] {
        if let Some(value) = value {
            el.children.push(text_element(tag, value));
        }
    }

    let mut translation = Element::new("translation");
    set_attribute(&mut translation, "type", message.status.as_attribute());
    match &message.text {
        TranslationText::Single(text) => push_text(&mut translation, text),
        TranslationText::Plural(forms) => translation.children.extend(
            forms
                .iter()
                .map(|form| text_element("numerusform", form)),
        ),
    }
    el.children.push(XMLNode::Element(translation));
    el
}

fn text_element(tag: &str, text: &str) -> XMLNode {
    let mut el = Element::new(tag);
    push_text(&mut el, text);
    XMLNode::Element(el)
}

fn push_text(el: &mut Element, text: &str) {
    if !text.is_empty() {
        el.children.push(XMLNode::Text(text.to_string()));
    }
}

fn set_attribute(el: &mut Element, key: &str, value: Option<&str>) {
    if let Some(value) = value {
        el.attributes.insert(key.to_string(), value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::parse_str;
    use crate::model::{Location, TranslationStatus};

    #[test]
    fn test_markup_and_mnemonics_are_escaped() {
        let mut catalogue = Catalogue::new(None);
        catalogue.insert_message(
            "AskPassphraseDialog",
            Message::new("Wallet is <b>encrypted</b>", "Wallet is <b>encrypted</b> & safe"),
        );

        let xml = to_xml_string(&catalogue).unwrap();
        assert!(xml.contains("Wallet is &lt;b>encrypted&lt;/b>") || xml.contains("Wallet is &lt;b&gt;encrypted&lt;/b&gt;"));
        assert!(xml.contains("&amp; safe"));
        assert!(!xml.contains("<b>"));
    }

    #[test]
    fn test_save_replaces_file_atomically() {
        let dir = wallet_i18n_common::test_utils::create_temp_dir();
        let path = dir.path().join("bitcoin_en_GB.ts");
        std::fs::write(&path, "stale").unwrap();

        let mut catalogue = Catalogue::new(Some("en_GB".parse().unwrap()));
        catalogue.insert_message("BanTableModel", Message::new("Banned Until", "Banned Until"));
        save(&catalogue, &path).unwrap();

        let reloaded = crate::loader::load_file(&path).unwrap();
        assert_eq!(reloaded, catalogue);
        let leftovers = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 1);

        let missing_dir = dir.path().join("missing").join("bitcoin_de.ts");
        assert!(matches!(save(&catalogue, &missing_dir), Err(I18nError::IoError(_))));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), to_xml_string(&catalogue).unwrap());
    }

    #[test]
    fn test_whitespace_text_survives_round_trip() {
        let mut catalogue = Catalogue::new(None);
        catalogue.insert_message("TransactionView", Message::new("sep", " "));
        catalogue.insert_message("TransactionView", Message::new(" ", "  "));

        let reloaded = parse_str(&to_xml_string(&catalogue).unwrap(), "written.ts").unwrap();
        assert_eq!(reloaded, catalogue);
    }

    #[test]
    fn test_written_document_reloads_identically() {
        let mut catalogue = Catalogue::new(Some("en_GB".parse().unwrap()));
        catalogue.version = Some("2.1".to_string());
        let mut located = Message::new("&Copy", "&Copy").with_comment("address");
        located.locations.push(Location {
            filename: Some("../addressbookpage.cpp".to_string()),
            line: Some("+7".to_string()),
        });
        catalogue.insert_message("AddressBookPage", located);
        catalogue.insert_message("AddressBookPage", Message::unfinished("C&hoose"));
        catalogue.insert_message(
            "BitcoinGUI",
            Message::plural("%n week(s)", ["%n week", "%n weeks"]),
        );
        catalogue.insert_message(
            "BitcoinGUI",
            Message::plural("%n year(s)", ["", ""]).with_status(TranslationStatus::Unfinished),
        );
        catalogue.insert_message(
            "bitcoin-core",
            Message::new("Old text", "Old text").with_status(TranslationStatus::Obsolete),
        );

        let xml = to_xml_string(&catalogue).unwrap();
        let reloaded = parse_str(&xml, "written.ts").unwrap();
        assert_eq!(reloaded, catalogue);
    }
}
