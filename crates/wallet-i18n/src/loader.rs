//! TS catalogue parsing
//!
//! Reads the XML produced by Qt's `lupdate` into a [`Catalogue`]. XML
//! entities are resolved by the parser, so `&amp;Copy` loads as `&Copy` and
//! `&lt;b&gt;` loads as `<b>`. Elements the model does not carry
//! (`defaultcodec`, `dependencies`, `oldsource`, `userdata`, `extra-*`) are
//! skipped.
//!
//! Whitespace-only text is kept, so `<translation> </translation>` loads as a
//! single space. Only leaf elements are read as text, which keeps the
//! indentation between elements harmless.

use crate::error::{I18nError, I18nResult};
use crate::model::{Catalogue, Context, Location, Message, TranslationStatus, TranslationText};
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, trace, warn};
use wallet_i18n_common::LocaleTag;
use xml::reader::{EventReader, ParserConfig, XmlEvent};
use xmltree::{Element, XMLNode};

const TAG_TS: &str = "TS";
const TAG_CONTEXT: &str = "context";
const TAG_NAME: &str = "name";
const TAG_MESSAGE: &str = "message";
const TAG_SOURCE: &str = "source";
const TAG_COMMENT: &str = "comment";
const TAG_EXTRA_COMMENT: &str = "extracomment";
const TAG_TRANSLATOR_COMMENT: &str = "translatorcomment";
const TAG_LOCATION: &str = "location";
const TAG_TRANSLATION: &str = "translation";
const TAG_NUMERUS_FORM: &str = "numerusform";

/// Parse a catalogue from a string. `origin` names the resource in errors.
pub fn parse_str(input: &str, origin: &str) -> I18nResult<Catalogue> {
    parse_reader(input.as_bytes(), origin)
}

/// Parse a catalogue from any reader.
pub fn parse_reader<R: Read>(reader: R, origin: &str) -> I18nResult<Catalogue> {
    let root = read_tree(reader, origin)?;
    parse_document(root, origin)
}

/// Build the element tree, keeping whitespace-only text nodes.
fn read_tree<R: Read>(reader: R, origin: &str) -> I18nResult<Element> {
    let config = ParserConfig::new()
        .whitespace_to_characters(true)
        .cdata_to_characters(true);
    let mut events = EventReader::new_with_config(reader, config);
    let mut open: Vec<Element> = Vec::new();

    loop {
        let event = events
            .next()
            .map_err(|e| I18nError::parse(origin, e.to_string()))?;
        match event {
            XmlEvent::StartElement {
                name, attributes, ..
            } => {
                let mut el = Element::new(&name.local_name);
                for attr in attributes {
                    el.attributes.insert(attr.name.local_name, attr.value);
                }
                open.push(el);
            }
            XmlEvent::EndElement { .. } => {
                let Some(done) = open.pop() else {
                    return Err(I18nError::parse(origin, "unbalanced end tag"));
                };
                match open.last_mut() {
                    Some(parent) => parent.children.push(XMLNode::Element(done)),
                    None => return Ok(done),
                }
            }
            XmlEvent::Characters(text) | XmlEvent::Whitespace(text) | XmlEvent::CData(text) => {
                if let Some(current) = open.last_mut() {
                    current.children.push(XMLNode::Text(text));
                }
            }
            XmlEvent::EndDocument => {
                return Err(I18nError::parse(origin, "document has no root element"));
            }
            _ => {}
        }
    }
}

/// Load a catalogue file.
pub fn load_file(path: &Path) -> I18nResult<Catalogue> {
    let origin = path.display().to_string();
    debug!("Loading catalogue file: {:?}", path);

    let content = fs::read(path)?;
    let catalogue = parse_reader(content.as_slice(), &origin)?;

    info!(
        "Loaded catalogue {} ({} contexts, {} messages)",
        origin,
        catalogue.len(),
        catalogue.message_count()
    );
    Ok(catalogue)
}

fn parse_document(root: Element, origin: &str) -> I18nResult<Catalogue> {
    if root.name != TAG_TS {
        return Err(I18nError::parse(
            origin,
            format!("root element is <{}>, expected <{TAG_TS}>", root.name),
        ));
    }

    let mut catalogue = Catalogue::new(locale_attribute(&root, "language", origin)?);
    catalogue.version = attribute(&root, "version");
    catalogue.source_language = locale_attribute(&root, "sourcelanguage", origin)?;

    for node in root.children {
        match node {
            XMLNode::Element(el) if el.name == TAG_CONTEXT => {
                let context = parse_context(el, origin)?;
                if catalogue.context(context.name()).is_some() {
                    debug!("Merging repeated context {} in {}", context.name(), origin);
                }
                catalogue.insert_context(context);
            }
            XMLNode::Element(el) => trace!("Skipping <{}> in {}", el.name, origin),
            _ => {}
        }
    }

    Ok(catalogue)
}

fn parse_context(el: Element, origin: &str) -> I18nResult<Context> {
    let mut name = None;
    let mut messages = Vec::new();

    for node in el.children {
        let XMLNode::Element(child) = node else {
            continue;
        };
        if child.name == TAG_MESSAGE {
            messages.push(child);
        } else if child.name == TAG_NAME {
            name = Some(text_of(&child));
        } else {
            trace!("Skipping <{}> in context", child.name);
        }
    }

    let name = name.ok_or_else(|| I18nError::parse(origin, "<context> without <name>"))?;
    let mut context = Context::new(name);
    for message in messages {
        let message = parse_message(message, context.name(), origin)?;
        if let Some(previous) = context.insert(message) {
            warn!(
                "Duplicate message '{}' in context {} of {}, keeping the later entry",
                previous.source,
                context.name(),
                origin
            );
        }
    }
    Ok(context)
}

fn parse_message(el: Element, context: &str, origin: &str) -> I18nResult<Message> {
    let numerus = matches!(
        el.attributes.get("numerus").map(String::as_str),
        Some("yes" | "true")
    );

    let mut message = Message {
        id: attribute(&el, "id"),
        ..Default::default()
    };
    let mut source = None;
    let mut translation = None;

    for node in el.children {
        let XMLNode::Element(child) = node else {
            continue;
        };
        if child.name == TAG_TRANSLATION {
            translation = Some(child);
            continue;
        }
        match child.name.as_str() {
            TAG_SOURCE => source = Some(text_of(&child)),
            TAG_COMMENT => message.comment = non_empty(text_of(&child)),
            TAG_EXTRA_COMMENT => message.extra_comment = non_empty(text_of(&child)),
            TAG_TRANSLATOR_COMMENT => message.translator_comment = non_empty(text_of(&child)),
            TAG_LOCATION => message.locations.push(parse_location(&child, origin)?),
            other => trace!("Skipping <{}> in message", other),
        }
    }

    message.source = source.ok_or_else(|| {
        I18nError::parse(origin, format!("<message> without <source> in context {context}"))
    })?;

    match translation {
        Some(el) => {
            let (status, text) = parse_translation(&el, numerus, &message.source, origin)?;
            message.status = status;
            message.text = text;
        }
        None => {
            message.status = TranslationStatus::Unfinished;
            message.text = if numerus {
                TranslationText::Plural(Vec::new())
            } else {
                TranslationText::Single(String::new())
            };
        }
    }

    Ok(message)
}

fn parse_translation(
    el: &Element,
    numerus: bool,
    source: &str,
    origin: &str,
) -> I18nResult<(TranslationStatus, TranslationText)> {
    let kind = el.attributes.get("type").map(String::as_str);
    let status = TranslationStatus::from_attribute(kind).ok_or_else(|| {
        I18nError::parse(
            origin,
            format!("unknown translation type '{}' for '{source}'", kind.unwrap_or_default()),
        )
    })?;

    let forms: Vec<String> = el
        .children
        .iter()
        .filter_map(|node| match node {
            XMLNode::Element(form) if form.name == TAG_NUMERUS_FORM => Some(text_of(form)),
            _ => None,
        })
        .collect();

    if !numerus {
        if !forms.is_empty() {
            return Err(I18nError::parse(
                origin,
                format!("<{TAG_NUMERUS_FORM}> in non-numerus message '{source}'"),
            ));
        }
        return Ok((status, TranslationText::Single(text_of(el))));
    }

    if forms.is_empty() {
        let text = text_of(el);
        if !text.trim().is_empty() {
            return Ok((status, TranslationText::Plural(vec![text])));
        }
        if status.is_finished() {
            return Err(I18nError::parse(
                origin,
                format!("numerus message '{source}' has no <{TAG_NUMERUS_FORM}>"),
            ));
        }
    }

    Ok((status, TranslationText::Plural(forms)))
}

fn parse_location(el: &Element, origin: &str) -> I18nResult<Location> {
    let line = attribute(el, "line");
    if let Some(line) = &line {
        line.parse::<i64>().map_err(|_| {
            I18nError::parse(origin, format!("location line '{line}' is not a number"))
        })?;
    }
    Ok(Location {
        filename: attribute(el, "filename"),
        line,
    })
}

/// Concatenated text and CDATA content of an element.
fn text_of(el: &Element) -> String {
    el.children
        .iter()
        .filter_map(|node| match node {
            XMLNode::Text(text) | XMLNode::CData(text) => Some(text.as_str()),
            _ => None,
        })
        .collect()
}

fn attribute(el: &Element, key: &str) -> Option<String> {
    el.attributes.get(key).filter(|v| !v.is_empty()).cloned()
}

fn locale_attribute(el: &Element, key: &str, origin: &str) -> I18nResult<Option<LocaleTag>> {
    attribute(el, key)
        .map(|value| {
            LocaleTag::parse(&value).map_err(|_| {
                I18nError::parse(origin, format!("{key} attribute '{value}' is not a locale"))
            })
        })
        .transpose()
}

fn non_empty(text: String) -> Option<String> {
    (!text.is_empty()).then_some(text)
}
