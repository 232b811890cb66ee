//! In-memory catalogue model
//!
//! A [`Catalogue`] is an ordered list of [`Context`]s, each an ordered list of
//! [`Message`]s. Order follows the source document so that a catalogue written
//! back out reads like the one that was loaded.
//!
//! Inside a context a message is keyed by its source text plus its optional
//! disambiguation comment. Inserting a message under an existing key replaces
//! the earlier one in place. Inserting a context whose name already exists
//! merges it into the earlier context, so duplicate `<context>` blocks in a
//! file behave as one block with later entries winning.

use serde::Serialize;
use std::collections::HashMap;
use tracing::warn;
use wallet_i18n_common::LocaleTag;

/// Translation state of a message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum TranslationStatus {
    /// Translated and approved.
    #[default]
    Finished,
    /// Present but not yet localized; renders as source text.
    Unfinished,
    /// No longer used by the application; renders as source text.
    Obsolete,
}

impl TranslationStatus {
    /// Value of the `type` attribute on `<translation>`, if any.
    pub fn as_attribute(self) -> Option<&'static str> {
        match self {
            Self::Finished => None,
            Self::Unfinished => Some("unfinished"),
            Self::Obsolete => Some("obsolete"),
        }
    }

    /// Parses the `type` attribute. `vanished` is Qt's newer spelling of
    /// `obsolete`.
    pub fn from_attribute(value: Option<&str>) -> Option<Self> {
        match value {
            None | Some("") => Some(Self::Finished),
            Some("unfinished") => Some(Self::Unfinished),
            Some("obsolete" | "vanished") => Some(Self::Obsolete),
            Some(_) => None,
        }
    }

    /// Whether the stored translation may be rendered.
    pub fn is_finished(self) -> bool {
        self == Self::Finished
    }
}

/// Translation text: a single string or ordered plural forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TranslationText {
    /// Flat translation.
    Single(String),
    /// Numerus forms, indexed by the locale's plural rule.
    Plural(Vec<String>),
}

impl Default for TranslationText {
    fn default() -> Self {
        Self::Single(String::new())
    }
}

impl TranslationText {
    /// Whether no text is stored at all.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Single(text) => text.is_empty(),
            Self::Plural(forms) => forms.iter().all(String::is_empty),
        }
    }
}

/// A source code reference recorded by the extraction tool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Location {
    /// Source file, relative to the catalogue.
    pub filename: Option<String>,
    /// Line number, absolute (`42`) or relative (`+3`).
    pub line: Option<String>,
}

/// One source-to-translation mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Message {
    /// Verbatim source text, the lookup key.
    pub source: String,
    /// Disambiguation comment; part of the lookup key.
    pub comment: Option<String>,
    /// Developer note for translators.
    pub extra_comment: Option<String>,
    /// Note left by the translator.
    pub translator_comment: Option<String>,
    /// Optional message id.
    pub id: Option<String>,
    /// Where the source text occurs in code.
    pub locations: Vec<Location>,
    /// Translation state.
    pub status: TranslationStatus,
    /// Stored translation.
    pub text: TranslationText,
}

impl Message {
    /// A finished flat translation.
    pub fn new(source: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            text: TranslationText::Single(translation.into()),
            ..Default::default()
        }
    }

    /// A finished numerus translation.
    pub fn plural<I, S>(source: impl Into<String>, forms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            source: source.into(),
            text: TranslationText::Plural(forms.into_iter().map(Into::into).collect()),
            ..Default::default()
        }
    }

    /// An unfinished message with empty translation.
    pub fn unfinished(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            status: TranslationStatus::Unfinished,
            ..Default::default()
        }
    }

    /// Set the translation status.
    pub fn with_status(mut self, status: TranslationStatus) -> Self {
        self.status = status;
        self
    }

    /// Set the disambiguation comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Whether this message carries plural forms.
    pub fn is_numerus(&self) -> bool {
        matches!(self.text, TranslationText::Plural(_))
    }

    /// The flat translation, if this is not a numerus message.
    pub fn translation(&self) -> Option<&str> {
        match &self.text {
            TranslationText::Single(text) => Some(text),
            TranslationText::Plural(_) => None,
        }
    }

    /// The plural forms; empty for flat messages.
    pub fn forms(&self) -> &[String] {
        match &self.text {
            TranslationText::Single(_) => &[],
            TranslationText::Plural(forms) => forms,
        }
    }

    /// Disambiguation comment, with absence and empty treated alike.
    pub fn comment_key(&self) -> &str {
        self.comment.as_deref().unwrap_or("")
    }

    /// Whether the stored translation is used when rendering.
    pub fn is_renderable(&self) -> bool {
        self.status.is_finished() && !self.text.is_empty()
    }
}

/// A named group of messages, usually one dialog or window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Context {
    name: String,
    messages: Vec<Message>,
    #[serde(skip)]
    index: HashMap<String, Vec<usize>>,
}

impl Context {
    /// Create an empty context.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            messages: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Context identifier, e.g. `AddressBookPage`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Insert a message, replacing and returning any message with the same
    /// source and comment.
    pub fn insert(&mut self, message: Message) -> Option<Message> {
        if let Some(pos) = self.position(&message.source, message.comment_key()) {
            return Some(std::mem::replace(&mut self.messages[pos], message));
        }
        let pos = self.messages.len();
        self.index.entry(message.source.clone()).or_default().push(pos);
        self.messages.push(message);
        None
    }

    /// Message with the given source and no disambiguation comment.
    pub fn get(&self, source: &str) -> Option<&Message> {
        self.get_with_comment(source, "")
    }

    /// Message with the given source and disambiguation comment.
    pub fn get_with_comment(&self, source: &str, comment: &str) -> Option<&Message> {
        self.position(source, comment).map(|pos| &self.messages[pos])
    }

    /// All messages in document order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the context holds no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Merge another context's messages into this one; later entries win.
    pub fn merge(&mut self, other: Self) {
        for message in other.messages {
            if let Some(previous) = self.insert(message) {
                warn!(
                    "Duplicate message '{}' in context {}, keeping the later entry",
                    previous.source, self.name
                );
            }
        }
    }

    fn position(&self, source: &str, comment: &str) -> Option<usize> {
        self.index
            .get(source)?
            .iter()
            .copied()
            .find(|&pos| self.messages[pos].comment_key() == comment)
    }
}

/// An ordered collection of contexts for one target locale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Catalogue {
    /// Format version from the `version` attribute.
    pub version: Option<String>,
    /// Target locale from the `language` attribute.
    pub language: Option<LocaleTag>,
    /// Source locale from the `sourcelanguage` attribute.
    pub source_language: Option<LocaleTag>,
    contexts: Vec<Context>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl Catalogue {
    /// Create an empty catalogue for a target locale.
    pub fn new(language: Option<LocaleTag>) -> Self {
        Self {
            version: None,
            language,
            source_language: None,
            contexts: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Add a context, merging into an existing one with the same name.
    pub fn insert_context(&mut self, context: Context) {
        match self.index.get(&context.name) {
            Some(&pos) => self.contexts[pos].merge(context),
            None => {
                self.index.insert(context.name.clone(), self.contexts.len());
                self.contexts.push(context);
            }
        }
    }

    /// Add a single message to the named context, creating it if needed.
    pub fn insert_message(&mut self, context: &str, message: Message) -> Option<Message> {
        let pos = match self.index.get(context) {
            Some(&pos) => pos,
            None => {
                self.index.insert(context.to_string(), self.contexts.len());
                self.contexts.push(Context::new(context));
                self.contexts.len() - 1
            }
        };
        self.contexts[pos].insert(message)
    }

    /// Context by name.
    pub fn context(&self, name: &str) -> Option<&Context> {
        self.index.get(name).map(|&pos| &self.contexts[pos])
    }

    /// All contexts in document order.
    pub fn contexts(&self) -> &[Context] {
        &self.contexts
    }

    /// Message by context name and source text.
    pub fn find(&self, context: &str, source: &str) -> Option<&Message> {
        self.context(context)?.get(source)
    }

    /// Message by context name, source text and disambiguation comment.
    pub fn find_with_comment(&self, context: &str, source: &str, comment: &str) -> Option<&Message> {
        self.context(context)?.get_with_comment(source, comment)
    }

    /// Number of contexts.
    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    /// Whether the catalogue holds no contexts.
    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }

    /// Number of messages across all contexts.
    pub fn message_count(&self) -> usize {
        self.contexts.iter().map(Context::len).sum()
    }

    /// Iterate over `(context name, message)` pairs in document order.
    pub fn iter_messages(&self) -> impl Iterator<Item = (&str, &Message)> {
        self.contexts
            .iter()
            .flat_map(|ctx| ctx.messages.iter().map(move |msg| (ctx.name(), msg)))
    }
}
