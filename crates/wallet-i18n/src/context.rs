//! Arguments for a translation request
//!
//! [`TranslationArgs`] bundles what a lookup needs beyond the context and
//! source text: the quantity for numerus messages, positional arguments for
//! `%1..%9`, and an optional disambiguation comment.

/// Runtime inputs for rendering one message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationArgs {
    /// Quantity for plural selection and `%n`.
    pub quantity: Option<i64>,
    /// Positional arguments, `args[0]` fills `%1`.
    pub args: Vec<String>,
    /// Disambiguation comment selecting between identical source texts.
    pub comment: Option<String>,
}

impl TranslationArgs {
    /// No quantity, no arguments.
    pub fn new() -> Self {
        Self::default()
    }

    /// Arguments carrying a quantity.
    pub fn with_quantity(quantity: i64) -> Self {
        Self {
            quantity: Some(quantity),
            ..Default::default()
        }
    }

    /// Set the quantity.
    pub fn quantity(mut self, quantity: i64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// Append a positional argument.
    pub fn arg<T: ToString>(mut self, value: T) -> Self {
        self.args.push(value.to_string());
        self
    }

    /// Append several positional arguments.
    pub fn args<I, T>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: ToString,
    {
        self.args.extend(values.into_iter().map(|v| v.to_string()));
        self
    }

    /// Set the disambiguation comment.
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Disambiguation comment, empty when absent.
    pub fn comment_key(&self) -> &str {
        self.comment.as_deref().unwrap_or("")
    }
}

/// Translate through a [`Translator`](crate::Translator) or
/// [`LocaleManager`](crate::LocaleManager).
///
/// ```rust
/// use wallet_i18n::{tr, Catalogue, Message, Translator};
///
/// let mut catalogue = Catalogue::new(None);
/// catalogue.insert_message("BitcoinGUI", Message::plural("%n hour(s)", ["%n hour", "%n hours"]));
/// catalogue.insert_message("BitcoinGUI", Message::new("%1 and %2", "%1 and %2"));
/// let translator = Translator::new(catalogue);
///
/// assert_eq!(tr!(translator, "BitcoinGUI", "%n hour(s)", n = 3), "3 hours");
/// assert_eq!(tr!(translator, "BitcoinGUI", "%1 and %2"; "a", "b"), "a and b");
/// assert_eq!(tr!(translator, "NoSuchContext", "Hello"), "Hello");
/// ```
#[macro_export]
macro_rules! tr {
    ($target:expr, $context:expr, $source:expr) => {
        $target.translate_with($context, $source, &$crate::TranslationArgs::new())
    };
    ($target:expr, $context:expr, $source:expr, n = $n:expr) => {
        $target.translate_with($context, $source, &$crate::TranslationArgs::with_quantity($n))
    };
    ($target:expr, $context:expr, $source:expr, n = $n:expr; $($arg:expr),+ $(,)?) => {
        $target.translate_with(
            $context,
            $source,
            &$crate::TranslationArgs::with_quantity($n)$(.arg($arg))+,
        )
    };
    ($target:expr, $context:expr, $source:expr; $($arg:expr),+ $(,)?) => {
        $target.translate_with(
            $context,
            $source,
            &$crate::TranslationArgs::new()$(.arg($arg))+,
        )
    };
}
