//! Placeholder substitution for rendered catalogue text
//!
//! `%1` through `%9` take positional arguments and `%n` takes the quantity.
//! Substitution is a single left-to-right pass: text inserted for one
//! placeholder is never scanned again. A placeholder without a value is left
//! as written, and every other `%` sequence (`%s`, `%i`, `%u`, `%%`) passes
//! through untouched. Mnemonic markers (`&`) and markup are not interpreted.

use std::collections::BTreeSet;

/// A placeholder recognised by [`substitute`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Placeholder {
    /// `%1` .. `%9`, stored one-based.
    Positional(u8),
    /// `%n`.
    Quantity,
}

impl std::fmt::Display for Placeholder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Positional(k) => write!(f, "%{k}"),
            Self::Quantity => f.write_str("%n"),
        }
    }
}

/// Replace `%1..%9` with `args` and `%n` with `quantity`.
pub fn substitute<S: AsRef<str>>(text: &str, quantity: Option<i64>, args: &[S]) -> String {
    if !text.contains('%') {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len() + args.iter().map(|a| a.as_ref().len()).sum::<usize>());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.peek().copied() {
            Some(d @ '1'..='9') => {
                let index = (d as usize) - ('1' as usize);
                match args.get(index) {
                    Some(arg) => {
                        out.push_str(arg.as_ref());
                        chars.next();
                    }
                    None => out.push('%'),
                }
            }
            Some('n') => match quantity {
                Some(n) => {
                    out.push_str(&n.to_string());
                    chars.next();
                }
                None => out.push('%'),
            },
            _ => out.push('%'),
        }
    }

    out
}

/// Placeholders occurring in `text`.
pub fn placeholders(text: &str) -> BTreeSet<Placeholder> {
    let mut found = BTreeSet::new();
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '%' {
            continue;
        }
        match chars.peek().copied() {
            Some(d @ '1'..='9') => {
                found.insert(Placeholder::Positional(d as u8 - b'0'));
                chars.next();
            }
            Some('n') => {
                found.insert(Placeholder::Quantity);
                chars.next();
            }
            _ => {}
        }
    }
    found
}
