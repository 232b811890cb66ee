//! Text helpers for UI strings carrying mnemonic markers.
//!
//! Catalogue texts mark the accelerator key with a single `&` before the
//! key character (`&Copy`, `C&lose`). A doubled `&&` is a literal ampersand.

/// Removes mnemonic markers, collapsing `&&` to a literal `&`.
///
/// A trailing lone `&` is kept since it marks nothing.
pub fn strip_mnemonic(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '&' {
            match chars.next() {
                Some(next) => out.push(next),
                None => out.push('&'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Returns the accelerator character marked by the first lone `&`.
pub fn mnemonic_key(input: &str) -> Option<char> {
    let mut chars = input.chars();
    while let Some(c) = chars.next() {
        if c == '&' {
            match chars.next() {
                Some('&') => continue,
                Some(key) if !key.is_whitespace() => return Some(key),
                _ => return None,
            }
        }
    }
    None
}

/// Whether the text carries a mnemonic marker.
pub fn has_mnemonic(input: &str) -> bool {
    mnemonic_key(input).is_some()
}

/// Truncates a string to a maximum number of characters with an ellipsis.
pub fn truncate_string(input: &str, max_chars: usize) -> String {
    if input.chars().count() <= max_chars {
        input.to_string()
    } else {
        let kept: String = input.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
