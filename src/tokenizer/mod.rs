//! Delimiter-aware value tokenization, escaping and quoting.
//!
//! Configuration formats store multi-valued properties as one raw string
//! with the values separated by a delimiter (usually `,`). [`split`] breaks
//! such a string apart while honoring the backslash escape convention, and
//! [`escape`]/[`join`] are its inverses for writing values back out.
//! [`quote`]/[`unquote`] implement the double-quote wrapping used by
//! property-list style formats.
//!
//! Every function here is total: malformed escape sequences degrade to
//! literal text and never produce an error.
//!
//! # Examples
//!
//! ```
//! use confkey::tokenizer::{split, join};
//!
//! assert_eq!(split("abc,xyz", ','), vec!["abc", "xyz"]);
//! assert_eq!(split(r"abc\,xyz", ','), vec!["abc,xyz"]);
//! assert_eq!(join(&["a,b".to_string(), "c".to_string()], ','), r"a\,b,c");
//! ```

/// The escape character recognized by [`split`] and emitted by [`escape`].
pub const ESCAPE: char = '\\';

/// The delimiter used for multi-valued properties when none is specified.
pub const DEFAULT_LIST_DELIMITER: char = ',';

/// Splits a raw value into tokens on every unescaped delimiter.
///
/// An escape character immediately before the delimiter or before another
/// escape character collapses to the literal following character. An escape
/// character before anything else, or at the end of the input, is copied
/// literally; a Windows path such as `C:\tmp\` splits to itself.
pub fn split(value: &str, delimiter: char) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut chars = value.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == ESCAPE {
            match chars.peek() {
                Some(&next) if next == delimiter || next == ESCAPE => {
                    current.push(next);
                    chars.next();
                }
                // Stray escape, kept as-is.
                _ => current.push(ch),
            }
        } else if ch == delimiter {
            tokens.push(std::mem::take(&mut current));
        } else {
            current.push(ch);
        }
    }
    tokens.push(current);
    tokens
}

/// Like [`split`], but maps a missing value to an empty token sequence.
pub fn split_opt(value: Option<&str>, delimiter: char) -> Vec<String> {
    match value {
        Some(v) => split(v, delimiter),
        None => Vec::new(),
    }
}

/// Escapes one token so that [`split`] reproduces it literally.
///
/// The escape character and the delimiter are each prefixed with the escape
/// character; everything else passes through unchanged.
pub fn escape(token: &str, delimiter: char) -> String {
    let mut out = String::with_capacity(token.len());
    for ch in token.chars() {
        if ch == ESCAPE || ch == delimiter {
            out.push(ESCAPE);
        }
        out.push(ch);
    }
    out
}

/// Escapes each token and joins them with the delimiter.
///
/// For any non-empty token list, `split(&join(tokens, d), d)` yields the
/// original tokens back.
pub fn join(tokens: &[String], delimiter: char) -> String {
    let escaped: Vec<String> = tokens.iter().map(|t| escape(t, delimiter)).collect();
    escaped.join(&delimiter.to_string())
}

/// Characters (besides whitespace and the delimiter) that force quoting in
/// property-list style output.
const QUOTE_TRIGGERS: &[char] = &['"', '\\', '(', ')', '{', '}', '[', ']', ';', '=', ','];

/// Whether a value must be wrapped in double quotes to survive a
/// property-list style round trip.
pub fn needs_quoting(value: &str, delimiter: char) -> bool {
    value.is_empty()
        || value
            .chars()
            .any(|c| c.is_whitespace() || c == delimiter || QUOTE_TRIGGERS.contains(&c))
}

/// Quotes a value for property-list style output when necessary.
///
/// Values containing whitespace, the delimiter, or other structurally
/// significant characters are wrapped in double quotes with embedded quotes
/// and backslashes escaped; plain values are returned unchanged.
pub fn quote(value: &str, delimiter: char) -> String {
    if !needs_quoting(value, delimiter) {
        return value.to_string();
    }
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        if ch == '"' || ch == ESCAPE {
            out.push(ESCAPE);
        }
        out.push(ch);
    }
    out.push('"');
    out
}

/// Quoting passthrough for optional values; a missing value stays missing.
pub fn quote_opt(value: Option<&str>, delimiter: char) -> Option<String> {
    value.map(|v| quote(v, delimiter))
}

/// Removes property-list style quoting from a value.
///
/// Strips one pair of surrounding double quotes and collapses the escape
/// sequences inside; anything not wrapped in quotes is returned unchanged.
pub fn unquote(value: &str) -> String {
    let inner = match value.strip_prefix('"').and_then(|v| v.strip_suffix('"')) {
        Some(inner) if value.len() >= 2 => inner,
        _ => return value.to_string(),
    };
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == ESCAPE {
            match chars.next() {
                Some(next) => out.push(next),
                None => out.push(ch),
            }
        } else {
            out.push(ch);
        }
    }
    out
}
