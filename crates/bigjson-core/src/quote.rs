//! JSON string literal quoting.

use std::fmt::Write;

/// True for characters that must not appear unescaped in JSON output: C0
/// controls, delete and the C1 range, the quote and backslash themselves,
/// and a blocklist of invisible and bidi format characters (soft hyphen,
/// Arabic signs, Khmer vowels, zero-width and directional marks, separators,
/// word joiners, the BOM, and the U+FFFx specials).
fn must_escape(c: char) -> bool {
    matches!(c,
        '"' | '\\'
        | '\u{0000}'..='\u{001f}'
        | '\u{007f}'..='\u{009f}'
        | '\u{00ad}'
        | '\u{0600}'..='\u{0604}'
        | '\u{070f}'
        | '\u{17b4}'
        | '\u{17b5}'
        | '\u{200c}'..='\u{200f}'
        | '\u{2028}'..='\u{202f}'
        | '\u{2060}'..='\u{206f}'
        | '\u{feff}'
        | '\u{fff0}'..='\u{ffff}')
}

/// The short two-character escape for a character, when one exists.
fn short_escape(c: char) -> Option<&'static str> {
    match c {
        '\u{0008}' => Some("\\b"),
        '\t' => Some("\\t"),
        '\n' => Some("\\n"),
        '\u{000c}' => Some("\\f"),
        '\r' => Some("\\r"),
        '"' => Some("\\\""),
        '\\' => Some("\\\\"),
        _ => None,
    }
}

/// Escape a string into a valid JSON string literal.
///
/// A string free of blocklisted characters is wrapped in quotes verbatim.
/// Otherwise each offending character becomes its short escape when one
/// exists, else a `\uXXXX` sequence padded to four hex digits.
///
/// ```rust
/// use bigjson_core::quote;
///
/// assert_eq!(quote("plain"), "\"plain\"");
/// assert_eq!(quote("a\tb"), "\"a\\tb\"");
/// assert_eq!(quote("\u{00ad}"), "\"\\u00ad\"");
/// ```
pub fn quote(s: &str) -> String {
    if !s.chars().any(must_escape) {
        return format!("\"{s}\"");
    }

    let mut out = String::with_capacity(s.len() + 8);
    out.push('"');
    for c in s.chars() {
        if !must_escape(c) {
            out.push(c);
        } else if let Some(escape) = short_escape(c) {
            out.push_str(escape);
        } else {
            // All blocklisted characters live in the BMP, so four digits
            // always suffice.
            let _ = write!(out, "\\u{:04x}", c as u32);
        }
    }
    out.push('"');
    out
}
