//! Recursive-descent JSON parser that records each value's original type.
//!
//! The parser produces a [`SchemaNode`] tree: the usual value tree, but with
//! every node tagged by its storage type and the literal type it had in the
//! source text. Number handling is the point of the exercise:
//!
//! - integers within the double-precision safe range parse to `i64`
//! - integral numerals beyond it parse to an exact [`num_bigint::BigInt`]
//!   rather than a rounded float
//! - only numerals with a fractional part or exponent ever become `f64`
//! - with [`ParseOptions::store_as_string`], every numeral keeps its exact
//!   source text and the schema remembers it was written as a number
//!
//! Object keys matching prototype-pollution or constructor-injection
//! patterns are rejected, dropped, or preserved per [`SuspectAction`],
//! matching the hardening rules popularized by secure-json-parse.
//!
//! Recursion depth follows input nesting depth, here and in the
//! serializers; callers feeding untrusted, deeply nested documents should
//! bound input size externally.
//!
//! # Example
//!
//! ```rust
//! use bigjson_core::{parse, JsonValue, Number, ParseOptions};
//!
//! let parsed = parse("[1, 9007199254740993]", &ParseOptions::default()).unwrap();
//! match &parsed.data {
//!     JsonValue::Array(items) => {
//!         assert_eq!(items[0], JsonValue::Number(Number::Int(1)));
//!         // One past the safe range: kept exact, not rounded to 9007199254740992.0
//!         assert!(matches!(&items[1], JsonValue::Number(Number::Big(_))));
//!     }
//!     _ => unreachable!(),
//! }
//! ```

use std::str::FromStr;

use num_bigint::BigInt;

use crate::error::{Error, Result};
use crate::types::{JsonValue, Number, SchemaNode};

/// Largest integer a double can represent without precision loss (2^53 − 1).
pub const MAX_SAFE_INTEGER: i64 = 9_007_199_254_740_991;

/// Policy applied when an object key matches a forbidden-key pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SuspectAction {
    /// Abort the parse with [`Error::Security`].
    #[default]
    Error,
    /// Parse the associated value, then discard the pair.
    Ignore,
    /// Keep the pair as an ordinary member.
    Preserve,
}

impl FromStr for SuspectAction {
    type Err = Error;

    /// Parses `"error"`, `"ignore"`, or `"preserve"`; anything else is
    /// [`Error::Config`] naming the offending value. This is the entry
    /// point for string-typed surfaces such as CLI flags; the typed API
    /// cannot hold an invalid action.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "error" => Ok(SuspectAction::Error),
            "ignore" => Ok(SuspectAction::Ignore),
            "preserve" => Ok(SuspectAction::Preserve),
            other => Err(Error::Config {
                value: other.to_string(),
            }),
        }
    }
}

/// Behavioural switches for [`parse`].
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Reject duplicate object keys instead of letting later occurrences
    /// overwrite earlier ones.
    pub strict: bool,
    /// Keep every number's exact source text instead of a numeric type.
    /// The schema records the original type as `number`.
    pub store_as_string: bool,
    /// Store safe-range integers as big integers too, so every integral
    /// number has a single storage form.
    pub always_parse_as_big_int: bool,
    /// Policy for keys matching the prototype-pollution pattern.
    pub proto_action: SuspectAction,
    /// Policy for keys matching the constructor-injection pattern.
    pub constructor_action: SuspectAction,
}

/// A parsed document: the plain value tree plus its type schema. The two
/// trees are shape-isomorphic; `data` equals `data_schema.extract()`.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed {
    pub data: JsonValue,
    pub data_schema: SchemaNode,
}

/// Parse one JSON document.
///
/// Leading and trailing whitespace is skipped; anything else after the
/// value is a syntax error. Errors carry the byte offset just past the
/// offending character.
pub fn parse(text: &str, options: &ParseOptions) -> Result<Parsed> {
    let mut parser = Parser {
        scanner: Scanner::new(text),
        options,
    };
    let data_schema = parser.document()?;
    Ok(Parsed {
        data: data_schema.extract(),
        data_schema,
    })
}

/// Single-cursor scanner over the source text.
///
/// Every production reads characters only through [`Scanner::next`] and
/// [`Scanner::next_expect`]; the scanner holds the one mutable cursor of a
/// parse. `ch` is `None` once the end of input is passed.
struct Scanner<'a> {
    text: &'a str,
    /// Byte offset of the next unread character (also the offset reported
    /// in errors: just past the current character).
    pos: usize,
    ch: Option<char>,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str) -> Self {
        let mut scanner = Scanner { text, pos: 0, ch: None };
        scanner.next();
        scanner
    }

    /// Advance to the next character and return it.
    fn next(&mut self) -> Option<char> {
        match self.text[self.pos..].chars().next() {
            Some(c) => {
                self.pos += c.len_utf8();
                self.ch = Some(c);
            }
            None => self.ch = None,
        }
        self.ch
    }

    /// Assert the current character, then advance.
    fn next_expect(&mut self, expected: char) -> Result<Option<char>> {
        match self.ch {
            Some(c) if c == expected => Ok(self.next()),
            other => {
                let found = other.map(String::from).unwrap_or_default();
                Err(Error::Syntax {
                    message: format!("Expected '{expected}' instead of '{found}'"),
                    at: self.pos,
                })
            }
        }
    }

    /// The unread remainder of the input.
    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }
}

struct Parser<'a> {
    scanner: Scanner<'a>,
    options: &'a ParseOptions,
}

impl Parser<'_> {
    fn syntax(&self, message: impl Into<String>) -> Error {
        Error::Syntax {
            message: message.into(),
            at: self.scanner.pos,
        }
    }

    fn security(&self, message: &str) -> Error {
        Error::Security {
            message: message.to_string(),
            at: self.scanner.pos,
        }
    }

    /// Top-level entry: one value, then nothing but whitespace.
    fn document(&mut self) -> Result<SchemaNode> {
        let node = self.value()?;
        self.white();
        if self.scanner.ch.is_some() {
            return Err(self.syntax("Syntax error"));
        }
        Ok(node)
    }

    /// Skip whitespace: space and every character at or below it, which
    /// deliberately includes the C0 controls.
    fn white(&mut self) {
        while matches!(self.scanner.ch, Some(c) if c <= ' ') {
            self.scanner.next();
        }
    }

    /// Parse one JSON value, dispatching on the lookahead character.
    fn value(&mut self) -> Result<SchemaNode> {
        self.white();
        match self.scanner.ch {
            Some('{') => self.object(),
            Some('[') => self.array(),
            Some('"') => Ok(SchemaNode::String(self.string_text()?)),
            Some('-') => self.number(),
            Some(c) if c.is_ascii_digit() => self.number(),
            _ => self.word(),
        }
    }

    /// `true`, `false`, or `null`, consumed character by character.
    fn word(&mut self) -> Result<SchemaNode> {
        match self.scanner.ch {
            Some('t') => {
                self.expect_word("true")?;
                Ok(SchemaNode::Bool(true))
            }
            Some('f') => {
                self.expect_word("false")?;
                Ok(SchemaNode::Bool(false))
            }
            Some('n') => {
                self.expect_word("null")?;
                Ok(SchemaNode::Null)
            }
            Some(c) => Err(self.syntax(format!("Unexpected '{c}'"))),
            None => Err(self.syntax("Unexpected end of input")),
        }
    }

    fn expect_word(&mut self, word: &str) -> Result<()> {
        for c in word.chars() {
            self.scanner.next_expect(c)?;
        }
        Ok(())
    }

    /// Parse a number literal and classify it per the precision policy.
    fn number(&mut self) -> Result<SchemaNode> {
        let mut text = String::new();
        if self.scanner.ch == Some('-') {
            text.push('-');
            self.scanner.next_expect('-')?;
        }
        while let Some(c @ '0'..='9') = self.scanner.ch {
            text.push(c);
            self.scanner.next();
        }
        if self.scanner.ch == Some('.') {
            text.push('.');
            while let Some(c) = self.scanner.next() {
                if !c.is_ascii_digit() {
                    break;
                }
                text.push(c);
            }
        }
        if let Some(e @ ('e' | 'E')) = self.scanner.ch {
            text.push(e);
            self.scanner.next();
            if let Some(sign @ ('-' | '+')) = self.scanner.ch {
                text.push(sign);
                self.scanner.next();
            }
            while let Some(c @ '0'..='9') = self.scanner.ch {
                text.push(c);
                self.scanner.next();
            }
        }

        // Classification starts from the float value: a lone minus fails to
        // parse, and an overflowing exponent comes back infinite. Both are
        // bad numbers.
        let value: f64 = text.parse().unwrap_or(f64::NAN);
        if !value.is_finite() {
            return Err(self.syntax("Bad number"));
        }

        if self.options.store_as_string {
            return Ok(SchemaNode::NumericString(text));
        }

        let safe_integer = value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER as f64;
        let number = if safe_integer {
            if self.options.always_parse_as_big_int {
                Number::Big(BigInt::from(value as i64))
            } else {
                Number::Int(value as i64)
            }
        } else if text.contains(['.', 'e', 'E']) {
            // Fractional or exponent form beyond the safe range: the only
            // case where approximation is permitted.
            Number::Float(value)
        } else {
            // Pure integral digits beyond the safe range: reconstruct the
            // exact value from the source text.
            let big = text
                .parse::<BigInt>()
                .map_err(|_| self.syntax("Bad number"))?;
            Number::Big(big)
        };
        Ok(SchemaNode::Number(number))
    }

    /// Parse a string literal, returning its decoded text. The cursor ends
    /// just past the closing quote.
    ///
    /// Runs of literal characters between escapes are appended by slicing
    /// rather than char-by-char.
    fn string_text(&mut self) -> Result<String> {
        if self.scanner.ch != Some('"') {
            return Err(self.syntax("Bad string"));
        }
        let mut out = String::new();
        let mut run_start = self.scanner.pos;
        while let Some(c) = self.scanner.next() {
            match c {
                '"' => {
                    let run_end = self.scanner.pos - c.len_utf8();
                    out.push_str(&self.scanner.text[run_start..run_end]);
                    self.scanner.next();
                    return Ok(out);
                }
                '\\' => {
                    let run_end = self.scanner.pos - c.len_utf8();
                    out.push_str(&self.scanner.text[run_start..run_end]);
                    match self.scanner.next() {
                        Some('u') => self.unicode_escape(&mut out)?,
                        Some(e) => match short_unescape(e) {
                            Some(decoded) => out.push(decoded),
                            None => return Err(self.syntax("Bad string")),
                        },
                        None => break,
                    }
                    run_start = self.scanner.pos;
                }
                _ => {}
            }
        }
        Err(self.syntax("Bad string"))
    }

    /// Decode a `\uXXXX` escape (the `\u` is already consumed). A high
    /// surrogate followed immediately by another `\uXXXX` low surrogate
    /// combines into one scalar; an unpaired surrogate becomes U+FFFD.
    fn unicode_escape(&mut self, out: &mut String) -> Result<()> {
        let high = self.read_hex4()?;
        if (0xd800..=0xdbff).contains(&high) && self.scanner.rest().starts_with("\\u") {
            self.scanner.next();
            self.scanner.next();
            let low = self.read_hex4()?;
            if (0xdc00..=0xdfff).contains(&low) {
                let scalar =
                    0x10000 + ((u32::from(high) - 0xd800) << 10) + (u32::from(low) - 0xdc00);
                out.push(char::from_u32(scalar).unwrap_or(char::REPLACEMENT_CHARACTER));
            } else {
                out.push(char::REPLACEMENT_CHARACTER);
                push_code_unit(out, low);
            }
        } else {
            push_code_unit(out, high);
        }
        Ok(())
    }

    /// Read exactly four hex digits; anything else is a bad string.
    fn read_hex4(&mut self) -> Result<u16> {
        let mut value: u16 = 0;
        for _ in 0..4 {
            let digit = self.scanner.next().and_then(|c| c.to_digit(16));
            match digit {
                Some(d) => value = value * 16 + d as u16,
                None => return Err(self.syntax("Bad string")),
            }
        }
        Ok(value)
    }

    /// Parse an array value. The `[` is the current character on entry.
    fn array(&mut self) -> Result<SchemaNode> {
        let mut items = Vec::new();
        self.scanner.next_expect('[')?;
        self.white();
        if self.scanner.ch == Some(']') {
            self.scanner.next();
            return Ok(SchemaNode::Array(items));
        }
        while self.scanner.ch.is_some() {
            items.push(self.value()?);
            self.white();
            if self.scanner.ch == Some(']') {
                self.scanner.next();
                return Ok(SchemaNode::Array(items));
            }
            self.scanner.next_expect(',')?;
            self.white();
        }
        Err(self.syntax("Bad array"))
    }

    /// Parse an object value. The `{` is the current character on entry.
    ///
    /// For each key, in order: the strict duplicate check, then the
    /// prototype pattern, then the constructor pattern. `Ignore` still
    /// parses the value so the cursor stays correct.
    fn object(&mut self) -> Result<SchemaNode> {
        let mut fields: Vec<(String, SchemaNode)> = Vec::new();
        self.scanner.next_expect('{')?;
        self.white();
        if self.scanner.ch == Some('}') {
            self.scanner.next();
            return Ok(SchemaNode::Object(fields));
        }
        while self.scanner.ch.is_some() {
            let key = self.string_text()?;
            self.white();
            self.scanner.next_expect(':')?;

            if self.options.strict && fields.iter().any(|(existing, _)| *existing == key) {
                return Err(self.syntax(format!("Duplicate key \"{key}\"")));
            }

            if is_suspect(&key, SUSPECT_PROTO) {
                match self.options.proto_action {
                    SuspectAction::Error => {
                        return Err(self.security("Object contains forbidden prototype property"))
                    }
                    SuspectAction::Ignore => {
                        self.value()?;
                    }
                    SuspectAction::Preserve => {
                        let value = self.value()?;
                        insert_field(&mut fields, key, value);
                    }
                }
            } else if is_suspect(&key, SUSPECT_CONSTRUCTOR) {
                match self.options.constructor_action {
                    SuspectAction::Error => {
                        return Err(
                            self.security("Object contains forbidden constructor property")
                        )
                    }
                    SuspectAction::Ignore => {
                        self.value()?;
                    }
                    SuspectAction::Preserve => {
                        let value = self.value()?;
                        insert_field(&mut fields, key, value);
                    }
                }
            } else {
                let value = self.value()?;
                insert_field(&mut fields, key, value);
            }

            self.white();
            if self.scanner.ch == Some('}') {
                self.scanner.next();
                return Ok(SchemaNode::Object(fields));
            }
            self.scanner.next_expect(',')?;
            self.white();
        }
        Err(self.syntax("Bad object"))
    }
}

/// A duplicate key overwrites in place, keeping the key's original
/// position, matching conventional JSON-object semantics.
fn insert_field(fields: &mut Vec<(String, SchemaNode)>, key: String, value: SchemaNode) {
    if let Some(slot) = fields.iter_mut().find(|(existing, _)| *existing == key) {
        slot.1 = value;
    } else {
        fields.push((key, value));
    }
}

/// The decoded escape for the eight single-character escapes.
fn short_unescape(c: char) -> Option<char> {
    match c {
        '"' => Some('"'),
        '\\' => Some('\\'),
        '/' => Some('/'),
        'b' => Some('\u{0008}'),
        'f' => Some('\u{000c}'),
        'n' => Some('\n'),
        'r' => Some('\r'),
        't' => Some('\t'),
        _ => None,
    }
}

/// Push a single UTF-16 code unit; unpaired surrogates cannot live in a
/// Rust string and become U+FFFD.
fn push_code_unit(out: &mut String, unit: u16) {
    match char::from_u32(u32::from(unit)) {
        Some(c) => out.push(c),
        None => out.push(char::REPLACEMENT_CHARACTER),
    }
}

/// Forbidden-key patterns, after secure-json-parse / bourne.
const SUSPECT_PROTO: &str = "__proto__";
const SUSPECT_CONSTRUCTOR: &str = "constructor";

/// True if `key` contains `pattern` as a substring, where each pattern
/// character may appear either literally or spelled out as a `\uXXXX`
/// escape text in the decoded key (hex digits in either case).
fn is_suspect(key: &str, pattern: &str) -> bool {
    let chars: Vec<char> = key.chars().collect();
    (0..=chars.len()).any(|start| suspect_match_at(&chars, start, pattern))
}

fn suspect_match_at(key: &[char], mut i: usize, pattern: &str) -> bool {
    for want in pattern.chars() {
        if i < key.len() && key[i] == want {
            i += 1;
            continue;
        }
        if key.len() >= i + 6 && key[i] == '\\' && key[i + 1] == 'u' {
            let hex: String = key[i + 2..i + 6].iter().collect();
            if let Ok(code) = u32::from_str_radix(&hex, 16) {
                if char::from_u32(code) == Some(want) {
                    i += 6;
                    continue;
                }
            }
        }
        return false;
    }
    true
}
