//! Generic JSON serialization of an in-memory value tree.
//!
//! Mirrors conventional `stringify` semantics: an optional replacer (a
//! member transform function or an allow-list of object keys) and an
//! optional indentation unit. Schema-aware re-serialization lives in
//! [`crate::schema_stringify`]; this module needs no schema because the
//! value tree itself still carries exact numbers ([`Number::Big`]).

use crate::quote::quote;
use crate::types::{JsonValue, Number};

/// Indentation unit for pretty-printed output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Space {
    /// That many spaces per level, capped at 10.
    Count(usize),
    /// A literal unit string; only its first 10 characters are used.
    Text(String),
}

impl Space {
    /// Resolve the unit into the actual gap string.
    pub(crate) fn gap(&self) -> String {
        match self {
            Space::Count(n) => " ".repeat((*n).min(10)),
            Space::Text(s) => s.chars().take(10).collect(),
        }
    }
}

/// Member transform consulted while serializing.
pub enum Replacer<'a> {
    /// Called with each member's key (the empty string for the root, the
    /// decimal index for array elements) and value. Returning `None` drops
    /// the member: object keys are omitted, array slots render as `null`,
    /// and a dropped root yields `"null"`.
    Function(&'a mut dyn FnMut(&str, &JsonValue) -> Option<JsonValue>),
    /// Object keys to include, in this order. Arrays are unaffected.
    AllowList(&'a [&'a str]),
}

/// Serialize a value as JSON text.
///
/// ```rust
/// use bigjson_core::{stringify, JsonValue, Number, Space};
///
/// let value = JsonValue::Array(vec![
///     JsonValue::Number(Number::Int(1)),
///     JsonValue::String("two".to_string()),
/// ]);
/// assert_eq!(stringify(&value, None, None), r#"[1,"two"]"#);
/// assert_eq!(
///     stringify(&value, None, Some(Space::Count(2))),
///     "[\n  1,\n  \"two\"\n]"
/// );
/// ```
pub fn stringify(value: &JsonValue, replacer: Option<Replacer<'_>>, space: Option<Space>) -> String {
    let indent = space.as_ref().map(Space::gap).unwrap_or_default();
    let mut stringifier = Stringifier {
        indent,
        gap: String::new(),
        replacer,
    };
    stringifier
        .walk("", value)
        .unwrap_or_else(|| "null".to_string())
}

struct Stringifier<'a> {
    /// One level's worth of indentation.
    indent: String,
    /// Accumulated indentation at the current depth.
    gap: String,
    replacer: Option<Replacer<'a>>,
}

impl Stringifier<'_> {
    /// Produce the text for one member, or `None` if the replacer drops it.
    fn walk(&mut self, key: &str, value: &JsonValue) -> Option<String> {
        let replaced;
        let value = match self.replacer.as_mut() {
            Some(Replacer::Function(transform)) => match transform(key, value) {
                Some(v) => {
                    replaced = v;
                    &replaced
                }
                None => return None,
            },
            _ => value,
        };

        Some(match value {
            JsonValue::Null => "null".to_string(),
            JsonValue::Bool(b) => b.to_string(),
            JsonValue::Number(n) => format_number(n),
            JsonValue::String(s) => quote(s),
            JsonValue::Array(items) => self.array(items),
            JsonValue::Object(fields) => self.object(fields),
        })
    }

    fn array(&mut self, items: &[JsonValue]) -> String {
        let mind = std::mem::take(&mut self.gap);
        self.gap = format!("{mind}{}", self.indent);

        let partial: Vec<String> = items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                // Dropped elements keep their slot as null.
                self.walk(&index.to_string(), item)
                    .unwrap_or_else(|| "null".to_string())
            })
            .collect();

        let out = if partial.is_empty() {
            "[]".to_string()
        } else if self.gap.is_empty() {
            format!("[{}]", partial.join(","))
        } else {
            format!(
                "[\n{}{}\n{}]",
                self.gap,
                partial.join(&format!(",\n{}", self.gap)),
                mind
            )
        };
        self.gap = mind;
        out
    }

    fn object(&mut self, fields: &[(String, JsonValue)]) -> String {
        let mind = std::mem::take(&mut self.gap);
        self.gap = format!("{mind}{}", self.indent);
        let colon = if self.gap.is_empty() { ":" } else { ": " };

        let allow: Option<&[&str]> = match &self.replacer {
            Some(Replacer::AllowList(keys)) => Some(*keys),
            _ => None,
        };

        let mut partial = Vec::new();
        match allow {
            Some(keys) => {
                for want in keys {
                    if let Some((key, value)) = fields.iter().find(|(key, _)| key == want) {
                        if let Some(text) = self.walk(key, value) {
                            partial.push(format!("{}{colon}{text}", quote(key)));
                        }
                    }
                }
            }
            None => {
                for (key, value) in fields {
                    if let Some(text) = self.walk(key, value) {
                        partial.push(format!("{}{colon}{text}", quote(key)));
                    }
                }
            }
        }

        let out = if partial.is_empty() {
            "{}".to_string()
        } else if self.gap.is_empty() {
            format!("{{{}}}", partial.join(","))
        } else {
            format!(
                "{{\n{}{}\n{}}}",
                self.gap,
                partial.join(&format!(",\n{}", self.gap)),
                mind
            )
        };
        self.gap = mind;
        out
    }
}

/// Render a number as JSON text.
///
/// Integral floats print without a fractional part, `-0` normalizes to `0`,
/// and non-finite floats render as `null` (JSON numbers must be finite).
pub(crate) fn format_number(n: &Number) -> String {
    match n {
        Number::Int(i) => i.to_string(),
        Number::Big(big) => big.to_string(),
        Number::Float(f) => {
            if f.is_nan() || f.is_infinite() {
                return "null".to_string();
            }
            let f = if *f == 0.0 { 0.0 } else { *f };
            if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
                return (f as i64).to_string();
            }
            format!("{f}")
        }
    }
}
