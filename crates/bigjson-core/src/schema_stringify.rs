//! Schema-directed serialization.
//!
//! These serializers re-render a plain value back to JSON text while
//! consulting a parallel hint tree, walked in lockstep with the value. The
//! hint answers exactly one question: is this string leaf really a numeral
//! that must go back out bare, or an actual string to be quoted? Two hint
//! shapes are supported (the parser's own [`SchemaNode`] tree, and an
//! externally authored JSON-Schema-like [`SchemaHint`] tree) so the
//! precision round-trip works whichever one a caller holds.
//!
//! # Example
//!
//! ```rust
//! use bigjson_core::{parse, stringify_with_schema, ParseOptions};
//!
//! let options = ParseOptions { store_as_string: true, ..Default::default() };
//! let parsed = parse(r#"{"id":123456989987654321}"#, &options).unwrap();
//! // The id survives as its exact digits, not a rounded double.
//! let out = stringify_with_schema(&parsed.data, &parsed.data_schema, None);
//! assert_eq!(out, r#"{"id":123456989987654321}"#);
//! ```

use std::collections::HashMap;

use serde::Deserialize;

use crate::quote::quote;
use crate::stringify::{format_number, Space};
use crate::types::{JsonType, JsonValue, SchemaNode};

/// An externally supplied JSON-Schema-like type-hint tree: only `type`,
/// `items`, and `properties` are consulted, and only to decide whether a
/// string leaf is emitted bare. This is *not* schema validation.
///
/// Deserializes from an ordinary JSON Schema document; unrelated keywords
/// are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SchemaHint {
    /// Declared type of this node; `number` on a string leaf means the
    /// string holds a numeral.
    #[serde(rename = "type")]
    pub kind: Option<JsonType>,
    /// Hint applied to every element of an array value.
    pub items: Option<Box<SchemaHint>>,
    /// Hints for an object value's members, by key.
    pub properties: HashMap<String, SchemaHint>,
}

/// Hint-tree addressing used by the shared walk. The two hint shapes differ
/// only in how a child's hint is found and in how "this string is a
/// numeral" is declared.
trait Hints: Copy {
    fn numeric_origin(&self) -> bool;
    fn item(&self, index: usize) -> Option<Self>;
    fn property(&self, key: &str) -> Option<Self>;
}

impl Hints for &SchemaNode {
    fn numeric_origin(&self) -> bool {
        matches!(self, SchemaNode::NumericString(_))
    }

    fn item(&self, index: usize) -> Option<Self> {
        match *self {
            SchemaNode::Array(items) => items.get(index),
            _ => None,
        }
    }

    fn property(&self, key: &str) -> Option<Self> {
        match *self {
            SchemaNode::Object(fields) => fields
                .iter()
                .find(|(existing, _)| existing == key)
                .map(|(_, node)| node),
            _ => None,
        }
    }
}

impl Hints for &SchemaHint {
    fn numeric_origin(&self) -> bool {
        self.kind == Some(JsonType::Number)
    }

    fn item(&self, _index: usize) -> Option<Self> {
        self.items.as_deref()
    }

    fn property(&self, key: &str) -> Option<Self> {
        self.properties.get(key)
    }
}

/// Re-render a plain value using the schema the parser produced for it.
///
/// Paired with [`ParseOptions::store_as_string`](crate::ParseOptions), this
/// reproduces big numerals exactly: the value tree holds them as strings,
/// the schema remembers they were numbers, and they are emitted bare.
pub fn stringify_with_schema(
    value: &JsonValue,
    schema: &SchemaNode,
    space: Option<Space>,
) -> String {
    let gap = space.as_ref().map(Space::gap).unwrap_or_default();
    render(value, Some(schema), &gap, 0)
}

/// Re-render a plain value using an external [`SchemaHint`] tree: a string
/// leaf whose hint declares `type: number` is emitted bare.
pub fn stringify_with_json_schema_hints(
    value: &JsonValue,
    hints: &SchemaHint,
    space: Option<Space>,
) -> String {
    let gap = space.as_ref().map(Space::gap).unwrap_or_default();
    render(value, Some(hints), &gap, 0)
}

/// The walk shared by both variants. A missing or mismatched hint degrades
/// to unhinted rendering (strings quoted) rather than failing. Indentation
/// is the unit repeated `2 × depth` times, doubling per level.
fn render<H: Hints>(value: &JsonValue, hint: Option<H>, gap: &str, level: usize) -> String {
    match value {
        JsonValue::String(s) => {
            if hint.is_some_and(|h| h.numeric_origin()) {
                s.clone()
            } else {
                quote(s)
            }
        }
        JsonValue::Null => "null".to_string(),
        JsonValue::Bool(b) => b.to_string(),
        JsonValue::Number(n) => format_number(n),
        JsonValue::Array(items) => {
            if items.is_empty() {
                return "[]".to_string();
            }
            let current = gap.repeat(level * 2);
            let next = gap.repeat((level + 1) * 2);
            let mut out = String::from(if gap.is_empty() { "[" } else { "[\n" });
            for (index, item) in items.iter().enumerate() {
                let child = render(item, hint.and_then(|h| h.item(index)), gap, level + 1);
                out.push_str(&next);
                out.push_str(&child);
                if index + 1 != items.len() {
                    out.push_str(if gap.is_empty() { "," } else { ",\n" });
                } else if !gap.is_empty() {
                    out.push('\n');
                }
            }
            out.push_str(&current);
            out.push(']');
            out
        }
        JsonValue::Object(fields) => {
            if fields.is_empty() {
                return "{}".to_string();
            }
            let current = gap.repeat(level * 2);
            let next = gap.repeat((level + 1) * 2);
            let space_after_colon = if gap.is_empty() { "" } else { " " };
            let mut out = String::from(if gap.is_empty() { "{" } else { "{\n" });
            for (index, (key, item)) in fields.iter().enumerate() {
                let child = render(item, hint.and_then(|h| h.property(key)), gap, level + 1);
                out.push_str(&next);
                out.push_str(&quote(key));
                out.push(':');
                out.push_str(space_after_colon);
                out.push_str(&child);
                if index + 1 != fields.len() {
                    out.push_str(if gap.is_empty() { "," } else { ",\n" });
                } else if !gap.is_empty() {
                    out.push('\n');
                }
            }
            out.push_str(&current);
            out.push('}');
            out
        }
    }
}

/// Render a schema tree directly, with no separate plain value, at a fixed
/// two-space-per-level indentation. The same bare-numeral rule applies:
/// a [`SchemaNode::NumericString`] leaf is emitted unquoted.
pub fn stringify_node(node: &SchemaNode) -> String {
    render_node(node, 0)
}

fn render_node(node: &SchemaNode, level: usize) -> String {
    match node {
        SchemaNode::NumericString(text) => text.clone(),
        SchemaNode::String(s) => quote(s),
        SchemaNode::Null => "null".to_string(),
        SchemaNode::Bool(b) => b.to_string(),
        SchemaNode::Number(n) => format_number(n),
        SchemaNode::Array(items) => {
            if items.is_empty() {
                return "[]".to_string();
            }
            let current = " ".repeat(level * 2);
            let next = " ".repeat((level + 1) * 2);
            let mut out = String::from("[\n");
            for (index, item) in items.iter().enumerate() {
                out.push_str(&next);
                out.push_str(&render_node(item, level + 1));
                out.push_str(if index + 1 != items.len() { ",\n" } else { "\n" });
            }
            out.push_str(&current);
            out.push(']');
            out
        }
        SchemaNode::Object(fields) => {
            if fields.is_empty() {
                return "{}".to_string();
            }
            let current = " ".repeat(level * 2);
            let next = " ".repeat((level + 1) * 2);
            let mut out = String::from("{\n");
            for (index, (key, item)) in fields.iter().enumerate() {
                out.push_str(&next);
                out.push_str(&quote(key));
                out.push_str(": ");
                out.push_str(&render_node(item, level + 1));
                out.push_str(if index + 1 != fields.len() { ",\n" } else { "\n" });
            }
            out.push_str(&current);
            out.push('}');
            out
        }
    }
}
