//! Value and schema trees.
//!
//! A parse produces two trees: a [`JsonValue`] (the plain data, what most
//! callers want) and a [`SchemaNode`] (the same shape annotated with each
//! node's original JSON type). The schema is what lets the serializers in
//! [`crate::schema_stringify`] re-emit a numeral that was kept as a string
//! back out as a bare number instead of a quoted string.

use num_bigint::BigInt;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Serialize, Serializer};

/// The six JSON type tags, as they appear in a serialized schema
/// (`"string"`, `"number"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonType {
    String,
    Number,
    Boolean,
    Null,
    Object,
    Array,
}

/// A JSON number in one of three storage forms. Integers within the
/// double-precision safe range store as `Int`; integral numerals beyond it
/// store as `Big`, reconstructed exactly from the source digits; only
/// numerals with a fractional part or exponent ever take the (possibly
/// approximate) `Float` form.
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
    Big(BigInt),
}

/// A plain JSON document value. Objects keep insertion order via
/// `Vec<(String, JsonValue)>` rather than a hash map, so re-serialization
/// preserves source key order.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<JsonValue>),
    /// Key-value pairs in insertion order.
    Object(Vec<(String, JsonValue)>),
}

/// A parsed value annotated with its storage type and its original JSON
/// source type.
///
/// The two tags differ in exactly one case: [`SchemaNode::NumericString`]
/// holds a number literal kept verbatim as text (`storeAsString` parsing),
/// so its storage type is `string` while its origin type is `number`. Every
/// other variant has matching tags. The variant set makes any other
/// combination unrepresentable.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    /// A number literal preserved as its exact source text.
    NumericString(String),
    Array(Vec<SchemaNode>),
    /// Key to child node, in source key order.
    Object(Vec<(String, SchemaNode)>),
}

impl SchemaNode {
    /// The storage type tag: how the value is actually held in memory.
    pub fn json_type(&self) -> JsonType {
        match self {
            SchemaNode::Null => JsonType::Null,
            SchemaNode::Bool(_) => JsonType::Boolean,
            SchemaNode::Number(_) => JsonType::Number,
            SchemaNode::String(_) | SchemaNode::NumericString(_) => JsonType::String,
            SchemaNode::Array(_) => JsonType::Array,
            SchemaNode::Object(_) => JsonType::Object,
        }
    }

    /// The origin type tag: the literal type as written in the JSON source.
    pub fn origin_type(&self) -> JsonType {
        match self {
            SchemaNode::NumericString(_) => JsonType::Number,
            other => other.json_type(),
        }
    }

    /// Strip the schema down to a plain value tree.
    ///
    /// The result is structurally isomorphic to the schema: same container
    /// shapes, same key order, scalar payloads carried over directly. A
    /// [`SchemaNode::NumericString`] extracts to its text, which is why the
    /// plain tree alone is not enough to re-serialize big numerals; pair it
    /// with the schema via
    /// [`stringify_with_schema`](crate::stringify_with_schema).
    pub fn extract(&self) -> JsonValue {
        match self {
            SchemaNode::Null => JsonValue::Null,
            SchemaNode::Bool(b) => JsonValue::Bool(*b),
            SchemaNode::Number(n) => JsonValue::Number(n.clone()),
            SchemaNode::String(s) | SchemaNode::NumericString(s) => JsonValue::String(s.clone()),
            SchemaNode::Array(items) => {
                JsonValue::Array(items.iter().map(SchemaNode::extract).collect())
            }
            SchemaNode::Object(fields) => JsonValue::Object(
                fields
                    .iter()
                    .map(|(key, node)| (key.clone(), node.extract()))
                    .collect(),
            ),
        }
    }
}

/// Adapter serializing ordered key-value pairs as a JSON map.
struct Fields<'a, T>(&'a [(String, T)]);

impl<T: Serialize> Serialize for Fields<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Number::Int(i) => serializer.serialize_i64(*i),
            Number::Float(f) => serializer.serialize_f64(*f),
            // The serde data model has no arbitrary-precision integer;
            // values beyond u64 fall back to their decimal text.
            Number::Big(big) => {
                if let Ok(i) = i64::try_from(big) {
                    serializer.serialize_i64(i)
                } else if let Ok(u) = u64::try_from(big) {
                    serializer.serialize_u64(u)
                } else {
                    serializer.collect_str(big)
                }
            }
        }
    }
}

impl Serialize for JsonValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            JsonValue::Null => serializer.serialize_unit(),
            JsonValue::Bool(b) => serializer.serialize_bool(*b),
            JsonValue::Number(n) => n.serialize(serializer),
            JsonValue::String(s) => serializer.serialize_str(s),
            JsonValue::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            JsonValue::Object(fields) => Fields(fields).serialize(serializer),
        }
    }
}

/// Serializes as the canonical schema form: a `{"type", "originType",
/// "value"}` map at every node, with container children serialized
/// recursively as nested schema nodes.
impl Serialize for SchemaNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("type", &self.json_type())?;
        map.serialize_entry("originType", &self.origin_type())?;
        match self {
            SchemaNode::Null => map.serialize_entry("value", &())?,
            SchemaNode::Bool(b) => map.serialize_entry("value", b)?,
            SchemaNode::Number(n) => map.serialize_entry("value", n)?,
            SchemaNode::String(s) | SchemaNode::NumericString(s) => {
                map.serialize_entry("value", s)?
            }
            SchemaNode::Array(items) => map.serialize_entry("value", items)?,
            SchemaNode::Object(fields) => map.serialize_entry("value", &Fields(fields))?,
        }
        map.end()
    }
}
