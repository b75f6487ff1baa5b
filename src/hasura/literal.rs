//! Serialization of field values into GraphQL literals.
//!
//! Every literal embedded in a query is produced here; callers never splice
//! raw strings into query text.

use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Str(String),
    Bool(bool),
    Int(i64),
    List(Vec<String>),
}

impl FieldValue {
    pub fn to_literal(&self) -> String {
        match self {
            FieldValue::Str(s) => format!("\"{}\"", escape(s)),
            FieldValue::Bool(b) => b.to_string(),
            FieldValue::Int(n) => n.to_string(),
            FieldValue::List(items) => format!("\"{}\"", escape(&array_text(items))),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Str(s) => Value::from(s.as_str()),
            FieldValue::Bool(b) => Value::from(*b),
            FieldValue::Int(n) => Value::from(*n),
            FieldValue::List(items) => Value::from(items.clone()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Str(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Str(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        FieldValue::List(items)
    }
}

/// Escapes string content so it cannot terminate the enclosing literal.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            other => out.push(other),
        }
    }
    out
}

/// Postgres array text, `{a,b}`. Elements that would split or close the array
/// are double-quoted, with backslash and `"` escaped.
fn array_text(items: &[String]) -> String {
    let elements = items
        .iter()
        .map(|item| {
            if needs_quoting(item) {
                let mut quoted = String::with_capacity(item.len() + 2);
                quoted.push('"');
                for c in item.chars() {
                    if c == '\\' || c == '"' {
                        quoted.push('\\');
                    }
                    quoted.push(c);
                }
                quoted.push('"');
                quoted
            } else {
                item.clone()
            }
        })
        .collect::<Vec<_>>();
    format!("{{{}}}", elements.join(","))
}

fn needs_quoting(item: &str) -> bool {
    item.is_empty()
        || item.eq_ignore_ascii_case("null")
        || item
            .chars()
            .any(|c| matches!(c, ',' | '{' | '}' | '"' | '\\') || c.is_whitespace())
}

/// Renders `key: literal` pairs as the inside of a GraphQL input object.
pub fn object_fields(fields: &[(&str, FieldValue)]) -> String {
    fields
        .iter()
        .map(|(k, v)| format!("{}: {}", k, v.to_literal()))
        .collect::<Vec<_>>()
        .join(", ")
}
