use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// A literal value ready to be spliced into generated TypeScript.
///
/// Strings are quoted verbatim (no escaping), booleans render as the bare
/// `true` / `false` keywords.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(untagged)]
pub enum RenderedLiteral {
    String(String),
    Boolean(bool),
}

impl RenderedLiteral {
    pub fn string(value: impl Into<String>) -> Self {
        RenderedLiteral::String(value.into())
    }
}

impl fmt::Display for RenderedLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderedLiteral::String(s) => write!(f, "\"{s}\""),
            RenderedLiteral::Boolean(true) => f.write_str("true"),
            RenderedLiteral::Boolean(false) => f.write_str("false"),
        }
    }
}

/// Render a parameter map as a TypeScript object literal:
/// `{ in: "header", name: "x-api-key" }`. An empty map renders as `{}`.
pub fn object_literal(params: &BTreeMap<String, RenderedLiteral>) -> String {
    if params.is_empty() {
        return "{}".to_string();
    }
    let entries = params
        .iter()
        .map(|(key, value)| format!("{key}: {value}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{{ {entries} }}")
}
