use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

use crate::error::CodegenError;

static SHAPE_ID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*#[A-Za-z_][A-Za-z0-9_]*(\$[A-Za-z_][A-Za-z0-9_]*)?$",
    )
    .expect("shape id pattern is valid")
});

/// Absolute shape identifier: `namespace#Name` with an optional `$member`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShapeId(String);

impl ShapeId {
    /// Parse and validate an absolute shape id.
    pub fn parse(value: &str) -> Result<Self, CodegenError> {
        if SHAPE_ID_RE.is_match(value) {
            Ok(ShapeId(value.to_string()))
        } else {
            Err(CodegenError::malformed(
                value,
                "expected an absolute shape id of the form namespace#Name",
            ))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn namespace(&self) -> &str {
        self.0.split('#').next().unwrap_or_default()
    }

    /// Shape name without namespace or member.
    pub fn name(&self) -> &str {
        let rest = self.0.split('#').nth(1).unwrap_or_default();
        rest.split('$').next().unwrap_or_default()
    }

    pub fn member(&self) -> Option<&str> {
        self.0.split('$').nth(1)
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ShapeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ShapeId {
    type Error = CodegenError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ShapeId::parse(&value)
    }
}

impl From<ShapeId> for String {
    fn from(id: ShapeId) -> Self {
        id.0
    }
}
