use serde_json::{Map, Value};
use std::fmt;

use super::literal::RenderedLiteral;
use crate::error::CodegenError;

/// Type rendered for the parameter named `endpoint`, regardless of its
/// declared type.
pub const ENDPOINT_UNION: &str =
    "string | Provider<string> | Endpoint | Provider<Endpoint> | EndpointV2 | Provider<EndpointV2>";

/// Primitive type of an endpoint parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TsType {
    String,
    Boolean,
}

impl TsType {
    /// Map a declared rule-set type. Only `String` and `Boolean` are accepted.
    pub fn from_declared(location: &str, declared: &str) -> Result<Self, CodegenError> {
        match declared {
            "String" => Ok(TsType::String),
            "Boolean" => Ok(TsType::Boolean),
            other => Err(CodegenError::UnhandledVariant {
                location: location.to_string(),
                kind: "endpoint parameter type",
                value: other.to_string(),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TsType::String => "string",
            TsType::Boolean => "boolean",
        }
    }
}

impl fmt::Display for TsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a declaration line is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationMode {
    /// Plain `EndpointParameters` member.
    Standard,
    /// Client input member that accepts either a value or a provider of one.
    ClientContext,
}

/// Compiled, render-ready form of one rule-set parameter definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDescriptor {
    name: String,
    ts_type: TsType,
    required: bool,
    default: Option<RenderedLiteral>,
    built_in: bool,
}

impl ParameterDescriptor {
    /// Compile the definition node of parameter `name`.
    ///
    /// # Errors
    ///
    /// - [`CodegenError::MalformedInput`] if the node is not an object, a
    ///   member has the wrong JSON kind, or `default` does not match the type
    /// - [`CodegenError::UnhandledVariant`] if `type` is not `String` or `Boolean`
    pub fn compile(name: &str, node: &Value) -> Result<Self, CodegenError> {
        let location = format!("endpoint parameter `{name}`");
        let obj = node
            .as_object()
            .ok_or_else(|| CodegenError::malformed(&location, "param node is not object node"))?;

        let required = match obj.get("required") {
            None => false,
            Some(Value::Bool(b)) => *b,
            Some(_) => {
                return Err(CodegenError::malformed(&location, "`required` must be a boolean"))
            }
        };

        let ts_type = match obj.get("type") {
            None => TsType::String,
            Some(Value::String(declared)) => TsType::from_declared(&location, declared)?,
            Some(_) => return Err(CodegenError::malformed(&location, "`type` must be a string")),
        };

        let default = match (obj.get("default"), ts_type) {
            (None, _) => None,
            (Some(Value::String(s)), TsType::String) => Some(RenderedLiteral::String(s.clone())),
            (Some(Value::Bool(b)), TsType::Boolean) => Some(RenderedLiteral::Boolean(*b)),
            (Some(other), expected) => {
                return Err(CodegenError::malformed(
                    &location,
                    format!("default {other} does not match declared type {expected}"),
                ))
            }
        };

        Ok(ParameterDescriptor {
            name: name.to_string(),
            ts_type,
            required,
            default,
            built_in: obj.contains_key("builtIn"),
        })
    }

    /// Compile every parameter of a rule set, in key order.
    pub fn compile_all(parameters: &Map<String, Value>) -> Result<Vec<Self>, CodegenError> {
        parameters
            .iter()
            .map(|(name, node)| Self::compile(name, node))
            .collect()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ts_type(&self) -> TsType {
        self.ts_type
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn default_literal(&self) -> Option<&RenderedLiteral> {
        self.default.as_ref()
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    pub fn is_built_in(&self) -> bool {
        self.built_in
    }

    pub fn name_and_type(&self) -> (&str, &'static str) {
        (&self.name, self.ts_type.as_str())
    }

    /// Interface member line, e.g. `region?: string;`.
    pub fn declaration(&self, mode: DeclarationMode) -> String {
        let context = mode == DeclarationMode::ClientContext;
        let marker = if !self.required || self.has_default() || context {
            "?"
        } else {
            ""
        };
        let ty = if self.name == "endpoint" {
            ENDPOINT_UNION.to_string()
        } else if context {
            format!("{t}|Provider<{t}>", t = self.ts_type)
        } else {
            self.ts_type.to_string()
        };
        format!("{}{marker}: {ty};", self.name)
    }

    /// Default assignment for the resolver object literal, e.g.
    /// `useDualstack: options.useDualstack ?? false,`. `None` when the
    /// parameter has no default.
    pub fn default_assignment(&self) -> Option<String> {
        self.default
            .as_ref()
            .map(|literal| format!("{n}: options.{n} ?? {literal},", n = self.name))
    }
}
