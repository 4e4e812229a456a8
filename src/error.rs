//! Error types for a generation pass.
//!
//! Every variant is fatal for the pass that raised it. The CLI and file
//! boundaries wrap these in `anyhow::Error` with additional context.

use thiserror::Error;

use crate::model::ShapeId;

/// Errors raised while reading the model, composing plugins or rendering
/// generated artifacts.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// A declaration node failed structural expectations.
    #[error("malformed input at {location}: {message}")]
    MalformedInput {
        /// Where the problem was found (shape id, trait, parameter name)
        location: String,
        /// What was expected
        message: String,
    },

    /// A value outside a closed set of recognized variants.
    #[error("unhandled {kind} `{value}` at {location}")]
    UnhandledVariant {
        /// Where the value was found
        location: String,
        /// What kind of value this is (e.g. "endpoint parameter type")
        kind: &'static str,
        /// The rejected value
        value: String,
    },

    /// A plugin's predicate and its parameter supplier disagree.
    #[error("plugin `{plugin}` invariant violated ({scope}): {message}")]
    InvariantViolation {
        /// Plugin name
        plugin: String,
        /// Service and, when relevant, operation the plugin was evaluated for
        scope: String,
        /// What went wrong
        message: String,
    },

    /// A presence-checked trait accessor found nothing.
    #[error("shape {shape} does not have trait {trait_id}")]
    MissingTrait {
        /// Shape that was queried
        shape: ShapeId,
        /// Trait that was expected
        trait_id: &'static str,
    },

    /// The linter reported error-level issues, so generation did not start.
    #[error("model has {0} lint error(s); run `lint` for details")]
    LintFailed(usize),

    /// A static resource is not bundled.
    #[error("resource not found: {0}")]
    MissingResource(String),

    /// Template rendering failed.
    #[error("failed to render template: {0}")]
    Template(#[from] askama::Error),
}

impl CodegenError {
    /// Shorthand for [`CodegenError::MalformedInput`].
    pub fn malformed(location: impl Into<String>, message: impl Into<String>) -> Self {
        CodegenError::MalformedInput {
            location: location.into(),
            message: message.into(),
        }
    }

    /// Wrap a [`CodegenError::MissingTrait`] raised by a params supplier into
    /// an invariant violation carrying the plugin's context. Other errors
    /// pass through unchanged.
    pub(crate) fn into_invariant_violation(
        self,
        plugin: &str,
        service: &ShapeId,
        operation: Option<&ShapeId>,
    ) -> Self {
        match self {
            CodegenError::MissingTrait { shape, trait_id } => {
                let scope = match operation {
                    Some(op) => format!("service {service}, operation {op}"),
                    None => format!("service {service}"),
                };
                CodegenError::InvariantViolation {
                    plugin: plugin.to_string(),
                    scope,
                    message: format!(
                        "predicate matched but trait {trait_id} is absent on {shape}"
                    ),
                }
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_trait_becomes_invariant_violation() {
        let service = ShapeId::parse("example#Svc").unwrap();
        let op = ShapeId::parse("example#GetThing").unwrap();
        let err = CodegenError::MissingTrait {
            shape: service.clone(),
            trait_id: "smithy.api#httpApiKeyAuth",
        }
        .into_invariant_violation("HttpApiKeyAuth", &service, Some(&op));

        let msg = err.to_string();
        assert!(matches!(err, CodegenError::InvariantViolation { .. }));
        assert!(msg.contains("HttpApiKeyAuth"));
        assert!(msg.contains("example#GetThing"));
        assert!(msg.contains("smithy.api#httpApiKeyAuth"));
    }

    #[test]
    fn test_other_errors_pass_through() {
        let service = ShapeId::parse("example#Svc").unwrap();
        let err = CodegenError::malformed("x", "y").into_invariant_violation("P", &service, None);
        assert!(matches!(err, CodegenError::MalformedInput { .. }));
    }
}
