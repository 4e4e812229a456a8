//! # Endpoint Parameters
//!
//! Lowers the parameter definitions of an `@endpointRuleSet` into typed
//! TypeScript declarations.
//!
//! A definition node such as
//!
//! ```json
//! { "type": "Boolean", "default": false, "builtIn": "AWS::UseDualStack" }
//! ```
//!
//! compiles into a [`ParameterDescriptor`] which renders
//!
//! ```text
//! useDualstack?: boolean;
//! useDualstack: options.useDualstack ?? false,
//! ```
//!
//! The declaration line feeds an interface body and the assignment feeds the
//! object literal returned by `resolveClientEndpointParameters`. Both are
//! fragments of a surrounding template, not standalone files.

mod literal;
mod parameter;

pub use literal::{object_literal, RenderedLiteral};
pub use parameter::{DeclarationMode, ParameterDescriptor, TsType, ENDPOINT_UNION};
