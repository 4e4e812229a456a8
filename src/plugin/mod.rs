//! # Runtime Client Plugins
//!
//! A runtime client plugin is a registration record telling the generator
//! what a feature contributes to a generated client:
//!
//! - a **client config** triple (input config interface, resolved config
//!   interface, resolve function) mixed into the client's configuration
//! - a **plugin function** whose call is added to a middleware stack
//! - a **service predicate** gating the client-level contribution
//! - an **operation predicate** gating per-operation middleware
//!
//! ## Predicates
//!
//! | Predicate | Absent means |
//! |-----------|--------------|
//! | service   | always matches |
//! | operation | never matches an individual operation |
//!
//! A plugin function registered without an operation predicate is treated
//! as client-wide middleware: it is added once to the client stack and its
//! params supplier is called without an operation.
//!
//! ## Composition
//!
//! [`compose`] evaluates every registered plugin against a service and its
//! contained operations and returns a [`CompositionResult`]. The result is
//! ordered deterministically so that two runs over the same model and
//! registry produce the same artifacts.
//!
//! ```rust,ignore
//! let plugins: Vec<RuntimeClientPlugin> = integrations
//!     .iter()
//!     .flat_map(|i| i.client_plugins())
//!     .collect();
//! let composed = compose(&model, service, &plugins)?;
//! for config in composed.client_configs() {
//!     println!("{}", config.resolve_function);
//! }
//! ```

mod compose;
mod predicate;
mod runtime_plugin;
#[cfg(test)]
mod tests;

pub use compose::{compose, ClientContribution, CompositionResult, MiddlewareInvocation};
pub use predicate::{client_plugins, operation_plugins};
pub(crate) use runtime_plugin::relative_module;
pub use runtime_plugin::{
    ClientConfig, OperationPredicate, ParamsSupplier, PluginFunction, PluginParams,
    RuntimeClientPlugin, RuntimeClientPluginBuilder, ServicePredicate, Symbol,
};
