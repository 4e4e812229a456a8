//! # Model Module
//!
//! Read-only service graph loaded from a Smithy JSON AST document.
//!
//! ## Overview
//!
//! The generator only needs a slice of the full Smithy semantic model:
//!
//! - **Services** with their directly bound operations and resources
//! - **Resources** with lifecycle, instance and collection operations
//! - **Operations** and the traits applied to them
//! - **Auth definitions** (built-in auth traits plus any trait shape
//!   carrying `@authDefinition`)
//!
//! Everything else in the AST is ignored. References between shapes are
//! resolved at load time so that a loaded [`Model`] never dangles.
//!
//! ## Queries
//!
//! - [`Model::effective_auth_schemes`] / [`Model::effective_operation_auth_schemes`]
//! - [`Model::contained_operations`]
//!
//! All queries are pure and recompute their answer on every call.
//!
//! ## Example
//!
//! ```rust,ignore
//! use tscodegen::model::load_model;
//!
//! let model = load_model("weather.json".as_ref())?;
//! let service = model.service("example.weather#Weather").unwrap();
//! for op in model.contained_operations(service) {
//!     println!("{} -> {:?}", op.id, model.effective_operation_auth_schemes(service, op));
//! }
//! ```

mod index;
mod load;
mod shape_id;
mod shapes;
pub mod traits;

pub use index::*;
pub use load::*;
pub use shape_id::*;
pub use shapes::*;
pub use traits::{
    ApiKeyLocation, ClientContextParam, EndpointRuleSet, HttpApiKeyAuthTrait, Traits,
};
