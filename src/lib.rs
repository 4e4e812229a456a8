//! # tscodegen
//!
//! **tscodegen** generates TypeScript client packages from
//! [Smithy](https://smithy.io) models in their JSON AST form.
//!
//! ## Overview
//!
//! The crate reads a service graph, works out which auth schemes and
//! runtime plugins apply to the service and to each of its operations, and
//! renders a client, one command per operation, endpoint parameter
//! interfaces and the supporting middleware files.
//!
//! ## Architecture
//!
//! - **[`model`]** - Smithy JSON AST loading, typed traits, effective auth and contained operations
//! - **[`endpoint`]** - Compiles endpoint rule set parameters into TypeScript declarations
//! - **[`auth`]** - Decides whether an auth scheme is live for a service or an operation
//! - **[`plugin`]** - Runtime client plugin registrations, their predicates and composition
//! - **[`integration`]** - Features that register plugins and write extra files
//! - **[`generator`]** - The generation pass, askama templates and the staged file writer
//! - **[`linter`]** - Model checks run before generation
//! - **[`cli`]** - `tscodegen-gen` command line
//! - **[`logging`]** - `tracing` subscriber setup
//!
//! ### Generation Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant CLI as CLI<br/>(tscodegen-gen)
//!     participant Model as model::load_model
//!     participant Lint as linter
//!     participant Plugin as plugin::compose
//!     participant Gen as generator
//!     participant FS as File System
//!
//!     CLI->>Model: load_model("weather.json")
//!     Model-->>CLI: Model
//!     CLI->>Gen: generate(&model, &settings, integrations)
//!     Gen->>Lint: lint_service(&model, service)
//!     Gen->>Plugin: compose(&model, service, plugins)
//!     Plugin-->>Gen: CompositionResult
//!     Gen->>Gen: render client, commands, index
//!     Gen->>Gen: integrations customize
//!     Gen-->>CLI: WriterDelegator
//!     CLI->>FS: commit(output)
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! cargo run --bin tscodegen-gen -- generate \
//!     --model weather.json \
//!     --service example.weather#Weather \
//!     --output out/weather
//! ```
//!
//! ## Error Handling
//!
//! Library operations return [`CodegenError`]. Every error is fatal for the
//! pass that raised it, and a failed pass writes nothing. File and CLI
//! boundaries use `anyhow` with context.

pub mod auth;
pub mod cli;
pub mod endpoint;
pub mod error;
pub mod generator;
pub mod integration;
pub mod linter;
pub mod logging;
pub mod model;
pub mod plugin;

pub use error::CodegenError;
pub use generator::{generate, CodegenSettings, EmbeddedResources, WriterDelegator};
pub use model::{load_model, Model, ShapeId};
