//! # Generator Module
//!
//! Turns a loaded model into the files of a TypeScript client package.
//!
//! ## Overview
//!
//! A generation pass produces:
//! - **Client** - `src/<ClientName>.ts`, mixing in every composed client config
//! - **Commands** - one `src/commands/<Operation>Command.ts` per contained
//!   operation, each with its own middleware stack
//! - **Entry point** - `src/index.ts`, to which integrations append exports
//! - **Integration files** - e.g. the API key middleware or endpoint parameters
//! - **Manifest** - `package.json` built from the dependencies recorded during the pass
//!
//! ## Architecture
//!
//! ```text
//! Model → Lint → Compose plugins → Askama templates → Integrations → WriterDelegator → commit
//! ```
//!
//! Every fragment is staged in a [`WriterDelegator`]. Integrations see it
//! only as a `&mut dyn FragmentSink` through [`CodegenContext`], so they can
//! append to files but never read or rewrite what others produced. Nothing
//! reaches disk until [`WriterDelegator::commit`].
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tscodegen::generator::{generate, CodegenSettings, EmbeddedResources};
//! use tscodegen::integration::default_integrations;
//! use tscodegen::model::{load_model, ShapeId};
//!
//! let model = load_model("weather.json".as_ref())?;
//! let settings = CodegenSettings::for_service(ShapeId::parse("example.weather#Weather")?);
//! let output = generate(&model, &settings, &default_integrations(), &EmbeddedResources)?;
//! output.commit("out/weather".as_ref())?;
//! ```
//!
//! ## Templates
//!
//! Templates live in the `templates/` directory:
//!
//! - `client.ts.txt` - Client class
//! - `command.ts.txt` - Command class
//! - `index.ts.txt` - Package entry point
//! - `endpoint_parameters.ts.txt` - Endpoint parameter interfaces and resolver

mod context;
mod project;
mod resources;
mod settings;
mod sink;
mod templates;

pub use context::CodegenContext;
pub use project::*;
pub use resources::*;
pub use settings::*;
pub use sink::*;
pub use templates::*;
