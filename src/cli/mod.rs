//! # CLI Module
//!
//! Command-line front end of the generator.
//!
//! ## Commands
//!
//! ### `generate`
//!
//! Generate a client package for one service of a model:
//!
//! ```bash
//! tscodegen-gen generate --model weather.json --service example.weather#Weather --output out/weather
//! ```
//!
//! Options:
//! - `--model <FILE>` - Smithy JSON AST model, `.json` or `.yaml` (required)
//! - `--config <FILE>` - `tscodegen.toml`; auto-detected next to the model
//! - `--service <ID>` - Service shape id; overrides the config file
//! - `--package <NAME>` - npm package name; overrides the config file
//! - `--output <DIR>` - Output directory (default: `generated`)
//! - `--server` - Skip client artifacts
//! - `--dry-run` - List files without writing them
//!
//! ### `lint`
//!
//! ```bash
//! tscodegen-gen lint --model weather.json --fail-on-error
//! ```
//!
//! ### `inspect`
//!
//! Print the composed plugins and effective auth schemes of a service:
//!
//! ```bash
//! tscodegen-gen inspect --model weather.json --service example.weather#Weather
//! ```
//!
//! Every command accepts `--verbose` to log at debug level. Logging is
//! otherwise configured through `TSCODEGEN_LOG_*` variables (see
//! [`crate::logging`]).

mod commands;
#[cfg(test)]
mod tests;

pub use commands::{inspect, run_cli, Cli, Commands};
