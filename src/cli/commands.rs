use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::generator::{
    generate, load_settings, resolve_settings_path, CodegenSettings, EmbeddedResources,
    SettingsOverrides,
};
use crate::integration::default_integrations;
use crate::linter::{fail_if_errors, lint_model, print_lint_issues, LintIssue, LintSeverity};
use crate::model::load_model;
use crate::plugin::{compose, RuntimeClientPlugin};

/// Command-line interface for the TypeScript client generator
#[derive(Parser)]
#[command(name = "tscodegen-gen")]
#[command(about = "Generate TypeScript clients from Smithy models", long_about = None)]
pub struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Generate a TypeScript client package from a Smithy JSON AST model
    Generate {
        /// Path to the model file (JSON or YAML)
        #[arg(short, long)]
        model: PathBuf,

        /// Path to tscodegen.toml
        /// If not provided, will auto-detect alongside the model
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Service shape id, e.g. example.weather#Weather (overrides the config file)
        #[arg(short, long, env = "TSCODEGEN_SERVICE")]
        service: Option<String>,

        /// npm package name (overrides the config file)
        #[arg(short, long)]
        package: Option<String>,

        /// Output directory for the generated package
        #[arg(short, long, default_value = "generated")]
        output: PathBuf,

        /// Generate server-side artifacts only (no client, no commands)
        #[arg(long, default_value_t = false)]
        server: bool,

        /// List the files that would be written without writing them
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
    /// Lint a model
    ///
    /// Reports declarations the generator would reject or ignore:
    /// - @auth entries naming schemes the service does not apply
    /// - @optionalAuth on operations without auth
    /// - endpoint rule set parameters that do not compile
    /// - client context params missing from the rule set
    Lint {
        /// Path to the model file (JSON or YAML)
        #[arg(short, long)]
        model: PathBuf,

        /// Exit with error code if any errors are found
        #[arg(long, default_value_t = false)]
        fail_on_error: bool,

        /// Show only errors (hide warnings and info)
        #[arg(long, default_value_t = false)]
        errors_only: bool,
    },
    /// Print the plugins composed for a service as JSON
    Inspect {
        /// Path to the model file (JSON or YAML)
        #[arg(short, long)]
        model: PathBuf,

        /// Service shape id
        #[arg(short, long)]
        service: String,
    },
}

/// Run a parsed command line.
pub fn run_cli(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Generate {
            model,
            config,
            service,
            package,
            output,
            server,
            dry_run,
        } => {
            let overrides = SettingsOverrides {
                service,
                package,
                server,
            };
            run_generate(&model, config.as_deref(), &overrides, &output, dry_run)
        }
        Commands::Lint {
            model,
            fail_on_error,
            errors_only,
        } => run_lint(&model, fail_on_error, errors_only),
        Commands::Inspect { model, service } => {
            println!("{}", inspect(&model, &service)?);
            Ok(())
        }
    }
}

fn run_generate(
    model_path: &Path,
    config: Option<&Path>,
    overrides: &SettingsOverrides,
    output: &Path,
    dry_run: bool,
) -> anyhow::Result<()> {
    if let Some(path) = config {
        if !path.exists() {
            anyhow::bail!("Settings file not found: {}", path.display());
        }
    }
    let settings_file = match resolve_settings_path(config, model_path) {
        Some(path) => {
            info!(path = %path.display(), "using settings file");
            load_settings(&path)?
        }
        None => None,
    };
    let settings = CodegenSettings::resolve(settings_file, overrides)?;
    let model = load_model(model_path)?;

    let staged = generate(&model, &settings, &default_integrations(), &EmbeddedResources)
        .with_context(|| format!("Failed to generate code for {}", settings.service))?;

    if dry_run {
        println!("📋 Dry run: {} file(s) would be written to {:?}", staged.files().count(), output);
        for (path, contents) in staged.files() {
            println!("   {path} ({} bytes)", contents.len());
        }
        return Ok(());
    }
    staged.commit(output)?;
    Ok(())
}

fn run_lint(model_path: &Path, fail_on_error: bool, errors_only: bool) -> anyhow::Result<()> {
    let model = load_model(model_path)?;
    let mut issues: Vec<LintIssue> = lint_model(&model);
    if errors_only {
        issues.retain(|i| i.severity == LintSeverity::Error);
    }
    print_lint_issues(&issues);
    if fail_on_error {
        fail_if_errors(&issues)?;
    }
    Ok(())
}

/// Composition result and effective auth of one service, as pretty JSON.
pub fn inspect(model_path: &Path, service_id: &str) -> anyhow::Result<String> {
    let model = load_model(model_path)?;
    let service = model
        .service(service_id)
        .with_context(|| format!("Service {service_id} not found in {}", model_path.display()))?;
    let plugins: Vec<RuntimeClientPlugin> = default_integrations()
        .iter()
        .flat_map(|integration| integration.client_plugins())
        .collect();
    let composition = compose(&model, service, &plugins)?;

    let report = json!({
        "service": service.id,
        "effectiveAuthSchemes": model.effective_auth_schemes(service),
        "composition": composition,
        "imports": composition.imports(),
    });
    Ok(serde_json::to_string_pretty(&report)?)
}
