use serde_json::{json, Map, Value};
use tracing::{info, warn};

use super::context::CodegenContext;
use super::resources::ResourceProvider;
use super::settings::CodegenSettings;
use super::sink::{DependencyKind, FragmentSink, TypeScriptDependency, WriterDelegator};
use super::templates::{render_client, render_command, render_index};
use crate::error::CodegenError;
use crate::integration::Integration;
use crate::endpoint::ParameterDescriptor;
use crate::linter::{error_count, lint_service, LintSeverity, ENDPOINT_PARAMETER};
use crate::model::Model;
use crate::plugin::{compose, RuntimeClientPlugin};

/// Class name of the command generated for an operation.
pub fn command_name(operation_name: &str) -> String {
    format!("{operation_name}Command")
}

/// Run one generation pass and return the staged output.
///
/// Order of work:
/// 1. lint the target service and stop on errors; compile its endpoint
///    rule-set parameters so their errors surface unchanged
/// 2. compose the plugins of every integration (client mode only)
/// 3. render the client, one command per contained operation and `src/index.ts`
/// 4. let every integration customize the output, in order
/// 5. render `package.json` from the recorded dependencies
///
/// Nothing is written to disk; call [`WriterDelegator::commit`] on the result.
///
/// # Errors
///
/// Any [`CodegenError`] raised along the way aborts the pass.
pub fn generate(
    model: &Model,
    settings: &CodegenSettings,
    integrations: &[Box<dyn Integration>],
    resources: &dyn ResourceProvider,
) -> Result<WriterDelegator, CodegenError> {
    let service = model.service(settings.service.as_str()).ok_or_else(|| {
        CodegenError::malformed(settings.service.as_str(), "service not found in model")
    })?;

    let issues: Vec<_> = lint_service(model, service)
        .into_iter()
        .filter(|i| i.kind != ENDPOINT_PARAMETER)
        .collect();
    for issue in issues.iter().filter(|i| i.severity == LintSeverity::Warning) {
        warn!(location = %issue.location, kind = %issue.kind, "{}", issue.message);
    }
    let errors = error_count(&issues);
    if errors > 0 {
        return Err(CodegenError::LintFailed(errors));
    }
    if let Some(rule_set) = service.traits.endpoint_rule_set() {
        ParameterDescriptor::compile_all(&rule_set.parameters)?;
    }

    let mut writers = WriterDelegator::new();
    let operations = model.contained_operations(service);
    let commands: Vec<String> = operations
        .iter()
        .map(|op| command_name(op.id.name()))
        .collect();

    if settings.generate_client {
        let plugins: Vec<RuntimeClientPlugin> = integrations
            .iter()
            .flat_map(|integration| integration.client_plugins())
            .collect();
        let composition = compose(model, service, &plugins)?;

        writers.write_fragment(
            &format!("src/{}.ts", settings.client_name),
            &render_client(&settings.client_name, &composition, &commands)?,
        );
        for (op, command) in operations.iter().zip(&commands) {
            writers.write_fragment(
                &format!("src/commands/{command}.ts"),
                &render_command(&settings.client_name, command, op.id.as_str(), &composition)?,
            );
        }
        writers.add_dependency(TypeScriptDependency::SmithyClient);
        writers.add_dependency(TypeScriptDependency::SmithyTypes);
        writers.add_dependency(TypeScriptDependency::MiddlewareStack);
    }
    writers.write_fragment(
        "src/index.ts",
        &render_index(settings.generate_client, &settings.client_name, &commands)?,
    );
    writers.add_dependency(TypeScriptDependency::Tslib);
    writers.add_dependency(TypeScriptDependency::Typescript);

    {
        let mut ctx = CodegenContext {
            model,
            service,
            settings,
            resources,
            writers: &mut writers,
        };
        for integration in integrations {
            info!(integration = integration.name(), "running integration");
            integration.customize(&mut ctx)?;
        }
    }

    let manifest = package_manifest(settings, writers.dependencies());
    writers.write_fragment("package.json", &manifest);

    info!(
        service = %service.id,
        operations = operations.len(),
        files = writers.files().count(),
        "generation pass complete"
    );
    Ok(writers)
}

/// Render `package.json`.
pub fn package_manifest(
    settings: &CodegenSettings,
    dependencies: impl Iterator<Item = TypeScriptDependency>,
) -> String {
    let mut runtime = Map::new();
    let mut dev = Map::new();
    let mut has_tests = false;
    for dep in dependencies {
        let section = match dep.kind() {
            DependencyKind::Runtime => &mut runtime,
            DependencyKind::Dev => &mut dev,
        };
        section.insert(dep.package().to_string(), Value::from(dep.version()));
        has_tests |= dep == TypeScriptDependency::Vitest;
    }

    let mut scripts = Map::new();
    scripts.insert("build".into(), Value::from("tsc -p tsconfig.json"));
    if has_tests {
        scripts.insert("test".into(), Value::from("vitest run"));
    }

    let manifest = json!({
        "name": settings.package,
        "version": settings.package_version,
        "description": format!("TypeScript SDK for {}", settings.service),
        "main": "./dist-cjs/index.js",
        "types": "./dist-types/index.d.ts",
        "scripts": scripts,
        "dependencies": runtime,
        "devDependencies": dev,
    });
    // Serializing a `Value` cannot fail.
    serde_json::to_string_pretty(&manifest).unwrap_or_default()
}
