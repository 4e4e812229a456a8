use askama::Template;
use std::collections::{BTreeMap, BTreeSet};

use crate::error::CodegenError;
use crate::plugin::{relative_module, CompositionResult};

/// Template data for generating `src/<ClientName>.ts`
#[derive(Template)]
#[template(path = "client.ts.txt", escape = "none")]
pub struct ClientTemplateData {
    /// Client class name
    pub client_name: String,
    /// Rendered import statements (plugin symbols and command types)
    pub imports: Vec<String>,
    /// Union of every command input type
    pub input_types: String,
    /// Union of every command output type
    pub output_types: String,
    /// Input config interfaces contributed by plugins
    pub input_configs: Vec<String>,
    /// Resolved config interfaces contributed by plugins
    pub resolved_configs: Vec<String>,
    /// `const _config_N = resolveX(_config_N-1);` lines
    pub resolve_steps: Vec<String>,
    /// Binding holding the fully resolved config
    pub final_config: String,
    /// Client-wide middleware call expressions
    pub client_middleware: Vec<String>,
}

/// Template data for generating `src/commands/<Operation>Command.ts`
#[derive(Template)]
#[template(path = "command.ts.txt", escape = "none")]
pub struct CommandTemplateData {
    /// Client class name
    pub client_name: String,
    /// Command class name
    pub command_name: String,
    /// Absolute shape id of the operation
    pub operation_id: String,
    /// Rendered import statements for middleware symbols
    pub imports: Vec<String>,
    /// Middleware call expressions, in stack order
    pub middleware: Vec<String>,
}

/// Template data for generating `src/index.ts`
#[derive(Template)]
#[template(path = "index.ts.txt", escape = "none")]
pub struct IndexTemplateData {
    /// Whether client artifacts are generated
    pub generate_client: bool,
    /// Client class name
    pub client_name: String,
    /// Command class names
    pub commands: Vec<String>,
}

/// Template data for generating `src/endpoint/EndpointParameters.ts`
#[derive(Template)]
#[template(path = "endpoint_parameters.ts.txt", escape = "none")]
pub struct EndpointParametersTemplateData {
    /// Declarations of `ClientInputEndpointParameters`
    pub client_input: Vec<String>,
    /// Default assignments returned by `resolveClientEndpointParameters`
    pub default_assignments: Vec<String>,
    /// Declarations of `EndpointParameters`
    pub parameters: Vec<String>,
}

/// Render `import { A, B } from "<module>";` lines for symbols grouped by
/// module, as seen from the package-relative file `from_file`.
pub fn import_lines(imports: &BTreeMap<String, BTreeSet<String>>, from_file: &str) -> Vec<String> {
    imports
        .iter()
        .map(|(namespace, names)| {
            let names: Vec<&str> = names.iter().map(String::as_str).collect();
            format!(
                "import {{ {} }} from \"{}\";",
                names.join(", "),
                relative_module(from_file, namespace)
            )
        })
        .collect()
}

/// Render the client class.
pub fn render_client(
    client_name: &str,
    composition: &CompositionResult,
    commands: &[String],
) -> Result<String, CodegenError> {
    let from_file = format!("src/{client_name}.ts");
    let mut imports = import_lines(&composition.client_imports(), &from_file);
    imports.extend(commands.iter().map(|command| {
        format!("import {{ {command}Input, {command}Output }} from \"./commands/{command}\";")
    }));

    let union = |suffix: &str| {
        if commands.is_empty() {
            "never".to_string()
        } else {
            commands
                .iter()
                .map(|c| format!("{c}{suffix}"))
                .collect::<Vec<_>>()
                .join(" | ")
        }
    };

    let configs: Vec<_> = composition.client_configs().collect();
    let resolve_steps = configs
        .iter()
        .enumerate()
        .map(|(i, config)| {
            format!(
                "const _config_{} = {}(_config_{i});",
                i + 1,
                config.resolve_function.name
            )
        })
        .collect();

    Ok(ClientTemplateData {
        client_name: client_name.to_string(),
        imports,
        input_types: union("Input"),
        output_types: union("Output"),
        input_configs: configs.iter().map(|c| c.input_config.name.clone()).collect(),
        resolved_configs: configs
            .iter()
            .map(|c| c.resolved_config.name.clone())
            .collect(),
        resolve_steps,
        final_config: format!("_config_{}", configs.len()),
        client_middleware: composition
            .client_middleware()
            .map(|m| m.call_expression("this.config"))
            .collect(),
    }
    .render()?)
}

/// Render one command class with the middleware composed for its operation.
pub fn render_command(
    client_name: &str,
    command_name: &str,
    operation_id: &str,
    composition: &CompositionResult,
) -> Result<String, CodegenError> {
    let from_file = format!("src/commands/{command_name}.ts");
    Ok(CommandTemplateData {
        client_name: client_name.to_string(),
        command_name: command_name.to_string(),
        operation_id: operation_id.to_string(),
        imports: import_lines(&composition.operation_imports(operation_id), &from_file),
        middleware: composition
            .operation_middleware(operation_id)
            .iter()
            .map(|m| m.call_expression("configuration"))
            .collect(),
    }
    .render()?)
}

/// Render the base package entry point. Integrations append their own
/// export lines after it.
pub fn render_index(
    generate_client: bool,
    client_name: &str,
    commands: &[String],
) -> Result<String, CodegenError> {
    Ok(IndexTemplateData {
        generate_client,
        client_name: client_name.to_string(),
        commands: commands.to_vec(),
    }
    .render()?)
}
