use askama::Template;
use tracing::debug;

use super::Integration;
use crate::endpoint::{DeclarationMode, ParameterDescriptor};
use crate::error::CodegenError;
use crate::generator::{CodegenContext, EndpointParametersTemplateData, TypeScriptDependency};
use crate::model::{Model, ServiceShape};
use crate::plugin::{RuntimeClientPlugin, Symbol};

const NAMESPACE: &str = "./src/endpoint/EndpointParameters";
const OUTPUT_PATH: &str = "src/endpoint/EndpointParameters.ts";

/// Writes `src/endpoint/EndpointParameters.ts` for services that carry an
/// `@endpointRuleSet`, and mixes `resolveClientEndpointParameters` into the
/// client config.
#[derive(Debug, Clone, Copy, Default)]
pub struct EndpointParametersIntegration;

fn has_rule_set(_: &Model, service: &ServiceShape) -> bool {
    service.traits.endpoint_rule_set().is_some()
}

/// Rendered parts of `EndpointParameters.ts`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct EndpointParameterLines {
    pub client_input: Vec<String>,
    pub default_assignments: Vec<String>,
    pub parameters: Vec<String>,
}

/// Compile the rule set of `service` into declaration lines.
///
/// Built-in parameters and those listed in `@clientContextParams` are client
/// inputs; client-context ones accept a provider. Every client input also
/// gets an `endpoint` entry unless the rule set declares one.
pub(crate) fn endpoint_parameter_lines(
    service: &ServiceShape,
) -> Result<Option<EndpointParameterLines>, CodegenError> {
    let Some(rule_set) = service.traits.endpoint_rule_set() else {
        return Ok(None);
    };
    let descriptors = ParameterDescriptor::compile_all(&rule_set.parameters)?;
    let context_params = service.traits.client_context_params();
    let is_context_param =
        |name: &str| context_params.is_some_and(|params| params.contains_key(name));

    let mut lines = EndpointParameterLines::default();
    for descriptor in &descriptors {
        lines
            .parameters
            .push(descriptor.declaration(DeclarationMode::Standard));

        let mode = if is_context_param(descriptor.name()) {
            DeclarationMode::ClientContext
        } else if descriptor.is_built_in() {
            DeclarationMode::Standard
        } else {
            continue;
        };
        lines.client_input.push(descriptor.declaration(mode));
        if let Some(assignment) = descriptor.default_assignment() {
            lines.default_assignments.push(assignment);
        }
    }

    if !descriptors.iter().any(|d| d.name() == "endpoint") {
        let endpoint = ParameterDescriptor::compile("endpoint", &serde_json::json!({}))?;
        lines
            .client_input
            .push(endpoint.declaration(DeclarationMode::Standard));
    }
    Ok(Some(lines))
}

impl Integration for EndpointParametersIntegration {
    fn name(&self) -> &'static str {
        "EndpointParameters"
    }

    fn client_plugins(&self) -> Vec<RuntimeClientPlugin> {
        vec![RuntimeClientPlugin::builder(self.name())
            .client_config(
                Symbol::new(NAMESPACE, "ClientInputEndpointParameters"),
                Symbol::new(NAMESPACE, "ClientResolvedEndpointParameters"),
                Symbol::new(NAMESPACE, "resolveClientEndpointParameters"),
            )
            .service_predicate(has_rule_set)
            .build()]
    }

    fn customize(&self, ctx: &mut CodegenContext<'_>) -> Result<(), CodegenError> {
        if !ctx.settings.generate_client {
            return Ok(());
        }
        let Some(lines) = endpoint_parameter_lines(ctx.service)? else {
            debug!(service = %ctx.service.id, "no endpoint rule set");
            return Ok(());
        };

        let rendered = EndpointParametersTemplateData {
            client_input: lines.client_input,
            default_assignments: lines.default_assignments,
            parameters: lines.parameters,
        }
        .render()?;
        ctx.writers.add_dependency(TypeScriptDependency::SmithyTypes);
        ctx.writers.write_fragment(OUTPUT_PATH, &rendered);
        Ok(())
    }
}
