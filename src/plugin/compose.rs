use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info};

use super::predicate::{client_plugins, operation_plugins};
use super::{ClientConfig, PluginParams, RuntimeClientPlugin, Symbol};
use crate::endpoint::object_literal;
use crate::error::CodegenError;
use crate::model::{Model, OperationShape, ServiceShape, ShapeId};

/// One call of a plugin function: `symbol(config, params)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MiddlewareInvocation {
    pub plugin: String,
    pub symbol: Symbol,
    pub params: PluginParams,
}

impl MiddlewareInvocation {
    /// Call expression against a config binding, e.g.
    /// `getHttpApiKeyAuthPlugin(configuration, { in: "header", name: "x-api-key" })`.
    pub fn call_expression(&self, config_binding: &str) -> String {
        if self.params.is_empty() {
            format!("{}({config_binding})", self.symbol.name)
        } else {
            format!(
                "{}({config_binding}, {})",
                self.symbol.name,
                object_literal(&self.params)
            )
        }
    }

    fn same_call(&self, other: &MiddlewareInvocation) -> bool {
        self.symbol == other.symbol && self.params == other.params
    }
}

/// What a plugin contributes to the client itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientContribution {
    pub plugin: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<ClientConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middleware: Option<MiddlewareInvocation>,
}

/// Applicable plugins for one service, in emission order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompositionResult {
    pub client: Vec<ClientContribution>,
    pub operations: BTreeMap<ShapeId, Vec<MiddlewareInvocation>>,
}

impl CompositionResult {
    /// Config triples in emission order.
    pub fn client_configs(&self) -> impl Iterator<Item = &ClientConfig> {
        self.client.iter().filter_map(|c| c.config.as_ref())
    }

    /// Client-wide middleware in emission order.
    pub fn client_middleware(&self) -> impl Iterator<Item = &MiddlewareInvocation> {
        self.client.iter().filter_map(|c| c.middleware.as_ref())
    }

    pub fn operation_middleware(&self, operation: &str) -> &[MiddlewareInvocation] {
        self.operations
            .get(operation)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Every symbol referenced at client level, grouped by module.
    pub fn client_imports(&self) -> BTreeMap<String, BTreeSet<String>> {
        let mut imports: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for config in self.client_configs() {
            for symbol in [
                &config.input_config,
                &config.resolved_config,
                &config.resolve_function,
            ] {
                add_import(&mut imports, symbol);
            }
        }
        for middleware in self.client_middleware() {
            add_import(&mut imports, &middleware.symbol);
        }
        imports
    }

    /// Every symbol referenced anywhere in the result, grouped by module.
    pub fn imports(&self) -> BTreeMap<String, BTreeSet<String>> {
        let mut imports = self.client_imports();
        for middleware in self.operations.values().flatten() {
            add_import(&mut imports, &middleware.symbol);
        }
        imports
    }

    /// Every symbol referenced by one operation's middleware, grouped by module.
    pub fn operation_imports(&self, operation: &str) -> BTreeMap<String, BTreeSet<String>> {
        let mut imports = BTreeMap::new();
        for middleware in self.operation_middleware(operation) {
            add_import(&mut imports, &middleware.symbol);
        }
        imports
    }
}

fn add_import(imports: &mut BTreeMap<String, BTreeSet<String>>, symbol: &Symbol) {
    imports
        .entry(symbol.namespace.clone())
        .or_default()
        .insert(symbol.name.clone());
}

/// Compose every registered plugin that applies to `service`.
///
/// Client contributions keep registration order, and so does the
/// middleware list of each contained operation. Identical contributions
/// from different plugins are kept once.
///
/// # Errors
///
/// Returns [`CodegenError::InvariantViolation`] when a params supplier
/// cannot find a trait its gating predicate relied on. Other supplier
/// errors are propagated unchanged.
pub fn compose(
    model: &Model,
    service: &ServiceShape,
    plugins: &[RuntimeClientPlugin],
) -> Result<CompositionResult, CodegenError> {
    let mut result = CompositionResult::default();

    for plugin in client_plugins(model, service, plugins) {
        let config = plugin
            .client_config
            .as_ref()
            .filter(|config| !result.client_configs().any(|seen| seen == *config))
            .cloned();
        let middleware = if plugin.operation_predicate.is_none() {
            match realize(plugin, model, service, None)? {
                Some(call) if !result.client_middleware().any(|seen| seen.same_call(&call)) => {
                    Some(call)
                }
                _ => None,
            }
        } else {
            None
        };
        if config.is_none() && middleware.is_none() {
            debug!(plugin = %plugin.name, "client contribution already present");
            continue;
        }
        result.client.push(ClientContribution {
            plugin: plugin.name.clone(),
            config,
            middleware,
        });
    }

    for operation in model.contained_operations(service) {
        let mut stack: Vec<MiddlewareInvocation> = Vec::new();
        for plugin in operation_plugins(model, service, operation, plugins) {
            if let Some(call) = realize(plugin, model, service, Some(operation))? {
                if !stack.iter().any(|seen| seen.same_call(&call)) {
                    stack.push(call);
                }
            }
        }
        result.operations.insert(operation.id.clone(), stack);
    }

    info!(
        service = %service.id,
        client_contributions = result.client.len(),
        operations = result.operations.len(),
        "composed runtime plugins"
    );
    Ok(result)
}

fn realize(
    plugin: &RuntimeClientPlugin,
    model: &Model,
    service: &ServiceShape,
    operation: Option<&OperationShape>,
) -> Result<Option<MiddlewareInvocation>, CodegenError> {
    let Some(function) = plugin.plugin_function.as_ref() else {
        return Ok(None);
    };
    let params = match function.params_supplier {
        Some(supplier) => supplier(model, service, operation).map_err(|err| {
            err.into_invariant_violation(&plugin.name, &service.id, operation.map(|op| &op.id))
        })?,
        None => PluginParams::new(),
    };
    Ok(Some(MiddlewareInvocation {
        plugin: plugin.name.clone(),
        symbol: function.symbol.clone(),
        params,
    }))
}
