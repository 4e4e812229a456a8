use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::endpoint::RenderedLiteral;
use crate::error::CodegenError;
use crate::model::{Model, OperationShape, ServiceShape};

/// Decides client-level applicability for a service.
pub type ServicePredicate = fn(&Model, &ServiceShape) -> bool;

/// Decides middleware applicability for one operation of a service.
pub type OperationPredicate = fn(&Model, &ServiceShape, &OperationShape) -> bool;

/// Realized arguments passed to a plugin function after the resolved config.
pub type PluginParams = BTreeMap<String, RenderedLiteral>;

/// Produces the extra plugin function arguments. `operation` is `None` when
/// the plugin function is applied client-wide.
pub type ParamsSupplier =
    fn(&Model, &ServiceShape, Option<&OperationShape>) -> Result<PluginParams, CodegenError>;

/// A named export of a generated module.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Symbol {
    /// Export name, e.g. `resolveHttpApiKeyAuthConfig`
    pub name: String,
    /// Module path relative to the package root, e.g. `./src/middleware/HttpApiKeyAuth`
    pub namespace: String,
}

impl Symbol {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Symbol {
            name: name.into(),
            namespace: namespace.into(),
        }
    }

    /// Import specifier for this symbol's module as seen from `from_file`
    /// (a package-relative file path such as `src/commands/GetCityCommand.ts`).
    pub fn import_path(&self, from_file: &str) -> String {
        relative_module(from_file, &self.namespace)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.namespace, self.name)
    }
}

/// Client config contributed by a plugin. The three symbols always travel
/// together.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ClientConfig {
    pub input_config: Symbol,
    pub resolved_config: Symbol,
    pub resolve_function: Symbol,
}

/// Middleware factory contributed by a plugin.
#[derive(Clone)]
pub struct PluginFunction {
    pub symbol: Symbol,
    pub params_supplier: Option<ParamsSupplier>,
}

impl fmt::Debug for PluginFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginFunction")
            .field("symbol", &self.symbol)
            .field("params_supplier", &self.params_supplier.is_some())
            .finish()
    }
}

/// Registration record for a runtime client plugin.
#[derive(Clone)]
pub struct RuntimeClientPlugin {
    pub(crate) name: String,
    pub(crate) client_config: Option<ClientConfig>,
    pub(crate) plugin_function: Option<PluginFunction>,
    pub(crate) service_predicate: Option<ServicePredicate>,
    pub(crate) operation_predicate: Option<OperationPredicate>,
}

impl fmt::Debug for RuntimeClientPlugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuntimeClientPlugin")
            .field("name", &self.name)
            .field("client_config", &self.client_config)
            .field("plugin_function", &self.plugin_function)
            .field("service_predicate", &self.service_predicate.is_some())
            .field("operation_predicate", &self.operation_predicate.is_some())
            .finish()
    }
}

impl RuntimeClientPlugin {
    pub fn builder(name: impl Into<String>) -> RuntimeClientPluginBuilder {
        RuntimeClientPluginBuilder {
            plugin: RuntimeClientPlugin {
                name: name.into(),
                client_config: None,
                plugin_function: None,
                service_predicate: None,
                operation_predicate: None,
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn client_config(&self) -> Option<&ClientConfig> {
        self.client_config.as_ref()
    }

    pub fn plugin_function(&self) -> Option<&PluginFunction> {
        self.plugin_function.as_ref()
    }
}

pub struct RuntimeClientPluginBuilder {
    plugin: RuntimeClientPlugin,
}

impl RuntimeClientPluginBuilder {
    pub fn client_config(
        mut self,
        input_config: Symbol,
        resolved_config: Symbol,
        resolve_function: Symbol,
    ) -> Self {
        self.plugin.client_config = Some(ClientConfig {
            input_config,
            resolved_config,
            resolve_function,
        });
        self
    }

    pub fn plugin_function(mut self, symbol: Symbol) -> Self {
        self.plugin.plugin_function = Some(PluginFunction {
            symbol,
            params_supplier: None,
        });
        self
    }

    /// Attach a params supplier to the plugin function. Has no effect until
    /// [`plugin_function`](Self::plugin_function) is set.
    pub fn params_supplier(mut self, supplier: ParamsSupplier) -> Self {
        if let Some(function) = self.plugin.plugin_function.as_mut() {
            function.params_supplier = Some(supplier);
        }
        self
    }

    pub fn service_predicate(mut self, predicate: ServicePredicate) -> Self {
        self.plugin.service_predicate = Some(predicate);
        self
    }

    pub fn operation_predicate(mut self, predicate: OperationPredicate) -> Self {
        self.plugin.operation_predicate = Some(predicate);
        self
    }

    pub fn build(self) -> RuntimeClientPlugin {
        self.plugin
    }
}

pub(crate) fn relative_module(from_file: &str, namespace: &str) -> String {
    let target: Vec<&str> = namespace
        .split('/')
        .filter(|part| !part.is_empty() && *part != ".")
        .collect();
    let mut from_dir: Vec<&str> = from_file
        .split('/')
        .filter(|part| !part.is_empty() && *part != ".")
        .collect();
    from_dir.pop();

    let common = from_dir
        .iter()
        .zip(target.iter())
        .take_while(|(a, b)| a == b)
        .count();
    let ups = from_dir.len() - common;
    let rest = target[common..].join("/");
    if ups == 0 {
        format!("./{rest}")
    } else {
        format!("{}{rest}", "../".repeat(ups))
    }
}
