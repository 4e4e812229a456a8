use tracing::trace;

use super::RuntimeClientPlugin;
use crate::model::{Model, OperationShape, ServiceShape};

impl RuntimeClientPlugin {
    /// Evaluate the service predicate. A plugin without one always matches.
    pub fn matches_service(&self, model: &Model, service: &ServiceShape) -> bool {
        let matched = self
            .service_predicate
            .is_none_or(|predicate| predicate(model, service));
        trace!(plugin = %self.name, service = %service.id, matched, "service predicate");
        matched
    }

    /// Evaluate the operation predicate. A plugin without one never matches
    /// an individual operation.
    pub fn matches_operation(
        &self,
        model: &Model,
        service: &ServiceShape,
        operation: &OperationShape,
    ) -> bool {
        let matched = self
            .operation_predicate
            .is_some_and(|predicate| predicate(model, service, operation));
        trace!(
            plugin = %self.name,
            service = %service.id,
            operation = %operation.id,
            matched,
            "operation predicate"
        );
        matched
    }

    /// True when the plugin can contribute anything at client level: a
    /// config triple, or a plugin function that is not scoped to operations.
    pub fn has_client_contribution(&self) -> bool {
        self.client_config.is_some()
            || (self.plugin_function.is_some() && self.operation_predicate.is_none())
    }

    /// True when the plugin contributes per-operation middleware.
    pub fn has_operation_contribution(&self) -> bool {
        self.plugin_function.is_some() && self.operation_predicate.is_some()
    }
}

/// Plugins that apply to the client of `service`, in registration order.
pub fn client_plugins<'p>(
    model: &Model,
    service: &ServiceShape,
    plugins: &'p [RuntimeClientPlugin],
) -> Vec<&'p RuntimeClientPlugin> {
    plugins
        .iter()
        .filter(|p| p.has_client_contribution() && p.matches_service(model, service))
        .collect()
}

/// Plugins whose middleware applies to `operation`, in registration order.
pub fn operation_plugins<'p>(
    model: &Model,
    service: &ServiceShape,
    operation: &OperationShape,
    plugins: &'p [RuntimeClientPlugin],
) -> Vec<&'p RuntimeClientPlugin> {
    plugins
        .iter()
        .filter(|p| p.has_operation_contribution() && p.matches_operation(model, service, operation))
        .collect()
}
