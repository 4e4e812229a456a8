use serde::Serialize;
use std::collections::BTreeSet;

use super::{Model, OperationShape, ServiceShape, ShapeId};

/// Auth schemes that apply to a service or operation, in priority order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EffectiveAuthSchemes(Vec<ShapeId>);

impl EffectiveAuthSchemes {
    pub fn contains(&self, scheme: &str) -> bool {
        self.0.iter().any(|s| s.as_str() == scheme)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ShapeId> {
        self.0.iter()
    }
}

impl Model {
    /// Auth traits applied to the service, sorted by trait id.
    pub fn auth_schemes(&self, service: &ServiceShape) -> Vec<ShapeId> {
        service
            .traits
            .ids()
            .filter(|id| self.is_auth_definition(id.as_str()))
            .cloned()
            .collect()
    }

    /// Effective schemes of a service: the `@auth` order restricted to the
    /// schemes actually applied, or every applied scheme when `@auth` is absent.
    pub fn effective_auth_schemes(&self, service: &ServiceShape) -> EffectiveAuthSchemes {
        let applied = self.auth_schemes(service);
        match service.traits.auth() {
            Some(order) => EffectiveAuthSchemes(
                order
                    .iter()
                    .filter(|id| applied.contains(id))
                    .cloned()
                    .collect(),
            ),
            None => EffectiveAuthSchemes(applied),
        }
    }

    /// Effective schemes of an operation within a service. An operation level
    /// `@auth` replaces the service's list; otherwise the service's effective
    /// schemes are inherited.
    pub fn effective_operation_auth_schemes(
        &self,
        service: &ServiceShape,
        operation: &OperationShape,
    ) -> EffectiveAuthSchemes {
        match operation.traits.auth() {
            Some(order) => {
                let applied = self.auth_schemes(service);
                EffectiveAuthSchemes(
                    order
                        .iter()
                        .filter(|id| applied.contains(id))
                        .cloned()
                        .collect(),
                )
            }
            None => self.effective_auth_schemes(service),
        }
    }

    /// Every operation reachable from the service through direct bindings and
    /// (recursively) bound resources, sorted by shape id.
    pub fn contained_operations(&self, service: &ServiceShape) -> Vec<&OperationShape> {
        let mut ids: BTreeSet<&ShapeId> = service.operations.iter().collect();
        let mut visited = BTreeSet::new();
        let mut pending: Vec<&ShapeId> = service.resources.iter().collect();

        while let Some(resource_id) = pending.pop() {
            if !visited.insert(resource_id) {
                continue;
            }
            if let Some(resource) = self.resource(resource_id.as_str()) {
                ids.extend(resource.bound_operations());
                pending.extend(resource.resources.iter());
            }
        }

        ids.into_iter()
            .filter_map(|id| self.operation(id.as_str()))
            .collect()
    }
}
