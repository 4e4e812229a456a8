use std::collections::{BTreeMap, BTreeSet};

use super::{ShapeId, Traits};

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceShape {
    pub id: ShapeId,
    pub version: Option<String>,
    pub operations: Vec<ShapeId>,
    pub resources: Vec<ShapeId>,
    pub traits: Traits,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResourceShape {
    pub id: ShapeId,
    /// Lifecycle operations (create, put, read, update, delete, list) in that order
    pub lifecycle: Vec<ShapeId>,
    pub operations: Vec<ShapeId>,
    pub collection_operations: Vec<ShapeId>,
    pub resources: Vec<ShapeId>,
    pub traits: Traits,
}

impl ResourceShape {
    /// Every operation bound directly to this resource.
    pub fn bound_operations(&self) -> impl Iterator<Item = &ShapeId> {
        self.lifecycle
            .iter()
            .chain(self.operations.iter())
            .chain(self.collection_operations.iter())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OperationShape {
    pub id: ShapeId,
    pub traits: Traits,
}

/// Read-only service graph. Immutable once loaded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Model {
    pub(crate) services: BTreeMap<ShapeId, ServiceShape>,
    pub(crate) resources: BTreeMap<ShapeId, ResourceShape>,
    pub(crate) operations: BTreeMap<ShapeId, OperationShape>,
    pub(crate) auth_definitions: BTreeSet<ShapeId>,
}

impl Model {
    pub fn service(&self, id: &str) -> Option<&ServiceShape> {
        self.services.get(id)
    }

    pub fn resource(&self, id: &str) -> Option<&ResourceShape> {
        self.resources.get(id)
    }

    pub fn operation(&self, id: &str) -> Option<&OperationShape> {
        self.operations.get(id)
    }

    pub fn services(&self) -> impl Iterator<Item = &ServiceShape> {
        self.services.values()
    }

    pub fn operations(&self) -> impl Iterator<Item = &OperationShape> {
        self.operations.values()
    }

    /// True when `trait_id` names an auth scheme: either a built-in auth
    /// trait or a trait shape marked with `@authDefinition`.
    pub fn is_auth_definition(&self, trait_id: &str) -> bool {
        self.auth_definitions.contains(trait_id)
    }
}
