use anyhow::Context;
use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::{debug, info};

use super::traits::{AUTH_DEFINITION, BUILTIN_AUTH_DEFINITIONS};
use super::{Model, OperationShape, ResourceShape, ServiceShape, ShapeId, Traits};
use crate::error::CodegenError;

#[derive(Debug, Deserialize)]
struct AstModel {
    #[serde(default)]
    smithy: Option<String>,
    #[serde(default)]
    shapes: BTreeMap<String, AstShape>,
}

#[derive(Debug, Deserialize)]
struct AstTarget {
    target: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AstShape {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    operations: Vec<AstTarget>,
    #[serde(default)]
    collection_operations: Vec<AstTarget>,
    #[serde(default)]
    resources: Vec<AstTarget>,
    #[serde(default)]
    create: Option<AstTarget>,
    #[serde(default)]
    put: Option<AstTarget>,
    #[serde(default)]
    read: Option<AstTarget>,
    #[serde(default)]
    update: Option<AstTarget>,
    #[serde(default)]
    delete: Option<AstTarget>,
    #[serde(default)]
    list: Option<AstTarget>,
    #[serde(default)]
    traits: BTreeMap<String, Value>,
}

/// Load a Smithy JSON AST model from a `.json`, `.yaml` or `.yml` file.
pub fn load_model(path: &Path) -> anyhow::Result<Model> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read model: {}", path.display()))?;
    let is_yaml = path
        .extension()
        .map(|ext| ext == "yaml" || ext == "yml")
        .unwrap_or(false);
    let value: Value = if is_yaml {
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML model: {}", path.display()))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON model: {}", path.display()))?
    };
    let model = Model::from_ast(value)
        .with_context(|| format!("Invalid model: {}", path.display()))?;
    info!(
        path = %path.display(),
        services = model.services.len(),
        operations = model.operations.len(),
        "loaded model"
    );
    Ok(model)
}

impl Model {
    /// Build a model from a parsed JSON AST document.
    pub fn from_ast(value: Value) -> Result<Model, CodegenError> {
        let ast: AstModel = serde_json::from_value(value)
            .map_err(|e| CodegenError::malformed("model", e.to_string()))?;
        if let Some(version) = &ast.smithy {
            debug!(version = %version, "smithy AST version");
        }

        let mut model = Model::default();
        for builtin in BUILTIN_AUTH_DEFINITIONS {
            model.auth_definitions.insert(ShapeId::parse(builtin)?);
        }

        for (raw_id, shape) in ast.shapes {
            let id = ShapeId::parse(&raw_id)?;
            let traits = Traits::from_raw(&raw_id, shape.traits)?;
            match shape.kind.as_str() {
                "service" => {
                    model.services.insert(
                        id.clone(),
                        ServiceShape {
                            id,
                            version: shape.version,
                            operations: targets(&shape.operations)?,
                            resources: targets(&shape.resources)?,
                            traits,
                        },
                    );
                }
                "resource" => {
                    let lifecycle = [
                        &shape.create,
                        &shape.put,
                        &shape.read,
                        &shape.update,
                        &shape.delete,
                        &shape.list,
                    ]
                    .into_iter()
                    .flatten()
                    .map(|t| ShapeId::parse(&t.target))
                    .collect::<Result<Vec<_>, _>>()?;
                    model.resources.insert(
                        id.clone(),
                        ResourceShape {
                            id,
                            lifecycle,
                            operations: targets(&shape.operations)?,
                            collection_operations: targets(&shape.collection_operations)?,
                            resources: targets(&shape.resources)?,
                            traits,
                        },
                    );
                }
                "operation" => {
                    model
                        .operations
                        .insert(id.clone(), OperationShape { id, traits });
                }
                _ => {
                    if traits.has(AUTH_DEFINITION) {
                        model.auth_definitions.insert(id);
                    }
                }
            }
        }

        model.check_references()?;
        Ok(model)
    }

    fn check_references(&self) -> Result<(), CodegenError> {
        for service in self.services.values() {
            self.check_bindings(&service.id, &service.operations, &service.resources)?;
        }
        for resource in self.resources.values() {
            let ops: Vec<ShapeId> = resource.bound_operations().cloned().collect();
            self.check_bindings(&resource.id, &ops, &resource.resources)?;
        }
        Ok(())
    }

    fn check_bindings(
        &self,
        owner: &ShapeId,
        operations: &[ShapeId],
        resources: &[ShapeId],
    ) -> Result<(), CodegenError> {
        for op in operations {
            if !self.operations.contains_key(op) {
                return Err(CodegenError::malformed(
                    owner.as_str(),
                    format!("operation {op} is not defined as an operation shape"),
                ));
            }
        }
        let mut seen = BTreeSet::new();
        for res in resources {
            if !self.resources.contains_key(res) {
                return Err(CodegenError::malformed(
                    owner.as_str(),
                    format!("resource {res} is not defined as a resource shape"),
                ));
            }
            if !seen.insert(res) {
                return Err(CodegenError::malformed(
                    owner.as_str(),
                    format!("resource {res} is bound more than once"),
                ));
            }
        }
        Ok(())
    }
}

fn targets(list: &[AstTarget]) -> Result<Vec<ShapeId>, CodegenError> {
    list.iter().map(|t| ShapeId::parse(&t.target)).collect()
}
