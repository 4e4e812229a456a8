#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::auth::{is_effective_for_operation, is_effective_for_service};
use crate::endpoint::RenderedLiteral;
use crate::error::CodegenError;
use crate::model::traits::HTTP_API_KEY_AUTH;
use crate::model::{Model, OperationShape, ServiceShape};
use serde_json::json;

const NS: &str = "./src/middleware/Demo";

fn model(op_traits: serde_json::Value) -> Model {
    let mut shapes = json!({
        "ex#Svc": {
            "type": "service",
            "operations": [],
            "traits": {"smithy.api#httpApiKeyAuth": {"name": "x-api-key", "in": "header"}}
        }
    });
    for (name, traits) in op_traits.as_object().unwrap() {
        let id = format!("ex#{name}");
        shapes["ex#Svc"]["operations"]
            .as_array_mut()
            .unwrap()
            .push(json!({"target": id}));
        shapes[id.as_str()] = json!({"type": "operation", "traits": traits});
    }
    Model::from_ast(json!({"shapes": shapes})).unwrap()
}

fn service_effective(model: &Model, service: &ServiceShape) -> bool {
    is_effective_for_service(model, service, HTTP_API_KEY_AUTH)
}

fn operation_effective(model: &Model, service: &ServiceShape, op: &OperationShape) -> bool {
    is_effective_for_operation(model, service, op, HTTP_API_KEY_AUTH)
}

fn api_key_params(
    _: &Model,
    service: &ServiceShape,
    _: Option<&OperationShape>,
) -> Result<PluginParams, CodegenError> {
    let api_key = service.traits.expect_http_api_key_auth(&service.id)?;
    let mut params = PluginParams::new();
    params.insert("in".into(), RenderedLiteral::string(api_key.location.to_string()));
    params.insert("name".into(), RenderedLiteral::string(&api_key.name));
    Ok(params)
}

fn api_key_plugin() -> RuntimeClientPlugin {
    RuntimeClientPlugin::builder("ApiKey")
        .client_config(
            Symbol::new(NS, "InputConfig"),
            Symbol::new(NS, "ResolvedConfig"),
            Symbol::new(NS, "resolveConfig"),
        )
        .service_predicate(service_effective)
        .build()
}

fn api_key_middleware() -> RuntimeClientPlugin {
    RuntimeClientPlugin::builder("ApiKeyMiddleware")
        .plugin_function(Symbol::new(NS, "getPlugin"))
        .params_supplier(api_key_params)
        .operation_predicate(operation_effective)
        .build()
}

#[test]
fn test_optional_and_required_operations() {
    let model = model(json!({
        "OnlyOne": {},
        "Optional": {"smithy.api#optionalAuth": {}}
    }));
    let svc = model.service("ex#Svc").unwrap();
    let composed = compose(&model, svc, &[api_key_plugin(), api_key_middleware()]).unwrap();

    assert_eq!(composed.client.len(), 1);
    assert_eq!(composed.client_configs().count(), 1);
    assert_eq!(composed.client_middleware().count(), 0);

    let only_one = composed.operation_middleware("ex#OnlyOne");
    assert_eq!(only_one.len(), 1);
    assert_eq!(
        only_one[0].call_expression("configuration"),
        r#"getPlugin(configuration, { in: "header", name: "x-api-key" })"#
    );
    assert!(composed.operation_middleware("ex#Optional").is_empty());
    assert!(composed.operations.contains_key("ex#Optional"));
}

#[test]
fn test_all_optional_operations_emit_nothing() {
    let model = model(json!({
        "A": {"smithy.api#optionalAuth": {}},
        "B": {"smithy.api#optionalAuth": {}}
    }));
    let svc = model.service("ex#Svc").unwrap();
    let composed = compose(&model, svc, &[api_key_plugin(), api_key_middleware()]).unwrap();

    assert!(composed.client.is_empty());
    assert_eq!(composed.operations.len(), 2);
    assert!(composed.operations.values().all(Vec::is_empty));
}

#[test]
fn test_composition_is_idempotent() {
    let model = model(json!({"A": {}, "B": {}, "C": {"smithy.api#optionalAuth": {}}}));
    let svc = model.service("ex#Svc").unwrap();
    let plugins = [api_key_plugin(), api_key_middleware()];
    let first = compose(&model, svc, &plugins).unwrap();
    let second = compose(&model, svc, &plugins).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_registration_order_is_kept() {
    let model = model(json!({"A": {}}));
    let svc = model.service("ex#Svc").unwrap();
    let first = RuntimeClientPlugin::builder("First")
        .client_config(
            Symbol::new("./a", "AInput"),
            Symbol::new("./a", "AResolved"),
            Symbol::new("./a", "resolveA"),
        )
        .build();
    let second = RuntimeClientPlugin::builder("Second")
        .client_config(
            Symbol::new("./b", "BInput"),
            Symbol::new("./b", "BResolved"),
            Symbol::new("./b", "resolveB"),
        )
        .build();
    let composed = compose(&model, svc, &[second, first]).unwrap();
    let names: Vec<&str> = composed.client.iter().map(|c| c.plugin.as_str()).collect();
    assert_eq!(names, vec!["Second", "First"]);
}

#[test]
fn test_duplicate_contributions_are_kept_once() {
    let model = model(json!({"A": {}}));
    let svc = model.service("ex#Svc").unwrap();
    let plugins = [
        api_key_plugin(),
        api_key_middleware(),
        api_key_plugin(),
        api_key_middleware(),
    ];
    let composed = compose(&model, svc, &plugins).unwrap();
    assert_eq!(composed.client.len(), 1);
    assert_eq!(composed.operation_middleware("ex#A").len(), 1);
}

#[test]
fn test_absent_predicates() {
    let model = model(json!({"A": {}}));
    let svc = model.service("ex#Svc").unwrap();
    let op = model.operation("ex#A").unwrap();

    let ungated = RuntimeClientPlugin::builder("Ungated")
        .client_config(
            Symbol::new(NS, "I"),
            Symbol::new(NS, "R"),
            Symbol::new(NS, "resolve"),
        )
        .build();
    assert!(ungated.matches_service(&model, svc));
    assert!(!ungated.matches_operation(&model, svc, op));
    assert!(operation_plugins(&model, svc, op, std::slice::from_ref(&ungated)).is_empty());
}

#[test]
fn test_function_without_operation_predicate_is_client_wide() {
    fn no_params(
        _: &Model,
        _: &ServiceShape,
        operation: Option<&OperationShape>,
    ) -> Result<PluginParams, CodegenError> {
        assert!(operation.is_none());
        Ok(PluginParams::new())
    }

    let model = model(json!({"A": {}, "B": {}}));
    let svc = model.service("ex#Svc").unwrap();
    let logger = RuntimeClientPlugin::builder("Logger")
        .plugin_function(Symbol::new("./src/middleware/Logger", "getLoggerPlugin"))
        .params_supplier(no_params)
        .build();
    let composed = compose(&model, svc, &[logger]).unwrap();

    let client_wide: Vec<_> = composed.client_middleware().collect();
    assert_eq!(client_wide.len(), 1);
    assert_eq!(client_wide[0].call_expression("this.config"), "getLoggerPlugin(this.config)");
    assert!(composed.operations.values().all(Vec::is_empty));
}

#[test]
fn test_missing_trait_in_supplier_is_invariant_violation() {
    fn always(_: &Model, _: &ServiceShape, _: &OperationShape) -> bool {
        true
    }
    let model = Model::from_ast(json!({
        "shapes": {
            "ex#Bare": {"type": "service", "operations": [{"target": "ex#A"}]},
            "ex#A": {"type": "operation"}
        }
    }))
    .unwrap();
    let svc = model.service("ex#Bare").unwrap();
    let broken = RuntimeClientPlugin::builder("Broken")
        .plugin_function(Symbol::new(NS, "getPlugin"))
        .params_supplier(api_key_params)
        .operation_predicate(always)
        .build();

    match compose(&model, svc, &[broken]).unwrap_err() {
        CodegenError::InvariantViolation { plugin, scope, .. } => {
            assert_eq!(plugin, "Broken");
            assert!(scope.contains("ex#A"));
        }
        other => panic!("expected InvariantViolation, got {other:?}"),
    }
}

#[test]
fn test_imports_group_symbols_by_module() {
    let model = model(json!({"A": {}}));
    let svc = model.service("ex#Svc").unwrap();
    let composed = compose(&model, svc, &[api_key_plugin(), api_key_middleware()]).unwrap();

    let client = composed.client_imports();
    assert_eq!(client.len(), 1);
    let names: Vec<&str> = client[NS].iter().map(String::as_str).collect();
    assert_eq!(names, vec!["InputConfig", "ResolvedConfig", "resolveConfig"]);

    let op = composed.operation_imports("ex#A");
    assert_eq!(op[NS].len(), 1);
    assert!(composed.operation_imports("ex#Missing").is_empty());
    assert_eq!(composed.imports()[NS].len(), 4);
}
