//! # Auth Applicability
//!
//! Decides whether an auth scheme is *live* for a service as a whole and
//! for each of its operations.
//!
//! A scheme listed in a service's effective set still does not need any
//! client-level configuration when every operation of the service opts out
//! of mandatory auth with `@optionalAuth`. As soon as one operation does
//! not opt out, or has no effective scheme at all, the service-level config
//! must exist.
//!
//! An operation receives the scheme's middleware only when the scheme is in
//! its own effective set and it does not carry `@optionalAuth`.

use tracing::debug;

use crate::model::{Model, OperationShape, ServiceShape};

/// True when `scheme` is effective for the service and at least one
/// contained operation still requires auth.
pub fn is_effective_for_service(model: &Model, service: &ServiceShape, scheme: &str) -> bool {
    let listed = model.effective_auth_schemes(service).contains(scheme);
    let effective = listed && !all_operations_optional_auth(model, service);
    debug!(
        service = %service.id,
        scheme,
        listed,
        effective,
        "service auth applicability"
    );
    effective
}

/// True when `scheme` is in the operation's effective set and the
/// operation does not carry `@optionalAuth`.
pub fn is_effective_for_operation(
    model: &Model,
    service: &ServiceShape,
    operation: &OperationShape,
    scheme: &str,
) -> bool {
    model
        .effective_operation_auth_schemes(service, operation)
        .contains(scheme)
        && !operation.traits.optional_auth()
}

/// True when every contained operation has at least one effective scheme
/// and carries `@optionalAuth`. Vacuously true for a service without
/// operations.
pub fn all_operations_optional_auth(model: &Model, service: &ServiceShape) -> bool {
    model.contained_operations(service).into_iter().all(|op| {
        !model.effective_operation_auth_schemes(service, op).is_empty()
            && op.traits.optional_auth()
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::model::traits::HTTP_API_KEY_AUTH;
    use serde_json::{json, Value};

    fn model_with_ops(ops: Value) -> Model {
        let mut shapes = json!({
            "ex#Svc": {
                "type": "service",
                "operations": [],
                "traits": {"smithy.api#httpApiKeyAuth": {"name": "x-api-key", "in": "header"}}
            }
        });
        for (name, traits) in ops.as_object().unwrap() {
            let id = format!("ex#{name}");
            shapes["ex#Svc"]["operations"]
                .as_array_mut()
                .unwrap()
                .push(json!({"target": id}));
            shapes[id.as_str()] = json!({"type": "operation", "traits": traits});
        }
        Model::from_ast(json!({"shapes": shapes})).unwrap()
    }

    #[test]
    fn test_all_optional_disables_service_config() {
        let model = model_with_ops(json!({
            "A": {"smithy.api#optionalAuth": {}},
            "B": {"smithy.api#optionalAuth": {}}
        }));
        let svc = model.service("ex#Svc").unwrap();
        assert!(all_operations_optional_auth(&model, svc));
        assert!(!is_effective_for_service(&model, svc, HTTP_API_KEY_AUTH));
    }

    #[test]
    fn test_one_required_operation_keeps_service_config() {
        let model = model_with_ops(json!({
            "A": {"smithy.api#optionalAuth": {}},
            "B": {}
        }));
        let svc = model.service("ex#Svc").unwrap();
        assert!(is_effective_for_service(&model, svc, HTTP_API_KEY_AUTH));

        let a = model.operation("ex#A").unwrap();
        let b = model.operation("ex#B").unwrap();
        assert!(!is_effective_for_operation(&model, svc, a, HTTP_API_KEY_AUTH));
        assert!(is_effective_for_operation(&model, svc, b, HTTP_API_KEY_AUTH));
    }

    #[test]
    fn test_operation_without_schemes_forces_service_config() {
        let model = model_with_ops(json!({
            "A": {"smithy.api#optionalAuth": {}},
            "B": {"smithy.api#optionalAuth": {}, "smithy.api#auth": []}
        }));
        let svc = model.service("ex#Svc").unwrap();
        assert!(!all_operations_optional_auth(&model, svc));
        assert!(is_effective_for_service(&model, svc, HTTP_API_KEY_AUTH));

        let b = model.operation("ex#B").unwrap();
        assert!(!is_effective_for_operation(&model, svc, b, HTTP_API_KEY_AUTH));
    }

    #[test]
    fn test_unlisted_scheme_is_never_effective() {
        let model = model_with_ops(json!({"A": {}}));
        let svc = model.service("ex#Svc").unwrap();
        let a = model.operation("ex#A").unwrap();
        assert!(!is_effective_for_service(&model, svc, "smithy.api#httpBearerAuth"));
        assert!(!is_effective_for_operation(&model, svc, a, "smithy.api#httpBearerAuth"));
    }

    #[test]
    fn test_service_without_operations_is_vacuously_optional() {
        let model = model_with_ops(json!({}));
        let svc = model.service("ex#Svc").unwrap();
        assert!(all_operations_optional_auth(&model, svc));
        assert!(!is_effective_for_service(&model, svc, HTTP_API_KEY_AUTH));
    }
}
