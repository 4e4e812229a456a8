//! Client config and middleware for services with `@httpApiKeyAuth`.
//!
//! The middleware injects the configured API key into a named header
//! (optionally prefixed with a scheme) or a named query parameter, as
//! declared by the trait.

use tracing::debug;

use super::Integration;
use crate::auth::{is_effective_for_operation, is_effective_for_service};
use crate::endpoint::RenderedLiteral;
use crate::error::CodegenError;
use crate::generator::{CodegenContext, TypeScriptDependency};
use crate::model::traits::HTTP_API_KEY_AUTH;
use crate::model::{Model, OperationShape, ServiceShape};
use crate::plugin::{PluginParams, RuntimeClientPlugin, Symbol};

pub const INTEGRATION_NAME: &str = "HttpApiKeyAuth";

const MIDDLEWARE_NAMESPACE: &str = "./src/middleware/HttpApiKeyAuth";
const MIDDLEWARE_SOURCE: &str = "http-api-key-auth.ts";
const MIDDLEWARE_SPEC: &str = "http-api-key-auth.spec.ts";

/// Written ahead of each copied resource, followed by the resource name.
pub const NO_TOUCH_NOTICE_PREFIX: &str = "// Please do not touch this file. It's generated from a template in:\n\
// https://github.com/awslabs/smithy-typescript/blob/main/smithy-typescript-codegen/\
src/main/resources/software/amazon/smithy/aws/typescript/codegen/integration/";

#[derive(Debug, Clone, Copy, Default)]
pub struct HttpApiKeyAuthIntegration;

fn has_effective_api_key_auth(model: &Model, service: &ServiceShape) -> bool {
    is_effective_for_service(model, service, HTTP_API_KEY_AUTH)
}

fn operation_uses_api_key_auth(
    model: &Model,
    service: &ServiceShape,
    operation: &OperationShape,
) -> bool {
    is_effective_for_operation(model, service, operation, HTTP_API_KEY_AUTH)
}

/// `in` and `name` are required members of the trait, `scheme` is not.
fn api_key_params(
    _: &Model,
    service: &ServiceShape,
    _: Option<&OperationShape>,
) -> Result<PluginParams, CodegenError> {
    let api_key = service.traits.expect_http_api_key_auth(&service.id)?;
    let mut params = PluginParams::new();
    params.insert(
        "in".to_string(),
        RenderedLiteral::string(api_key.location.to_string()),
    );
    params.insert("name".to_string(), RenderedLiteral::string(&api_key.name));
    if let Some(scheme) = &api_key.scheme {
        params.insert("scheme".to_string(), RenderedLiteral::string(scheme));
    }
    Ok(params)
}

impl Integration for HttpApiKeyAuthIntegration {
    fn name(&self) -> &'static str {
        INTEGRATION_NAME
    }

    fn client_plugins(&self) -> Vec<RuntimeClientPlugin> {
        vec![
            RuntimeClientPlugin::builder(INTEGRATION_NAME)
                .client_config(
                    Symbol::new(MIDDLEWARE_NAMESPACE, "HttpApiKeyAuthInputConfig"),
                    Symbol::new(MIDDLEWARE_NAMESPACE, "HttpApiKeyAuthResolvedConfig"),
                    Symbol::new(MIDDLEWARE_NAMESPACE, "resolveHttpApiKeyAuthConfig"),
                )
                .service_predicate(has_effective_api_key_auth)
                .build(),
            RuntimeClientPlugin::builder(INTEGRATION_NAME)
                .plugin_function(Symbol::new(MIDDLEWARE_NAMESPACE, "getHttpApiKeyAuthPlugin"))
                .params_supplier(api_key_params)
                .operation_predicate(operation_uses_api_key_auth)
                .build(),
        ]
    }

    fn customize(&self, ctx: &mut CodegenContext<'_>) -> Result<(), CodegenError> {
        if !has_effective_api_key_auth(ctx.model, ctx.service) {
            debug!(service = %ctx.service.id, "API key auth not effective, nothing to write");
            return Ok(());
        }

        ctx.writers.add_dependency(TypeScriptDependency::UtilMiddleware);
        ctx.writers.add_dependency(TypeScriptDependency::ProtocolHttp);
        ctx.write_resource(
            "src/middleware/HttpApiKeyAuth/index.ts",
            NO_TOUCH_NOTICE_PREFIX,
            MIDDLEWARE_SOURCE,
        )?;

        ctx.writers.add_dependency(TypeScriptDependency::Vitest);
        ctx.write_resource(
            "src/middleware/HttpApiKeyAuth/index.spec.ts",
            NO_TOUCH_NOTICE_PREFIX,
            MIDDLEWARE_SPEC,
        )?;

        if ctx.settings.generate_client {
            ctx.writers.write_fragment(
                "src/index.ts",
                &format!("export * from \"./middleware/{INTEGRATION_NAME}\";"),
            );
        }
        Ok(())
    }
}
