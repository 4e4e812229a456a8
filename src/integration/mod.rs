//! # Integrations
//!
//! An integration bundles everything one feature adds to a generation pass:
//! the runtime client plugins it registers and any extra files or lines it
//! writes once the base artifacts exist.
//!
//! Integrations run in the order returned by [`default_integrations`], and
//! that order is also the registration order of their plugins.

mod endpoint_parameters;
mod http_api_key_auth;

pub use endpoint_parameters::EndpointParametersIntegration;
pub use http_api_key_auth::HttpApiKeyAuthIntegration;

use crate::error::CodegenError;
use crate::generator::CodegenContext;
use crate::plugin::RuntimeClientPlugin;

/// A unit of generator customization.
pub trait Integration {
    /// Stable name used in logs and plugin registrations.
    fn name(&self) -> &'static str;

    /// Plugins this integration registers, in order.
    fn client_plugins(&self) -> Vec<RuntimeClientPlugin> {
        Vec::new()
    }

    /// Write additional fragments after the base artifacts are staged.
    fn customize(&self, _ctx: &mut CodegenContext<'_>) -> Result<(), CodegenError> {
        Ok(())
    }
}

/// Integrations shipped with the generator.
pub fn default_integrations() -> Vec<Box<dyn Integration>> {
    vec![
        Box::new(EndpointParametersIntegration),
        Box::new(HttpApiKeyAuthIntegration),
    ]
}
