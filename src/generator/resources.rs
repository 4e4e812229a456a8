use crate::error::CodegenError;

/// Read-only access to static files bundled with the generator.
pub trait ResourceProvider {
    /// Bytes of the resource called `name`.
    fn read_resource(&self, name: &str) -> Result<&[u8], CodegenError>;

    /// Same as [`read_resource`](Self::read_resource), decoded as UTF-8.
    fn read_utf8(&self, name: &str) -> Result<&str, CodegenError> {
        std::str::from_utf8(self.read_resource(name)?)
            .map_err(|e| CodegenError::malformed(name, format!("resource is not UTF-8: {e}")))
    }
}

/// Resources compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedResources;

const EMBEDDED: &[(&str, &[u8])] = &[
    (
        "http-api-key-auth.ts",
        include_bytes!("../../resources/http-api-key-auth.ts"),
    ),
    (
        "http-api-key-auth.spec.ts",
        include_bytes!("../../resources/http-api-key-auth.spec.ts"),
    ),
];

impl EmbeddedResources {
    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        EMBEDDED.iter().map(|(name, _)| *name)
    }
}

impl ResourceProvider for EmbeddedResources {
    fn read_resource(&self, name: &str) -> Result<&[u8], CodegenError> {
        EMBEDDED
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, bytes)| *bytes)
            .ok_or_else(|| CodegenError::MissingResource(name.to_string()))
    }
}
