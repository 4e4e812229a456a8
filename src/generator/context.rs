use super::resources::ResourceProvider;
use super::settings::CodegenSettings;
use super::sink::FragmentSink;
use crate::model::{Model, ServiceShape};

/// Everything an integration sees while customizing a generation pass.
pub struct CodegenContext<'a> {
    pub model: &'a Model,
    pub service: &'a ServiceShape,
    pub settings: &'a CodegenSettings,
    pub resources: &'a dyn ResourceProvider,
    pub writers: &'a mut dyn FragmentSink,
}

impl CodegenContext<'_> {
    /// Append a static resource to `path`, preceded by `prefix` and the
    /// resource name on the same line.
    pub fn write_resource(
        &mut self,
        path: &str,
        prefix: &str,
        resource: &str,
    ) -> Result<(), crate::error::CodegenError> {
        let resources = self.resources;
        let source = resources.read_utf8(resource)?;
        self.writers.write_fragment(path, &format!("{prefix}{resource}"));
        self.writers.write_fragment(path, source);
        Ok(())
    }
}
