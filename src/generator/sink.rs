use anyhow::Context;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};

/// First line of every generated TypeScript file.
pub const GENERATED_HEADER: &str = "// smithy-typescript generated code";

/// npm packages generated code can depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum TypeScriptDependency {
    SmithyTypes,
    SmithyClient,
    MiddlewareStack,
    ProtocolHttp,
    UtilMiddleware,
    Tslib,
    Typescript,
    Vitest,
}

/// Which `package.json` section a dependency belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyKind {
    Runtime,
    Dev,
}

impl TypeScriptDependency {
    pub fn package(self) -> &'static str {
        match self {
            TypeScriptDependency::SmithyTypes => "@smithy/types",
            TypeScriptDependency::SmithyClient => "@smithy/smithy-client",
            TypeScriptDependency::MiddlewareStack => "@smithy/middleware-stack",
            TypeScriptDependency::ProtocolHttp => "@smithy/protocol-http",
            TypeScriptDependency::UtilMiddleware => "@smithy/util-middleware",
            TypeScriptDependency::Tslib => "tslib",
            TypeScriptDependency::Typescript => "typescript",
            TypeScriptDependency::Vitest => "vitest",
        }
    }

    pub fn version(self) -> &'static str {
        match self {
            TypeScriptDependency::SmithyTypes
            | TypeScriptDependency::SmithyClient
            | TypeScriptDependency::MiddlewareStack
            | TypeScriptDependency::ProtocolHttp
            | TypeScriptDependency::UtilMiddleware => "^4.0.0",
            TypeScriptDependency::Tslib => "^2.6.2",
            TypeScriptDependency::Typescript => "~5.8.3",
            TypeScriptDependency::Vitest => "^3.0.0",
        }
    }

    pub fn kind(self) -> DependencyKind {
        match self {
            TypeScriptDependency::Typescript | TypeScriptDependency::Vitest => DependencyKind::Dev,
            _ => DependencyKind::Runtime,
        }
    }
}

/// Destination for generated text.
///
/// Integrations only ever append: several contributors may write to the
/// same file (e.g. `src/index.ts`) and their fragments are kept in call
/// order.
pub trait FragmentSink {
    /// Append `text` to the file at the package-relative `path`. A trailing
    /// newline is added when `text` lacks one.
    fn write_fragment(&mut self, path: &str, text: &str);

    /// Record a package dependency of the generated code.
    fn add_dependency(&mut self, dependency: TypeScriptDependency);
}

/// In-memory staging area for one generation pass.
///
/// Nothing touches disk until [`commit`](WriterDelegator::commit), so a
/// failed pass leaves the output directory untouched.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WriterDelegator {
    files: BTreeMap<String, String>,
    dependencies: BTreeSet<TypeScriptDependency>,
}

impl WriterDelegator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Staged content of one file.
    pub fn file(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    /// Every staged file, sorted by path.
    pub fn files(&self) -> impl Iterator<Item = (&str, &str)> {
        self.files.iter().map(|(p, c)| (p.as_str(), c.as_str()))
    }

    pub fn dependencies(&self) -> impl Iterator<Item = TypeScriptDependency> + '_ {
        self.dependencies.iter().copied()
    }

    /// Write every staged file below `out_dir`, creating directories as
    /// needed. Returns the written paths.
    ///
    /// # Errors
    ///
    /// Fails when a staged path would leave `out_dir` or when the
    /// filesystem refuses a write.
    pub fn commit(&self, out_dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(self.files.len());
        for (relative, contents) in &self.files {
            let rel = Path::new(relative);
            if rel
                .components()
                .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
            {
                anyhow::bail!("refusing to write outside the output directory: {relative}");
            }
            let path = out_dir.join(rel);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory {parent:?}"))?;
            }
            fs::write(&path, contents).with_context(|| format!("Failed to write {path:?}"))?;
            println!("✅ Generated {relative}");
            written.push(path);
        }
        info!(out_dir = %out_dir.display(), files = written.len(), "committed generated files");
        Ok(written)
    }
}

impl FragmentSink for WriterDelegator {
    fn write_fragment(&mut self, path: &str, text: &str) {
        let buffer = self.files.entry(path.to_string()).or_insert_with(|| {
            if path.ends_with(".ts") {
                format!("{GENERATED_HEADER}\n")
            } else {
                String::new()
            }
        });
        buffer.push_str(text);
        if !text.ends_with('\n') {
            buffer.push('\n');
        }
        debug!(path, bytes = text.len(), "staged fragment");
    }

    fn add_dependency(&mut self, dependency: TypeScriptDependency) {
        self.dependencies.insert(dependency);
    }
}
