//! Generation settings loaded from `tscodegen.toml`.
//!
//! The file sits next to the model (or is passed with `--config`) and is
//! optional as long as the command line names the service:
//!
//! ```toml
//! service = "example.weather#Weather"
//! package = "@example/weather-client"
//! package_version = "1.2.0"
//! generate_client = true
//! client_name = "WeatherClient"
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::model::ShapeId;

/// File name looked up next to the model.
pub const SETTINGS_FILE_NAME: &str = "tscodegen.toml";

/// Raw contents of `tscodegen.toml`. Every key is optional here; required
/// values are enforced by [`CodegenSettings::resolve`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SettingsFile {
    /// Service shape id to generate for
    pub service: Option<String>,
    /// npm package name
    pub package: Option<String>,
    /// npm package version
    pub package_version: Option<String>,
    /// Generate a client (`true`) or server-side artifacts only (`false`)
    pub generate_client: Option<bool>,
    /// Name of the generated client class
    pub client_name: Option<String>,
}

/// Values supplied on the command line. They win over the file.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub service: Option<String>,
    pub package: Option<String>,
    /// `--server` turns client generation off
    pub server: bool,
}

/// Settings for one generation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodegenSettings {
    pub service: ShapeId,
    pub package: String,
    pub package_version: String,
    pub generate_client: bool,
    pub client_name: String,
}

impl CodegenSettings {
    /// Settings with every default applied for `service`.
    pub fn for_service(service: ShapeId) -> Self {
        let client_name = format!("{}Client", service.name());
        CodegenSettings {
            package: default_package_name(service.name()),
            package_version: "0.1.0".to_string(),
            generate_client: true,
            client_name,
            service,
        }
    }

    /// Merge the optional file with command line overrides.
    ///
    /// # Errors
    ///
    /// Fails when neither source names a service or the service id is not
    /// a valid shape id.
    pub fn resolve(
        file: Option<SettingsFile>,
        overrides: &SettingsOverrides,
    ) -> anyhow::Result<Self> {
        let file = file.unwrap_or_default();
        let service = overrides
            .service
            .clone()
            .or(file.service)
            .context("No service selected: set `service` in tscodegen.toml or pass --service")?;
        let service = ShapeId::parse(&service)
            .with_context(|| format!("Invalid service shape id `{service}`"))?;

        let mut settings = CodegenSettings::for_service(service);
        if let Some(package) = overrides.package.clone().or(file.package) {
            settings.package = package;
        }
        if let Some(version) = file.package_version {
            settings.package_version = version;
        }
        if let Some(generate_client) = file.generate_client {
            settings.generate_client = generate_client;
        }
        if overrides.server {
            settings.generate_client = false;
        }
        if let Some(client_name) = file.client_name {
            settings.client_name = client_name;
        }
        Ok(settings)
    }
}

fn default_package_name(service_name: &str) -> String {
    let mut kebab = String::with_capacity(service_name.len() + 8);
    for (i, ch) in service_name.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if i > 0 {
                kebab.push('-');
            }
            kebab.push(ch.to_ascii_lowercase());
        } else {
            kebab.push(ch);
        }
    }
    kebab.push_str("-client");
    kebab
}

/// Load settings from a TOML file.
///
/// Returns `Ok(None)` when the file does not exist and an error when it
/// exists but cannot be read or parsed.
pub fn load_settings(config_path: &Path) -> anyhow::Result<Option<SettingsFile>> {
    if !config_path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read settings: {}", config_path.display()))?;

    let settings: SettingsFile = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse settings: {}", config_path.display()))?;

    Ok(Some(settings))
}

/// Look for `tscodegen.toml` in the same directory as the model.
pub fn auto_detect_settings_path(model_path: &Path) -> Option<PathBuf> {
    let config_path = model_path.parent()?.join(SETTINGS_FILE_NAME);
    if config_path.exists() {
        Some(config_path)
    } else {
        None
    }
}

/// Resolve the settings path
///
/// Priority:
/// 1. Explicitly provided path (via CLI)
/// 2. Auto-detected alongside the model
/// 3. None (no settings file)
pub fn resolve_settings_path(explicit_path: Option<&Path>, model_path: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return Some(path.to_path_buf());
    }
    auto_detect_settings_path(model_path)
}
