//! Project configuration parsing.
//!
//! Supports both YAML and HUML formats.

use std::io::ErrorKind;
use std::path::Path;

use crate::error::{Result, VariantError};
use crate::models::{
    ProjectConfig, ANDROID_APPLICATION_PLUGIN, FLUTTER_PLUGIN, KOTLIN_ANDROID_PLUGIN,
};

/// Default project config file name, looked up in the build root.
pub const PROJECT_CONFIG_FILE: &str = "variantcfg.huml";

/// Format of the project configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Huml,
}

// Supported fields (all optional, defaults in parentheses).
//
// namespace: string            # (com.bartop.app)
// application_id: string       # (com.bartop.app)
// compile_sdk: int             # (36)
// target_sdk: int              # (35)
// compile_options:
//   java_version: int          # (11)
//   jvm_target: string         # ("11")
//   core_library_desugaring: bool  # (true)
// plugins: [plugin id...]      # application order
// credentials_file: string     # (key.properties)
// release:
//   platform_rules: string     # (proguard-android-optimize.txt)
//   project_rules: string      # (proguard-rules.pro)
// dependencies:
//   bom: group:artifact:version
//   aligned: [group:artifact...]
//   desugaring: group:artifact:version

/// Parses a YAML string into a ProjectConfig.
pub fn parse_project_config(yaml_content: &str) -> Result<ProjectConfig> {
    let parsed: ProjectConfig = serde_yaml::from_str(yaml_content)
        .map_err(|e| VariantError::ConfigParse(format!("Invalid YAML: {}", e)))?;

    validate_project_config(&parsed)?;
    Ok(parsed)
}

/// Parses a HUML string into a ProjectConfig.
pub fn parse_project_config_huml(huml_content: &str) -> Result<ProjectConfig> {
    let parsed: ProjectConfig = huml_rs::serde::from_str(huml_content)
        .map_err(|e| VariantError::ConfigParse(format!("Invalid HUML: {}", e)))?;

    validate_project_config(&parsed)?;
    Ok(parsed)
}

/// Parses a project config, auto-detecting format from content.
///
/// - If starts with `%HUML` → parse as HUML
/// - Otherwise → parse as YAML
pub fn parse_project_config_auto(content: &str) -> Result<(ProjectConfig, ConfigFormat)> {
    let trimmed = content.trim_start();

    if trimmed.starts_with("%HUML") {
        let config = parse_project_config_huml(content)?;
        Ok((config, ConfigFormat::Huml))
    } else {
        let config = parse_project_config(content)?;
        Ok((config, ConfigFormat::Yaml))
    }
}

/// Loads a project config file.
///
/// Returns `Ok(None)` if the file doesn't exist.
/// Returns an error if the file exists but is invalid.
pub fn load_project_config(path: &Path) -> Result<Option<ProjectConfig>> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(VariantError::Io {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    let (config, format) = parse_project_config_auto(&content)?;
    tracing::debug!("Loaded {:?} project config from {}", format, path.display());

    Ok(Some(config))
}

/// Validates that the config is internally consistent.
pub fn validate_project_config(config: &ProjectConfig) -> Result<()> {
    if config.namespace.trim().is_empty() {
        return Err(VariantError::Configuration("namespace must not be empty".to_string()));
    }
    if config.application_id.trim().is_empty() {
        return Err(VariantError::Configuration(
            "application_id must not be empty".to_string(),
        ));
    }

    if config.target_sdk > config.compile_sdk {
        return Err(VariantError::Configuration(format!(
            "target_sdk {} exceeds compile_sdk {}",
            config.target_sdk, config.compile_sdk
        )));
    }

    if config.credentials_file.trim().is_empty() {
        return Err(VariantError::Configuration(
            "credentials_file must not be empty".to_string(),
        ));
    }

    if config.release.platform_rules.trim().is_empty()
        || config.release.project_rules.trim().is_empty()
    {
        return Err(VariantError::Configuration(
            "release rule file names must not be empty".to_string(),
        ));
    }

    validate_plugin_order(&config.plugins)?;
    config.dependencies.alignment().validate()?;

    if config.compile_options.core_library_desugaring && config.dependencies.desugaring.is_none() {
        return Err(VariantError::Configuration(
            "core_library_desugaring requires dependencies.desugaring".to_string(),
        ));
    }

    Ok(())
}

/// Validates plugin application order.
///
/// The Android application plugin is required, no plugin may repeat, and the
/// Flutter plugin must be applied after the Android and Kotlin plugins.
pub fn validate_plugin_order(plugins: &[String]) -> Result<()> {
    let position = |id: &str| plugins.iter().position(|p| p == id);

    for (i, plugin) in plugins.iter().enumerate() {
        if plugins[..i].contains(plugin) {
            return Err(VariantError::Configuration(format!(
                "Plugin '{}' is applied more than once",
                plugin
            )));
        }
    }

    let Some(android) = position(ANDROID_APPLICATION_PLUGIN) else {
        return Err(VariantError::Configuration(format!(
            "Plugin '{}' is required",
            ANDROID_APPLICATION_PLUGIN
        )));
    };

    if let Some(flutter) = position(FLUTTER_PLUGIN) {
        if flutter < android {
            return Err(VariantError::Configuration(format!(
                "Plugin '{}' must be applied after '{}'",
                FLUTTER_PLUGIN, ANDROID_APPLICATION_PLUGIN
            )));
        }
        if let Some(kotlin) = position(KOTLIN_ANDROID_PLUGIN) {
            if flutter < kotlin {
                return Err(VariantError::Configuration(format!(
                    "Plugin '{}' must be applied after '{}'",
                    FLUTTER_PLUGIN, KOTLIN_ANDROID_PLUGIN
                )));
            }
        }
    }

    Ok(())
}
