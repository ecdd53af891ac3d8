//! Project-level build configuration.
//!
//! Mirrors the declarative part of an Android application module: identity,
//! SDK levels, compile options, plugin order, hardening rule files and
//! dependency alignment. Every field has a default so a config file only
//! needs to list what differs.

use serde::{Deserialize, Serialize};

use super::{Coordinate, DependencyAlignment, ObfuscationRuleFile};

/// Plugin id of the Android application plugin.
pub const ANDROID_APPLICATION_PLUGIN: &str = "com.android.application";
/// Plugin id of the Kotlin Android plugin.
pub const KOTLIN_ANDROID_PLUGIN: &str = "kotlin-android";
/// Plugin id of the Flutter Gradle plugin.
pub const FLUTTER_PLUGIN: &str = "dev.flutter.flutter-gradle-plugin";
/// Plugin id of the Google services plugin.
pub const GOOGLE_SERVICES_PLUGIN: &str = "com.google.gms.google-services";

/// Default name of the credential file, relative to the build root.
pub const DEFAULT_CREDENTIALS_FILE: &str = "key.properties";

/// Project build configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default = "default_application_id")]
    pub namespace: String,

    #[serde(default = "default_application_id")]
    pub application_id: String,

    #[serde(default = "default_compile_sdk")]
    pub compile_sdk: u32,

    #[serde(default = "default_target_sdk")]
    pub target_sdk: u32,

    #[serde(default)]
    pub compile_options: CompileOptions,

    /// Plugin ids in application order.
    #[serde(default = "default_plugins")]
    pub plugins: Vec<String>,

    /// Credential file path, relative to the build root.
    #[serde(default = "default_credentials_file")]
    pub credentials_file: String,

    #[serde(default)]
    pub release: ReleaseRules,

    #[serde(default)]
    pub dependencies: DependencyConfig,
}

fn default_application_id() -> String {
    "com.bartop.app".to_string()
}

fn default_compile_sdk() -> u32 {
    36
}

fn default_target_sdk() -> u32 {
    35
}

fn default_plugins() -> Vec<String> {
    [
        ANDROID_APPLICATION_PLUGIN,
        KOTLIN_ANDROID_PLUGIN,
        FLUTTER_PLUGIN,
        GOOGLE_SERVICES_PLUGIN,
    ]
    .iter()
    .map(|p| p.to_string())
    .collect()
}

fn default_credentials_file() -> String {
    DEFAULT_CREDENTIALS_FILE.to_string()
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            namespace: default_application_id(),
            application_id: default_application_id(),
            compile_sdk: default_compile_sdk(),
            target_sdk: default_target_sdk(),
            compile_options: CompileOptions::default(),
            plugins: default_plugins(),
            credentials_file: default_credentials_file(),
            release: ReleaseRules::default(),
            dependencies: DependencyConfig::default(),
        }
    }
}

/// Java compile options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileOptions {
    /// Source and target compatibility level.
    #[serde(default = "default_java_version")]
    pub java_version: u32,

    #[serde(default = "default_jvm_target")]
    pub jvm_target: String,

    /// Whether newer Java APIs are desugared for older devices.
    #[serde(default = "default_true")]
    pub core_library_desugaring: bool,
}

fn default_java_version() -> u32 {
    11
}

fn default_jvm_target() -> String {
    "11".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            java_version: default_java_version(),
            jvm_target: default_jvm_target(),
            core_library_desugaring: true,
        }
    }
}

/// Obfuscation rule files applied to the release variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseRules {
    /// File name of the toolchain-provided default rules.
    #[serde(default = "default_platform_rules")]
    pub platform_rules: String,

    /// Project rules file, relative to the application module.
    #[serde(default = "default_project_rules")]
    pub project_rules: String,
}

fn default_platform_rules() -> String {
    "proguard-android-optimize.txt".to_string()
}

fn default_project_rules() -> String {
    "proguard-rules.pro".to_string()
}

impl Default for ReleaseRules {
    fn default() -> Self {
        Self {
            platform_rules: default_platform_rules(),
            project_rules: default_project_rules(),
        }
    }
}

impl ReleaseRules {
    pub fn rule_files(&self) -> Vec<ObfuscationRuleFile> {
        vec![
            ObfuscationRuleFile::platform_default(&self.platform_rules),
            ObfuscationRuleFile::project(&self.project_rules),
        ]
    }
}

/// Declared dependencies: one BOM, its aligned libraries, and the
/// standalone desugaring runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyConfig {
    #[serde(default = "default_bom")]
    pub bom: Coordinate,

    #[serde(default = "default_aligned")]
    pub aligned: Vec<Coordinate>,

    /// Carries its own version; not governed by the BOM.
    #[serde(default = "default_desugaring")]
    pub desugaring: Option<Coordinate>,
}

/// Firebase BOM pinned by the application.
pub fn default_bom() -> Coordinate {
    Coordinate {
        group: "com.google.firebase".to_string(),
        artifact: "firebase-bom".to_string(),
        version: Some("33.7.0".to_string()),
    }
}

fn default_aligned() -> Vec<Coordinate> {
    ["firebase-messaging", "firebase-analytics"]
        .iter()
        .map(|artifact| Coordinate {
            group: "com.google.firebase".to_string(),
            artifact: artifact.to_string(),
            version: None,
        })
        .collect()
}

fn default_desugaring() -> Option<Coordinate> {
    Some(Coordinate {
        group: "com.android.tools".to_string(),
        artifact: "desugar_jdk_libs".to_string(),
        version: Some("2.1.4".to_string()),
    })
}

impl Default for DependencyConfig {
    fn default() -> Self {
        Self {
            bom: default_bom(),
            aligned: default_aligned(),
            desugaring: default_desugaring(),
        }
    }
}

impl DependencyConfig {
    /// Configuration for the given BOM with the default library set.
    pub fn for_bom(bom: Coordinate) -> Self {
        Self {
            bom,
            ..Self::default()
        }
    }

    pub fn alignment(&self) -> DependencyAlignment {
        DependencyAlignment {
            bom: self.bom.clone(),
            aligned: self.aligned.clone(),
        }
    }
}
