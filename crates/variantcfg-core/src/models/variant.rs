//! Build variant models.

use serde::{Deserialize, Serialize};

use super::SigningIdentity;

/// Build profile name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariantName {
    Debug,
    Release,
}

impl VariantName {
    pub fn as_str(&self) -> &'static str {
        match self {
            VariantName::Debug => "debug",
            VariantName::Release => "release",
        }
    }
}

impl std::str::FromStr for VariantName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(VariantName::Debug),
            "release" => Ok(VariantName::Release),
            _ => Err(format!("Unknown build variant: {}", s)),
        }
    }
}

impl std::fmt::Display for VariantName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Origin of an obfuscation rule file.
///
/// Variant order matters: platform defaults sort before project rules so the
/// project file can override them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleSource {
    /// Rules shipped with the platform toolchain, referenced by file name.
    PlatformDefault,
    /// Rules checked into the project, relative to the module directory.
    Project,
}

/// A single obfuscation rule file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObfuscationRuleFile {
    pub source: RuleSource,
    pub file: String,
}

impl ObfuscationRuleFile {
    pub fn platform_default(file: impl Into<String>) -> Self {
        Self {
            source: RuleSource::PlatformDefault,
            file: file.into(),
        }
    }

    pub fn project(file: impl Into<String>) -> Self {
        Self {
            source: RuleSource::Project,
            file: file.into(),
        }
    }
}

/// A fully resolved build variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildVariant {
    pub name: VariantName,
    pub minify: bool,
    pub shrink_resources: bool,
    pub obfuscation_rule_files: Vec<ObfuscationRuleFile>,
    pub signing_identity: SigningIdentity,
}

impl BuildVariant {
    /// Whether any hardening transform applies to this variant.
    pub fn is_hardened(&self) -> bool {
        self.minify || self.shrink_resources || !self.obfuscation_rule_files.is_empty()
    }
}

/// Both variants produced by one resolution pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedVariants {
    pub debug: BuildVariant,
    pub release: BuildVariant,
}

impl ResolvedVariants {
    pub fn get(&self, name: VariantName) -> &BuildVariant {
        match name {
            VariantName::Debug => &self.debug,
            VariantName::Release => &self.release,
        }
    }

    /// True when the release variant fell back to the ambient debug identity.
    pub fn release_is_debug_signed(&self) -> bool {
        self.release.signing_identity.is_debug()
    }
}
