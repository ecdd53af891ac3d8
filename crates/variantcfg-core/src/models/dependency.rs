//! Dependency coordinate models.

use serde::{Deserialize, Serialize};

use crate::error::VariantError;

/// Maven-style coordinate `group:artifact[:version]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Coordinate {
    pub group: String,
    pub artifact: String,
    pub version: Option<String>,
}

impl Coordinate {
    /// `group:artifact` without the version suffix.
    pub fn module(&self) -> String {
        format!("{}:{}", self.group, self.artifact)
    }
}

impl std::str::FromStr for Coordinate {
    type Err = VariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split(':').collect();
        let valid = |p: &&str| !p.is_empty() && !p.chars().any(char::is_whitespace);

        match parts.as_slice() {
            [group, artifact] if valid(group) && valid(artifact) => Ok(Coordinate {
                group: group.to_string(),
                artifact: artifact.to_string(),
                version: None,
            }),
            [group, artifact, version] if valid(group) && valid(artifact) && valid(version) => {
                Ok(Coordinate {
                    group: group.to_string(),
                    artifact: artifact.to_string(),
                    version: Some(version.to_string()),
                })
            }
            _ => Err(VariantError::InvalidCoordinate(s.to_string())),
        }
    }
}

impl TryFrom<String> for Coordinate {
    type Error = VariantError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Coordinate> for String {
    fn from(value: Coordinate) -> Self {
        value.to_string()
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{}:{}:{}", self.group, self.artifact, version),
            None => write!(f, "{}:{}", self.group, self.artifact),
        }
    }
}

/// How the toolchain consumes a declared dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DependencyRole {
    /// Version platform (BOM); contributes constraints only.
    Platform,
    /// Linked into the application at runtime.
    RuntimeLinked,
    /// Java library desugaring runtime.
    CoreLibraryDesugaring,
}

impl DependencyRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            DependencyRole::Platform => "platform",
            DependencyRole::RuntimeLinked => "runtime-linked",
            DependencyRole::CoreLibraryDesugaring => "core-library-desugaring",
        }
    }

    /// Gradle configuration the dependency is added to.
    pub fn configuration(&self) -> &'static str {
        match self {
            DependencyRole::Platform | DependencyRole::RuntimeLinked => "implementation",
            DependencyRole::CoreLibraryDesugaring => "coreLibraryDesugaring",
        }
    }
}

impl std::fmt::Display for DependencyRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry of the dependency declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlignedDependency {
    pub coordinate: Coordinate,
    pub role: DependencyRole,
}

/// A BOM pin plus the libraries whose versions it dictates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyAlignment {
    pub bom: Coordinate,
    pub aligned: Vec<Coordinate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_versioned_coordinate() {
        let c: Coordinate = "com.google.firebase:firebase-bom:33.7.0".parse().unwrap();
        assert_eq!(c.group, "com.google.firebase");
        assert_eq!(c.artifact, "firebase-bom");
        assert_eq!(c.version.as_deref(), Some("33.7.0"));
        assert_eq!(c.module(), "com.google.firebase:firebase-bom");
    }

    #[test]
    fn test_parse_unversioned_coordinate() {
        let c: Coordinate = "com.google.firebase:firebase-messaging".parse().unwrap();
        assert!(c.version.is_none());
        assert_eq!(c.to_string(), "com.google.firebase:firebase-messaging");
    }

    #[test]
    fn test_parse_invalid_coordinates() {
        for bad in ["", "firebase", "a::b", "a:b:c:d", "a b:c", "a:b:"] {
            assert!(bad.parse::<Coordinate>().is_err(), "expected error for {:?}", bad);
        }
    }

    #[test]
    fn test_role_configurations() {
        assert_eq!(DependencyRole::RuntimeLinked.configuration(), "implementation");
        assert_eq!(
            DependencyRole::CoreLibraryDesugaring.configuration(),
            "coreLibraryDesugaring"
        );
    }
}
