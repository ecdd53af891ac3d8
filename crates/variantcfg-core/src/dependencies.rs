//! Dependency alignment declaration.
//!
//! The BOM is the single source of truth for the versions of the libraries
//! aligned to it. The declaration produced here is what the toolchain's
//! resolver consumes; conflicts it would hit later are rejected up front.

use std::collections::HashSet;

use crate::error::{Result, VariantError};
use crate::models::{AlignedDependency, Coordinate, DependencyAlignment, DependencyConfig, DependencyRole};

impl DependencyAlignment {
    /// Checks the single-version-source invariant.
    pub fn validate(&self) -> Result<()> {
        if self.bom.version.is_none() {
            return Err(VariantError::Configuration(format!(
                "BOM {} must declare a version",
                self.bom
            )));
        }

        let mut seen = HashSet::new();
        seen.insert(self.bom.module());

        for library in &self.aligned {
            if let Some(version) = &library.version {
                return Err(VariantError::DependencyVersionConflict {
                    coordinate: library.module(),
                    version: version.clone(),
                });
            }
            if !seen.insert(library.module()) {
                return Err(VariantError::Configuration(format!(
                    "Duplicate aligned dependency: {}",
                    library.module()
                )));
            }
        }

        Ok(())
    }
}

/// Builds the ordered dependency declaration for a configuration.
///
/// Order: the BOM platform, the aligned libraries as listed, then the
/// standalone desugaring library.
pub fn declare_dependencies(config: &DependencyConfig) -> Result<Vec<AlignedDependency>> {
    let alignment = config.alignment();
    alignment.validate()?;

    let mut declared = Vec::with_capacity(alignment.aligned.len() + 2);
    declared.push(AlignedDependency {
        coordinate: alignment.bom.clone(),
        role: DependencyRole::Platform,
    });

    for library in alignment.aligned {
        declared.push(AlignedDependency {
            coordinate: library,
            role: DependencyRole::RuntimeLinked,
        });
    }

    if let Some(desugaring) = &config.desugaring {
        if desugaring.version.is_none() {
            return Err(VariantError::Configuration(format!(
                "Standalone dependency {} must declare its own version",
                desugaring
            )));
        }
        if declared.iter().any(|d| d.coordinate.module() == desugaring.module()) {
            return Err(VariantError::Configuration(format!(
                "{} is both aligned and standalone",
                desugaring.module()
            )));
        }
        declared.push(AlignedDependency {
            coordinate: desugaring.clone(),
            role: DependencyRole::CoreLibraryDesugaring,
        });
    }

    tracing::debug!("Declared {} dependencies against {}", declared.len(), config.bom);

    Ok(declared)
}

/// The fixed dependency set of the application, aligned to `bom`.
pub fn aligned_dependencies(bom: &Coordinate) -> Result<Vec<AlignedDependency>> {
    declare_dependencies(&DependencyConfig::for_bom(bom.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::default_bom;

    fn coordinate(s: &str) -> Coordinate {
        s.parse().unwrap()
    }

    #[test]
    fn test_default_declaration() {
        let declared = aligned_dependencies(&default_bom()).unwrap();
        let entries: Vec<(String, DependencyRole)> = declared
            .iter()
            .map(|d| (d.coordinate.to_string(), d.role))
            .collect();

        assert_eq!(
            entries,
            vec![
                ("com.google.firebase:firebase-bom:33.7.0".to_string(), DependencyRole::Platform),
                ("com.google.firebase:firebase-messaging".to_string(), DependencyRole::RuntimeLinked),
                ("com.google.firebase:firebase-analytics".to_string(), DependencyRole::RuntimeLinked),
                (
                    "com.android.tools:desugar_jdk_libs:2.1.4".to_string(),
                    DependencyRole::CoreLibraryDesugaring
                ),
            ]
        );
    }

    #[test]
    fn test_aligned_libraries_carry_no_version() {
        let declared = aligned_dependencies(&default_bom()).unwrap();
        for dep in declared.iter().filter(|d| d.role == DependencyRole::RuntimeLinked) {
            assert!(dep.coordinate.version.is_none(), "{} has a version", dep.coordinate);
        }
    }

    #[test]
    fn test_other_bom_version() {
        let declared = aligned_dependencies(&coordinate("com.google.firebase:firebase-bom:34.0.0")).unwrap();
        assert_eq!(declared[0].coordinate.version.as_deref(), Some("34.0.0"));
    }

    #[test]
    fn test_aligned_library_with_own_version_conflicts() {
        let config = DependencyConfig {
            aligned: vec![coordinate("com.google.firebase:firebase-messaging:24.0.0")],
            ..DependencyConfig::default()
        };

        let err = declare_dependencies(&config).unwrap_err();
        match err {
            VariantError::DependencyVersionConflict { coordinate, version } => {
                assert_eq!(coordinate, "com.google.firebase:firebase-messaging");
                assert_eq!(version, "24.0.0");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_unversioned_bom_rejected() {
        let err = aligned_dependencies(&coordinate("com.google.firebase:firebase-bom")).unwrap_err();
        assert!(matches!(err, VariantError::Configuration(_)));
    }

    #[test]
    fn test_duplicate_aligned_library_rejected() {
        let config = DependencyConfig {
            aligned: vec![
                coordinate("com.google.firebase:firebase-analytics"),
                coordinate("com.google.firebase:firebase-analytics"),
            ],
            ..DependencyConfig::default()
        };
        assert!(declare_dependencies(&config).is_err());
    }

    #[test]
    fn test_unversioned_standalone_rejected() {
        let config = DependencyConfig {
            desugaring: Some(coordinate("com.android.tools:desugar_jdk_libs")),
            ..DependencyConfig::default()
        };
        assert!(declare_dependencies(&config).is_err());
    }

    #[test]
    fn test_no_desugaring_library() {
        let config = DependencyConfig {
            desugaring: None,
            ..DependencyConfig::default()
        };
        let declared = declare_dependencies(&config).unwrap();
        assert_eq!(declared.len(), 3);
    }
}
