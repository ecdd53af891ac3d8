//! End-to-end configuration resolution for one build invocation.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::dependencies::declare_dependencies;
use crate::error::Result;
use crate::models::{AlignedDependency, ProjectConfig, ResolvedVariants};
use crate::signing::load_credentials_from;
use crate::variants::resolve_variants_with;

/// Everything the packaging toolchain needs for one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedConfiguration {
    pub project: ProjectConfig,
    /// Credential file that was consulted, whether or not it existed.
    pub credentials_file: PathBuf,
    pub variants: ResolvedVariants,
    pub dependencies: Vec<AlignedDependency>,
}

/// Resolves the project's variants and dependency declaration.
///
/// The credential file is read exactly once, at `credentials_file` when
/// given and otherwise at the project's configured location under
/// `build_root`. A malformed file aborts resolution.
pub fn resolve_configuration(
    project: ProjectConfig,
    build_root: &Path,
    credentials_file: Option<&Path>,
) -> Result<ResolvedConfiguration> {
    let credentials_file = match credentials_file {
        Some(path) => path.to_path_buf(),
        None => build_root.join(&project.credentials_file),
    };

    let dependencies = declare_dependencies(&project.dependencies)?;
    let credentials = load_credentials_from(&credentials_file, build_root)?;
    let variants = resolve_variants_with(credentials, &project.release);

    tracing::info!(
        "Resolved variants for {}: release signed with {}",
        project.application_id,
        variants.release.signing_identity.as_str()
    );

    Ok(ResolvedConfiguration {
        project,
        credentials_file,
        variants,
        dependencies,
    })
}
