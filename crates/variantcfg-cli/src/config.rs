//! CLI settings loading and resolution.
//!
//! Locates the build root, the project config file and the credential file
//! with priority order: CLI flags > environment variables > config file >
//! defaults.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use variantcfg_core::config::{load_project_config, PROJECT_CONFIG_FILE};
use variantcfg_core::models::ProjectConfig;

pub const BUILD_ROOT_ENV: &str = "VARIANTCFG_BUILD_ROOT";
pub const CONFIG_ENV: &str = "VARIANTCFG_CONFIG";
pub const KEY_PROPERTIES_ENV: &str = "VARIANTCFG_KEY_PROPERTIES";

/// Where the config value came from, for `config show`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Flag,
    Env,
    ConfigFile,
    Default,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Flag => "flag",
            Source::Env => "environment",
            Source::ConfigFile => "config file",
            Source::Default => "default",
        }
    }
}

/// Settings after applying priority rules.
#[derive(Debug, Clone)]
pub struct ResolvedSettings {
    pub build_root: PathBuf,
    pub config_path: PathBuf,
    /// Whether `config_path` existed and was loaded.
    pub config_loaded: bool,
    pub project: ProjectConfig,
    pub credentials_file: PathBuf,
    pub credentials_source: Source,
}

fn env_path(name: &str) -> Option<PathBuf> {
    std::env::var_os(name)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Default config file path inside a build root.
pub fn default_config_path(build_root: &Path) -> PathBuf {
    build_root.join(PROJECT_CONFIG_FILE)
}

/// Locates the build root and config file path without reading the file.
///
/// Returns whether the config path was explicitly requested.
pub fn config_location(
    build_root_flag: Option<&Path>,
    config_flag: Option<&Path>,
) -> Result<(PathBuf, PathBuf, bool)> {
    let build_root = build_root_flag
        .map(Path::to_path_buf)
        .or_else(|| env_path(BUILD_ROOT_ENV))
        .unwrap_or_else(|| PathBuf::from("."));

    if !build_root.is_dir() {
        bail!("Build root {} is not a directory", build_root.display());
    }

    let (config_path, explicit) = match config_flag.map(Path::to_path_buf).or_else(|| env_path(CONFIG_ENV)) {
        Some(path) => (path, true),
        None => (default_config_path(&build_root), false),
    };

    Ok((build_root, config_path, explicit))
}

/// Resolve settings by applying priority rules.
///
/// An explicitly requested config file (flag or environment) must exist;
/// the default location is optional.
pub fn resolve_settings(
    build_root_flag: Option<&Path>,
    config_flag: Option<&Path>,
    key_properties_flag: Option<&Path>,
) -> Result<ResolvedSettings> {
    let (build_root, config_path, explicit) = config_location(build_root_flag, config_flag)?;

    let file_config = load_project_config(&config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;

    if file_config.is_none() && explicit {
        bail!(
            "Config file {} not found. Run 'variantcfg config init' to create one.",
            config_path.display()
        );
    }

    let config_loaded = file_config.is_some();
    let project = file_config.unwrap_or_default();

    let (credentials_file, credentials_source) = if let Some(path) = key_properties_flag {
        (path.to_path_buf(), Source::Flag)
    } else if let Some(path) = env_path(KEY_PROPERTIES_ENV) {
        (path, Source::Env)
    } else if config_loaded {
        (build_root.join(&project.credentials_file), Source::ConfigFile)
    } else {
        (build_root.join(&project.credentials_file), Source::Default)
    };

    Ok(ResolvedSettings {
        build_root,
        config_path,
        config_loaded,
        project,
        credentials_file,
        credentials_source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn without_env<R>(f: impl FnOnce() -> R) -> R {
        temp_env::with_vars_unset([BUILD_ROOT_ENV, CONFIG_ENV, KEY_PROPERTIES_ENV], f)
    }

    #[test]
    fn test_defaults_without_config_file() {
        let root = TempDir::new().unwrap();

        let settings = without_env(|| resolve_settings(Some(root.path()), None, None)).unwrap();

        assert!(!settings.config_loaded);
        assert_eq!(settings.project, ProjectConfig::default());
        assert_eq!(settings.credentials_file, root.path().join("key.properties"));
        assert_eq!(settings.credentials_source, Source::Default);
    }

    #[test]
    fn test_config_file_sets_credentials_location() {
        let root = TempDir::new().unwrap();
        std::fs::write(
            root.path().join(PROJECT_CONFIG_FILE),
            "%HUML v0.2.0\ncredentials_file: \"signing/key.properties\"\n",
        )
        .unwrap();

        let settings = without_env(|| resolve_settings(Some(root.path()), None, None)).unwrap();

        assert!(settings.config_loaded);
        assert_eq!(settings.credentials_file, root.path().join("signing/key.properties"));
        assert_eq!(settings.credentials_source, Source::ConfigFile);
    }

    #[test]
    fn test_env_overrides_config_file() {
        let root = TempDir::new().unwrap();
        std::fs::write(
            root.path().join(PROJECT_CONFIG_FILE),
            "%HUML v0.2.0\ncredentials_file: \"signing/key.properties\"\n",
        )
        .unwrap();

        let settings = temp_env::with_vars(
            [
                (BUILD_ROOT_ENV, None),
                (CONFIG_ENV, None),
                (KEY_PROPERTIES_ENV, Some("/ci/secrets/key.properties")),
            ],
            || resolve_settings(Some(root.path()), None, None),
        )
        .unwrap();

        assert_eq!(settings.credentials_file, PathBuf::from("/ci/secrets/key.properties"));
        assert_eq!(settings.credentials_source, Source::Env);
    }

    #[test]
    fn test_flag_overrides_env() {
        let root = TempDir::new().unwrap();

        let settings = temp_env::with_vars(
            [
                (BUILD_ROOT_ENV, None),
                (CONFIG_ENV, None),
                (KEY_PROPERTIES_ENV, Some("/ci/secrets/key.properties")),
            ],
            || resolve_settings(Some(root.path()), None, Some(Path::new("/tmp/flag.properties"))),
        )
        .unwrap();

        assert_eq!(settings.credentials_file, PathBuf::from("/tmp/flag.properties"));
        assert_eq!(settings.credentials_source, Source::Flag);
    }

    #[test]
    fn test_build_root_from_env() {
        let root = TempDir::new().unwrap();
        let root_str = root.path().to_str().unwrap().to_string();

        let settings = temp_env::with_vars(
            [
                (BUILD_ROOT_ENV, Some(root_str.as_str())),
                (CONFIG_ENV, None),
                (KEY_PROPERTIES_ENV, None),
            ],
            || resolve_settings(None, None, None),
        )
        .unwrap();

        assert_eq!(settings.build_root, root.path());
    }

    #[test]
    fn test_explicit_missing_config_is_error() {
        let root = TempDir::new().unwrap();
        let missing = root.path().join("nope.huml");

        let result = without_env(|| resolve_settings(Some(root.path()), Some(&missing), None));

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not found"));
    }

    #[test]
    fn test_invalid_config_is_error() {
        let root = TempDir::new().unwrap();
        std::fs::write(root.path().join(PROJECT_CONFIG_FILE), "compile_sdk: 30\ntarget_sdk: 35\n").unwrap();

        let result = without_env(|| resolve_settings(Some(root.path()), None, None));
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_build_root_is_error() {
        let root = TempDir::new().unwrap();
        let missing = root.path().join("android");

        let result = without_env(|| resolve_settings(Some(&missing), None, None));
        assert!(result.is_err());
    }
}
