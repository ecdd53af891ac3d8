//! Android release credential loading and key.properties generation.
//!
//! The credential file lives outside version control. Its absence is a
//! normal outcome (fresh checkouts, CI without secrets); a file that exists
//! but lacks a required key is an error.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use secrecy::ExposeSecret;

use super::properties::{decode_properties, parse_properties};
use crate::error::{Result, VariantError};
use crate::models::CredentialDescriptor;

pub const KEY_ALIAS: &str = "keyAlias";
pub const KEY_PASSWORD: &str = "keyPassword";
pub const STORE_FILE: &str = "storeFile";
pub const STORE_PASSWORD: &str = "storePassword";

/// Required keys, in the order they are checked.
pub const REQUIRED_KEYS: [&str; 4] = [KEY_ALIAS, KEY_PASSWORD, STORE_FILE, STORE_PASSWORD];

/// Loads release credentials, resolving `storeFile` against the directory
/// that contains the credential file.
///
/// Returns `Ok(None)` when the file does not exist.
pub fn load_credentials(path: &Path) -> Result<Option<CredentialDescriptor>> {
    let build_root = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    load_credentials_from(path, build_root)
}

/// Loads release credentials, resolving `storeFile` against `build_root`.
///
/// Returns `Ok(None)` when the file does not exist, and
/// [`VariantError::CredentialFileMalformed`] naming the first missing or
/// blank key otherwise. No partially populated descriptor is ever returned.
pub fn load_credentials_from(path: &Path, build_root: &Path) -> Result<Option<CredentialDescriptor>> {
    let content = match fs::read(path) {
        Ok(bytes) => decode_properties(bytes),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::info!(
                "No credential file at {}; release builds fall back to debug signing",
                path.display()
            );
            return Ok(None);
        }
        Err(e) => {
            return Err(VariantError::Io {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    let mut properties = parse_properties(&content);

    for key in properties.keys() {
        if !REQUIRED_KEYS.contains(&key.as_str()) {
            tracing::debug!("Ignoring unknown key '{}' in {}", key, path.display());
        }
    }

    let mut take = |key: &'static str| -> Result<String> {
        match properties.remove(key) {
            None => Err(VariantError::CredentialFileMalformed {
                path: path.to_path_buf(),
                key,
                reason: "is missing",
            }),
            Some(value) if value.trim().is_empty() => Err(VariantError::CredentialFileMalformed {
                path: path.to_path_buf(),
                key,
                reason: "is empty",
            }),
            Some(value) => Ok(value),
        }
    };

    let key_alias = take(KEY_ALIAS)?;
    let key_password = take(KEY_PASSWORD)?;
    let store_file = take(STORE_FILE)?;
    let store_password = take(STORE_PASSWORD)?;

    let store_file = build_root.join(store_file.trim());

    tracing::debug!(
        "Loaded release credentials from {} (alias {}, store {})",
        path.display(),
        key_alias,
        store_file.display()
    );

    Ok(Some(CredentialDescriptor::new(
        key_alias,
        key_password,
        store_file,
        store_password,
    )))
}

/// Generates key.properties content for the given credentials.
///
/// The output is pure ASCII; anything else is written as `\uXXXX`.
pub fn generate_key_properties(credentials: &CredentialDescriptor) -> String {
    format!(
        "{}={}\n\
         {}={}\n\
         {}={}\n\
         {}={}\n",
        STORE_PASSWORD,
        escape_value(credentials.store_password.expose_secret()),
        KEY_PASSWORD,
        escape_value(credentials.key_password.expose_secret()),
        KEY_ALIAS,
        escape_value(&credentials.key_alias),
        STORE_FILE,
        escape_value(&credentials.store_file.to_string_lossy()),
    )
}

fn escape_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for (i, c) in value.chars().enumerate() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{000C}' => out.push_str("\\f"),
            ' ' if i == 0 => out.push_str("\\ "),
            c if c.is_ascii() && !c.is_ascii_control() => out.push(c),
            c => {
                for unit in c.encode_utf16(&mut [0; 2]) {
                    out.push_str(&format!("\\u{:04X}", unit));
                }
            }
        }
    }
    out
}

/// Writes a key.properties file with owner-only permissions.
///
/// Refuses to replace an existing file unless `force` is set, and refuses
/// blank values the loader would reject.
pub fn write_key_properties(
    path: &Path,
    credentials: &CredentialDescriptor,
    force: bool,
) -> Result<PathBuf> {
    let required = [
        (KEY_ALIAS, credentials.key_alias.as_str()),
        (KEY_PASSWORD, credentials.key_password.expose_secret()),
        (STORE_PASSWORD, credentials.store_password.expose_secret()),
    ];
    for (key, value) in required {
        if value.trim().is_empty() {
            return Err(VariantError::Configuration(format!("{} must not be blank", key)));
        }
    }
    if credentials.store_file.to_string_lossy().trim().is_empty() {
        return Err(VariantError::Configuration(format!("{} must not be blank", STORE_FILE)));
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            return Err(VariantError::Configuration(format!(
                "Build root {} does not exist",
                parent.display()
            )));
        }
    }

    if path.exists() && !force {
        return Err(VariantError::Configuration(format!(
            "{} already exists. Use --force to overwrite.",
            path.display()
        )));
    }

    let io_err = |e| VariantError::Io {
        path: path.to_path_buf(),
        source: e,
    };

    fs::write(path, generate_key_properties(credentials)).map_err(io_err)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(io_err)?;
    }

    tracing::debug!("Wrote key.properties to {}", path.display());

    Ok(path.to_path_buf())
}

/// Removes a key.properties file. Returns whether a file was removed.
pub fn remove_key_properties(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => {
            tracing::debug!("Removed key.properties from {}", path.display());
            Ok(true)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(VariantError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}
