//! Signing identity models.

use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

// ============================================================================
// Credential Descriptor
// ============================================================================

/// Release signing credentials loaded from `key.properties`.
///
/// Only constructed when all four fields are present and non-empty. The
/// passwords are kept behind [`SecretString`], so `Debug` output redacts them
/// and serialization omits them entirely.
#[derive(Debug, Serialize)]
pub struct CredentialDescriptor {
    pub key_alias: String,
    #[serde(skip)]
    pub key_password: SecretString,
    /// Keystore path, already resolved against the build root.
    pub store_file: PathBuf,
    #[serde(skip)]
    pub store_password: SecretString,
}

impl CredentialDescriptor {
    pub fn new(
        key_alias: impl Into<String>,
        key_password: impl Into<String>,
        store_file: impl Into<PathBuf>,
        store_password: impl Into<String>,
    ) -> Self {
        Self {
            key_alias: key_alias.into(),
            key_password: SecretString::from(key_password.into()),
            store_file: store_file.into(),
            store_password: SecretString::from(store_password.into()),
        }
    }
}

impl Clone for CredentialDescriptor {
    fn clone(&self) -> Self {
        Self {
            key_alias: self.key_alias.clone(),
            key_password: SecretString::from(self.key_password.expose_secret().to_owned()),
            store_file: self.store_file.clone(),
            store_password: SecretString::from(self.store_password.expose_secret().to_owned()),
        }
    }
}

impl PartialEq for CredentialDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.key_alias == other.key_alias
            && self.store_file == other.store_file
            && self.key_password.expose_secret() == other.key_password.expose_secret()
            && self.store_password.expose_secret() == other.store_password.expose_secret()
    }
}

impl Eq for CredentialDescriptor {}

// ============================================================================
// Signing Identity
// ============================================================================

/// The identity a variant is signed with.
///
/// `Debug` is the toolchain's ambient development keystore; this crate only
/// references it and never loads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SigningIdentity {
    Debug,
    Release(CredentialDescriptor),
}

impl SigningIdentity {
    /// Name of the signing config the toolchain should look up.
    pub fn as_str(&self) -> &'static str {
        match self {
            SigningIdentity::Debug => "debug",
            SigningIdentity::Release(_) => "release",
        }
    }

    pub fn is_debug(&self) -> bool {
        matches!(self, SigningIdentity::Debug)
    }

    pub fn credentials(&self) -> Option<&CredentialDescriptor> {
        match self {
            SigningIdentity::Debug => None,
            SigningIdentity::Release(credentials) => Some(credentials),
        }
    }
}

impl std::fmt::Display for SigningIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SigningIdentity::Debug => write!(f, "debug (ambient)"),
            SigningIdentity::Release(c) => {
                write!(f, "release (alias {}, store {})", c.key_alias, c.store_file.display())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_output_redacts_passwords() {
        let credentials = CredentialDescriptor::new("upload", "kp-secret", "/tmp/app.jks", "sp-secret");
        let debug = format!("{:?}", credentials);

        assert!(debug.contains("upload"));
        assert!(!debug.contains("kp-secret"));
        assert!(!debug.contains("sp-secret"));
    }

    #[test]
    fn test_serialize_omits_passwords() {
        let identity = SigningIdentity::Release(CredentialDescriptor::new(
            "upload",
            "kp-secret",
            "/tmp/app.jks",
            "sp-secret",
        ));
        let json = serde_json::to_string(&identity).unwrap();

        assert!(json.contains("\"kind\":\"release\""));
        assert!(json.contains("\"key_alias\":\"upload\""));
        assert!(!json.contains("secret"));
    }

    #[test]
    fn test_clone_preserves_secrets() {
        let credentials = CredentialDescriptor::new("a", "kp", "/x.jks", "sp");
        let cloned = credentials.clone();
        assert_eq!(credentials, cloned);
        assert_eq!(cloned.key_password.expose_secret(), "kp");
    }

    #[test]
    fn test_identity_names() {
        let release = SigningIdentity::Release(CredentialDescriptor::new("a", "b", "c", "d"));
        assert_eq!(SigningIdentity::Debug.as_str(), "debug");
        assert_eq!(release.as_str(), "release");
        assert!(SigningIdentity::Debug.credentials().is_none());
        assert_eq!(release.credentials().unwrap().key_alias, "a");
    }
}
