//! Build variant resolution.
//!
//! Turns the outcome of a single credential load into the debug and release
//! variants handed to the packaging toolchain. Resolution is a pure function
//! of its inputs; nothing here touches the filesystem.

use crate::models::{
    BuildVariant, CredentialDescriptor, ObfuscationRuleFile, ReleaseRules, ResolvedVariants,
    SigningIdentity, VariantName,
};

/// Chooses the signing identity for a variant.
///
/// Debug always uses the ambient debug identity. Release uses the loaded
/// credentials when present and otherwise falls back to the debug identity,
/// so builds without secrets still produce a release-shaped artifact.
pub fn select_signing_identity(
    variant: VariantName,
    credentials: Option<CredentialDescriptor>,
) -> SigningIdentity {
    match (variant, credentials) {
        (VariantName::Release, Some(credentials)) => SigningIdentity::Release(credentials),
        (VariantName::Release, None) => {
            tracing::warn!("Release credentials unavailable; signing release with the debug identity");
            SigningIdentity::Debug
        }
        (VariantName::Debug, _) => SigningIdentity::Debug,
    }
}

/// Orders rule files so platform defaults precede project rules.
///
/// The sort is stable, so files from the same source keep their relative
/// order.
pub fn canonical_rule_order(rules: &[ObfuscationRuleFile]) -> Vec<ObfuscationRuleFile> {
    let mut ordered = rules.to_vec();
    ordered.sort_by_key(|rule| rule.source);
    ordered
}

/// Resolves both variants using the default obfuscation rule files.
pub fn resolve_variants(credentials: Option<CredentialDescriptor>) -> ResolvedVariants {
    resolve_variants_with(credentials, &ReleaseRules::default())
}

/// Resolves both variants with the project's release rule files.
pub fn resolve_variants_with(
    credentials: Option<CredentialDescriptor>,
    release_rules: &ReleaseRules,
) -> ResolvedVariants {
    let debug_variant = BuildVariant {
        name: VariantName::Debug,
        minify: false,
        shrink_resources: false,
        obfuscation_rule_files: Vec::new(),
        signing_identity: select_signing_identity(VariantName::Debug, None),
    };

    let release_variant = BuildVariant {
        name: VariantName::Release,
        minify: true,
        shrink_resources: true,
        obfuscation_rule_files: canonical_rule_order(&release_rules.rule_files()),
        signing_identity: select_signing_identity(VariantName::Release, credentials),
    };

    tracing::debug!(
        "Resolved variants: debug signed with {}, release signed with {}",
        debug_variant.signing_identity.as_str(),
        release_variant.signing_identity.as_str()
    );

    ResolvedVariants {
        debug: debug_variant,
        release: release_variant,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RuleSource;

    fn credentials() -> CredentialDescriptor {
        CredentialDescriptor::new("k", "p", "/root/app.keystore", "sp")
    }

    #[test]
    fn test_absent_credentials_fall_back_to_debug_identity() {
        let variants = resolve_variants(None);

        assert!(!variants.debug.minify);
        assert!(variants.release.minify);
        assert!(variants.release.shrink_resources);
        assert_eq!(variants.release.signing_identity, variants.debug.signing_identity);
        assert!(variants.release_is_debug_signed());
    }

    #[test]
    fn test_present_credentials_sign_release() {
        let variants = resolve_variants(Some(credentials()));

        assert_eq!(variants.release.signing_identity, SigningIdentity::Release(credentials()));
        assert!(!variants.release_is_debug_signed());
        assert!(variants.release.is_hardened());
    }

    #[test]
    fn test_debug_variant_unaffected_by_credentials() {
        let with = resolve_variants(Some(credentials()));
        let without = resolve_variants(None);

        assert_eq!(with.debug, without.debug);
        assert!(!with.debug.is_hardened());
        assert!(with.debug.obfuscation_rule_files.is_empty());
        assert_eq!(with.debug.signing_identity, SigningIdentity::Debug);
    }

    #[test]
    fn test_release_rules_default_order() {
        let variants = resolve_variants(None);
        let rules = &variants.release.obfuscation_rule_files;

        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0], ObfuscationRuleFile::platform_default("proguard-android-optimize.txt"));
        assert_eq!(rules[1], ObfuscationRuleFile::project("proguard-rules.pro"));
    }

    #[test]
    fn test_release_rules_reordered_when_given_reversed() {
        let reversed = vec![
            ObfuscationRuleFile::project("proguard-rules.pro"),
            ObfuscationRuleFile::platform_default("proguard-android-optimize.txt"),
        ];
        let sources: Vec<RuleSource> = canonical_rule_order(&reversed)
            .iter()
            .map(|r| r.source)
            .collect();

        assert_eq!(sources, vec![RuleSource::PlatformDefault, RuleSource::Project]);
    }

    #[test]
    fn test_release_rules_taken_from_project() {
        let rules = ReleaseRules {
            platform_rules: "proguard-android.txt".to_string(),
            project_rules: "app-rules.pro".to_string(),
        };
        let variants = resolve_variants_with(Some(credentials()), &rules);

        assert_eq!(
            variants.release.obfuscation_rule_files,
            vec![
                ObfuscationRuleFile::platform_default("proguard-android.txt"),
                ObfuscationRuleFile::project("app-rules.pro"),
            ]
        );
        assert!(variants.debug.obfuscation_rule_files.is_empty());
        assert_eq!(variants.debug.signing_identity, SigningIdentity::Debug);
    }

    #[test]
    fn test_canonical_order_is_stable_within_source() {
        let rules = vec![
            ObfuscationRuleFile::project("b.pro"),
            ObfuscationRuleFile::platform_default("default.txt"),
            ObfuscationRuleFile::project("a.pro"),
        ];
        let ordered = canonical_rule_order(&rules);
        let files: Vec<&str> = ordered.iter().map(|r| r.file.as_str()).collect();

        assert_eq!(files, vec!["default.txt", "b.pro", "a.pro"]);
    }

    #[test]
    fn test_resolution_is_idempotent() {
        assert_eq!(resolve_variants(None), resolve_variants(None));
        assert_eq!(
            resolve_variants(Some(credentials())),
            resolve_variants(Some(credentials()))
        );
    }

    #[test]
    fn test_select_debug_ignores_credentials() {
        assert_eq!(
            select_signing_identity(VariantName::Debug, Some(credentials())),
            SigningIdentity::Debug
        );
    }
}
