//! Release signing credential commands.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Subcommand;
use variantcfg_core::models::CredentialDescriptor;
use variantcfg_core::signing::{load_credentials_from, remove_key_properties, write_key_properties};

use crate::config::ResolvedSettings;

#[derive(Subcommand)]
pub enum SigningCommands {
    /// Check whether release credentials are available
    Check,

    /// Write a key.properties file
    Init {
        /// Key alias inside the keystore
        #[arg(long)]
        alias: String,

        /// Keystore path (relative to the build root or absolute)
        #[arg(long)]
        store_file: PathBuf,

        /// Keystore password
        #[arg(long, env = "VARIANTCFG_STORE_PASSWORD", hide_env_values = true)]
        store_password: String,

        /// Key password (defaults to the keystore password)
        #[arg(long, env = "VARIANTCFG_KEY_PASSWORD", hide_env_values = true)]
        key_password: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Remove the key.properties file
    Clean,
}

pub fn handle_signing_command(settings: ResolvedSettings, cmd: SigningCommands) -> Result<()> {
    match cmd {
        SigningCommands::Check => check_credentials(&settings),
        SigningCommands::Init {
            alias,
            store_file,
            store_password,
            key_password,
            force,
        } => init_credentials(&settings, alias, store_file, store_password, key_password, force),
        SigningCommands::Clean => clean_credentials(&settings),
    }
}

/// Report credential status without revealing secrets.
fn check_credentials(settings: &ResolvedSettings) -> Result<()> {
    let path = &settings.credentials_file;
    println!("Credential file: {} ({})", path.display(), settings.credentials_source.as_str());

    let credentials = load_credentials_from(path, &settings.build_root)
        .with_context(|| format!("Release credentials in {} are unusable", path.display()))?;

    match credentials {
        None => {
            println!("Status:          Absent");
            println!("Release builds will be signed with the debug identity.");
        }
        Some(credentials) => {
            println!("Status:          Present");
            println!("Key alias:       {}", credentials.key_alias);
            println!("Keystore:        {}", credentials.store_file.display());
            if !credentials.store_file.exists() {
                tracing::warn!(
                    "Keystore {} does not exist; signing will fail at packaging time",
                    credentials.store_file.display()
                );
            }
        }
    }

    Ok(())
}

fn init_credentials(
    settings: &ResolvedSettings,
    alias: String,
    store_file: PathBuf,
    store_password: String,
    key_password: Option<String>,
    force: bool,
) -> Result<()> {
    let credentials = init_descriptor(alias, store_file, store_password, key_password)?;

    let path = write_key_properties(&settings.credentials_file, &credentials, force)?;

    println!("Wrote {}", path.display());
    println!("Keep this file out of version control.");

    Ok(())
}

/// Builds the descriptor for `signing init`, rejecting values the loader
/// would report as empty.
fn init_descriptor(
    alias: String,
    store_file: PathBuf,
    store_password: String,
    key_password: Option<String>,
) -> Result<CredentialDescriptor> {
    if alias.trim().is_empty() {
        bail!("--alias must not be empty");
    }
    if store_password.trim().is_empty() {
        bail!("Keystore password must not be blank");
    }

    let key_password = key_password.unwrap_or_else(|| store_password.clone());
    if key_password.trim().is_empty() {
        bail!("Key password must not be blank");
    }

    Ok(CredentialDescriptor::new(alias, key_password, store_file, store_password))
}

fn clean_credentials(settings: &ResolvedSettings) -> Result<()> {
    if remove_key_properties(&settings.credentials_file)? {
        println!("Removed {}", settings.credentials_file.display());
    } else {
        println!("Nothing to remove at {}", settings.credentials_file.display());
    }
    Ok(())
}
