//! `variantcfg config` commands for managing the project config file.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Subcommand;
use variantcfg_core::models::ProjectConfig;

use crate::config::ResolvedSettings;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Create a config file with the default settings
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },

    /// Show the effective configuration
    Show,

    /// Show config file path
    Path,
}

pub fn handle_config_command(settings: ResolvedSettings, cmd: ConfigCommands) -> Result<()> {
    match cmd {
        ConfigCommands::Init { force } => init_config(&settings.config_path, force),
        ConfigCommands::Show => show_config(&settings),
        ConfigCommands::Path => {
            println!("{}", settings.config_path.display());
            Ok(())
        }
    }
}

/// Create a new config file.
pub fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    write_config(path, &ProjectConfig::default())?;

    println!("Created config file at {}", path.display());
    println!();
    println!("Release credentials are read from {}.", ProjectConfig::default().credentials_file);
    println!("To create them:");
    println!("  variantcfg signing init --alias upload --store-file upload-keystore.jks");

    Ok(())
}

fn show_config(settings: &ResolvedSettings) -> Result<()> {
    let project = &settings.project;

    if settings.config_loaded {
        println!("Config file: {}", settings.config_path.display());
    } else {
        println!("No config file found at {} (using defaults)", settings.config_path.display());
    }
    println!("Build root:  {}", settings.build_root.display());
    println!(
        "Credentials: {} ({})",
        settings.credentials_file.display(),
        settings.credentials_source.as_str()
    );
    println!();
    println!("Namespace:      {}", project.namespace);
    println!("Application ID: {}", project.application_id);
    println!("Compile SDK:    {}", project.compile_sdk);
    println!("Target SDK:     {}", project.target_sdk);
    println!(
        "Java:           {} (jvm target {}, desugaring {})",
        project.compile_options.java_version,
        project.compile_options.jvm_target,
        if project.compile_options.core_library_desugaring { "on" } else { "off" }
    );
    println!("Plugins:        {}", project.plugins.join(", "));
    println!(
        "Release rules:  {}, {}",
        project.release.platform_rules, project.release.project_rules
    );
    println!("BOM:            {}", project.dependencies.bom);

    Ok(())
}

fn write_config(path: &Path, config: &ProjectConfig) -> Result<()> {
    let content = serialize_to_huml(config);
    fs::write(path, &content).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Serialize config to HUML format.
///
/// huml-rs may not support serialization, so we manually generate HUML.
fn serialize_to_huml(config: &ProjectConfig) -> String {
    let mut output = String::new();

    output.push_str("%HUML v0.2.0\n");
    output.push_str(&format!("namespace: \"{}\"\n", config.namespace));
    output.push_str(&format!("application_id: \"{}\"\n", config.application_id));
    output.push_str(&format!("compile_sdk: {}\n", config.compile_sdk));
    output.push_str(&format!("target_sdk: {}\n", config.target_sdk));
    output.push_str(&format!("credentials_file: \"{}\"\n", config.credentials_file));
    push_list(&mut output, "", "plugins", &config.plugins);
    output.push('\n');

    output.push_str("compile_options::\n");
    output.push_str(&format!("  java_version: {}\n", config.compile_options.java_version));
    output.push_str(&format!("  jvm_target: \"{}\"\n", config.compile_options.jvm_target));
    output.push_str(&format!(
        "  core_library_desugaring: {}\n",
        config.compile_options.core_library_desugaring
    ));
    output.push('\n');

    output.push_str("release::\n");
    output.push_str(&format!("  platform_rules: \"{}\"\n", config.release.platform_rules));
    output.push_str(&format!("  project_rules: \"{}\"\n", config.release.project_rules));
    output.push('\n');

    let deps = &config.dependencies;
    let aligned: Vec<String> = deps.aligned.iter().map(|c| c.to_string()).collect();
    output.push_str("dependencies::\n");
    output.push_str(&format!("  bom: \"{}\"\n", deps.bom));
    push_list(&mut output, "  ", "aligned", &aligned);
    if let Some(ref desugaring) = deps.desugaring {
        output.push_str(&format!("  desugaring: \"{}\"\n", desugaring));
    }

    output
}

/// Writes a list as one `- "item"` line per entry.
///
/// huml-rs rejects inline lists inside nested blocks.
fn push_list(output: &mut String, indent: &str, key: &str, items: &[String]) {
    if items.is_empty() {
        output.push_str(&format!("{}{}:: []\n", indent, key));
        return;
    }
    output.push_str(&format!("{}{}::\n", indent, key));
    for item in items {
        output.push_str(&format!("{}  - \"{}\"\n", indent, item));
    }
}
