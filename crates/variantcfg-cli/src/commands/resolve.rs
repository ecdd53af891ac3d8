//! `variantcfg resolve` prints the resolved build variants.

use anyhow::{Context, Result};
use clap::Args;
use variantcfg_core::models::{BuildVariant, VariantName};
use variantcfg_core::resolve_configuration;

use crate::config::ResolvedSettings;

#[derive(Args)]
pub struct ResolveArgs {
    /// Only print this variant (debug or release)
    #[arg(long)]
    variant: Option<VariantName>,

    /// Print the full resolved configuration as JSON (secrets omitted)
    #[arg(long)]
    json: bool,
}

pub fn handle_resolve_command(settings: ResolvedSettings, args: ResolveArgs) -> Result<()> {
    let resolved = resolve_configuration(
        settings.project,
        &settings.build_root,
        Some(settings.credentials_file.as_path()),
    )
    .context("Failed to resolve build configuration")?;

    if args.json {
        let output = match args.variant {
            Some(name) => serde_json::to_string_pretty(resolved.variants.get(name))?,
            None => serde_json::to_string_pretty(&resolved)?,
        };
        println!("{}", output);
        return Ok(());
    }

    println!("Application: {}", resolved.project.application_id);
    println!("Credentials: {}", resolved.credentials_file.display());
    println!();

    match args.variant {
        Some(name) => print_variant(resolved.variants.get(name)),
        None => {
            print_variant(&resolved.variants.debug);
            println!();
            print_variant(&resolved.variants.release);
        }
    }

    if resolved.variants.release_is_debug_signed() && args.variant != Some(VariantName::Debug) {
        println!();
        println!("Note: no release credentials found; release is signed with the debug identity.");
    }

    Ok(())
}

fn print_variant(variant: &BuildVariant) {
    let yes_no = |b: bool| if b { "yes" } else { "no" };

    println!("[{}]", variant.name);
    println!("  Signing:          {}", variant.signing_identity);
    println!("  Minify:           {}", yes_no(variant.minify));
    println!("  Shrink resources: {}", yes_no(variant.shrink_resources));
    if variant.obfuscation_rule_files.is_empty() {
        println!("  Rule files:       (none)");
    } else {
        for (i, rule) in variant.obfuscation_rule_files.iter().enumerate() {
            let label = if i == 0 { "Rule files:" } else { "" };
            println!("  {:<17} {} ({:?})", label, rule.file, rule.source);
        }
    }
}
