//! `variantcfg deps` prints the dependency alignment declaration.

use anyhow::{Context, Result};
use clap::Args;
use variantcfg_core::dependencies::declare_dependencies;

use crate::config::ResolvedSettings;

#[derive(Args)]
pub struct DepsArgs {
    /// Print as JSON
    #[arg(long)]
    json: bool,
}

pub fn handle_deps_command(settings: ResolvedSettings, args: DepsArgs) -> Result<()> {
    let declared = declare_dependencies(&settings.project.dependencies)
        .context("Invalid dependency declaration")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&declared)?);
        return Ok(());
    }

    println!("BOM: {}", settings.project.dependencies.bom);
    println!();
    for dep in &declared {
        println!(
            "  {:<22} {:<24} {}",
            dep.role.configuration(),
            dep.role.as_str(),
            dep.coordinate
        );
    }

    Ok(())
}
