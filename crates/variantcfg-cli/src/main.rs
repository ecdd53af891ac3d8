use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use commands::{
    config::{handle_config_command, ConfigCommands},
    deps::{handle_deps_command, DepsArgs},
    resolve::{handle_resolve_command, ResolveArgs},
    signing::{handle_signing_command, SigningCommands},
};

#[derive(Parser)]
#[command(name = "variantcfg")]
#[command(about = "Resolve Android build variants and release signing", long_about = None)]
struct Cli {
    /// Android build root (overrides VARIANTCFG_BUILD_ROOT, default ".")
    #[arg(long, global = true)]
    build_root: Option<PathBuf>,

    /// Project config file (overrides VARIANTCFG_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Credential file (overrides VARIANTCFG_KEY_PROPERTIES and the config file)
    #[arg(long, global = true)]
    key_properties: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show CLI version
    Version,

    /// Resolve debug and release variants
    Resolve(ResolveArgs),

    /// Show the dependency alignment declaration
    Deps(DepsArgs),

    /// Release credential management
    #[command(subcommand)]
    Signing(SigningCommands),

    /// Manage the project config file
    #[command(subcommand)]
    Config(ConfigCommands),
}

fn main() -> Result<()> {
    // Load .env file if present (doesn't override existing env vars)
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "variantcfg=info,variantcfg_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Commands::Version = cli.command {
        println!("variantcfg {}", variantcfg_core::VERSION);
        return Ok(());
    }

    // Init must work before a valid config file exists
    if let Commands::Config(ConfigCommands::Init { force }) = cli.command {
        let (_, path, _) = config::config_location(cli.build_root.as_deref(), cli.config.as_deref())?;
        return commands::config::init_config(&path, force);
    }

    let settings = config::resolve_settings(
        cli.build_root.as_deref(),
        cli.config.as_deref(),
        cli.key_properties.as_deref(),
    )?;

    tracing::debug!(
        "Build root {}, config {}, credentials {}",
        settings.build_root.display(),
        settings.config_path.display(),
        settings.credentials_file.display()
    );

    match cli.command {
        Commands::Resolve(args) => handle_resolve_command(settings, args)?,
        Commands::Deps(args) => handle_deps_command(settings, args)?,
        Commands::Signing(cmd) => handle_signing_command(settings, cmd)?,
        Commands::Config(cmd) => handle_config_command(settings, cmd)?,
        Commands::Version => unreachable!(), // Handled above
    }

    Ok(())
}
