//! variantcfg Core Library
//!
//! Signing credential loading, build variant resolution and dependency
//! alignment for an Android application module.

pub mod config;
pub mod configurator;
pub mod dependencies;
pub mod error;
pub mod models;
pub mod signing;
pub mod variants;

pub use configurator::{resolve_configuration, ResolvedConfiguration};
pub use dependencies::aligned_dependencies;
pub use error::{Result, VariantError};
pub use signing::load_credentials;
pub use variants::resolve_variants;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
