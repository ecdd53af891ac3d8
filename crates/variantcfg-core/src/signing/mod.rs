//! Release signing credentials.
//!
//! This module provides functionality for:
//! - Loading and validating `key.properties` credential files
//! - Generating, writing and removing `key.properties` for CI workspaces

pub mod android;
pub mod properties;

pub use android::*;
pub use properties::parse_properties;
