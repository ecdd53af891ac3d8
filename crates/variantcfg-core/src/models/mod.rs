//! Domain models for build configuration.

pub mod dependency;
pub mod project;
pub mod signing;
pub mod variant;

pub use dependency::*;
pub use project::*;
pub use signing::*;
pub use variant::*;
