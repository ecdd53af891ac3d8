//! CLI command implementations.

pub mod config;
pub mod deps;
pub mod resolve;
pub mod signing;
