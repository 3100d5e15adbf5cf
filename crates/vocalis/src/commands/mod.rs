//! CLI command implementations

pub mod build;
pub mod config;
pub mod new;
pub mod version;
