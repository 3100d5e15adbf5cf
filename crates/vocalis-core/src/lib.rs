//! # vocalis-core
//!
//! Core library for the Vocalis CLI providing:
//! - The platform-neutral language model (intents, phrases, inputs, input types)
//! - Project configuration parsing (vocalis.yaml) with stage overrides
//! - Locale validation and generic-to-specific locale resolution
//! - Deep merging of JSON values with configurable array strategies
//! - Project scaffolding templates

pub mod config;
pub mod error;
pub mod locale;
pub mod merge;
pub mod model;
pub mod project;
pub mod templates;

pub use config::ProjectConfig;
pub use error::{Error, Result};
pub use locale::LocaleResolver;
pub use merge::{ArrayStrategy, DeepMerge};
pub use model::{Input, InputType, InputTypeRef, InputTypeValue, Intent, Invocation, NeutralModel};
pub use project::{ModelSource, Project};
