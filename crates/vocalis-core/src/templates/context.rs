//! Template context for project scaffolding

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tera::Context;

use crate::error::Result;

/// One generic-to-specific locale mapping rendered into vocalis.yaml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocaleMapping {
    pub locale: String,
    pub resolved: Vec<String>,
}

/// Context for rendering a new project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScaffoldContext {
    /// Project name
    pub name: String,
    /// Invocation name written into every model
    pub invocation: String,
    /// Model locales to create
    pub locales: Vec<String>,
    /// Default locale written into vocalis.yaml
    pub default_locale: String,
    /// Explicit locale mappings
    pub locale_mappings: Vec<LocaleMapping>,
    /// Platform sections to create
    pub platforms: Vec<String>,
    /// Creation date (YYYY-MM-DD)
    pub date: String,
}

impl ScaffoldContext {
    /// Create a context for `name` with the given locales.
    ///
    /// The invocation defaults to the project name with dashes and underscores
    /// replaced by spaces; the default locale is the first locale.
    pub fn new(name: &str, locales: Vec<String>) -> Self {
        let default_locale = locales.first().cloned().unwrap_or_else(|| "en".to_string());
        let locales = if locales.is_empty() {
            vec![default_locale.clone()]
        } else {
            locales
        };

        Self {
            name: name.to_string(),
            invocation: name.replace(['-', '_'], " "),
            locales,
            default_locale,
            locale_mappings: Vec::new(),
            platforms: vec!["dialogflow".to_string()],
            date: Local::now().format("%Y-%m-%d").to_string(),
        }
    }

    pub fn with_invocation(mut self, invocation: impl Into<String>) -> Self {
        self.invocation = invocation.into();
        self
    }

    pub fn with_locale_mappings(mut self, mappings: BTreeMap<String, Vec<String>>) -> Self {
        self.locale_mappings = mappings
            .into_iter()
            .map(|(locale, resolved)| LocaleMapping { locale, resolved })
            .collect();
        self
    }

    /// Convert to a Tera context
    pub fn to_tera_context(&self) -> Result<Context> {
        Ok(Context::from_serialize(self)?)
    }
}
