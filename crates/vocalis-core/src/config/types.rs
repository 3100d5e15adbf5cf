//! Configuration types for vocalis.yaml

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Root vocalis.yaml configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfigFile {
    /// Project name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Locale used as the platform's primary language
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_locale: Option<String>,

    /// Explicit generic-to-specific locale mappings (e.g. `en: [en-US, en-GB]`)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub locales: BTreeMap<String, Vec<String>>,

    /// Derive a generic locale from a specific one (`en-US` -> `en`) when no
    /// explicit mapping exists
    #[serde(default = "default_true")]
    pub locale_prefix_fallback: bool,

    /// Directory holding `<locale>.json` model files, relative to the project root
    #[serde(default = "default_models_dir")]
    pub models_dir: String,

    /// Directory receiving platform build output, relative to the project root
    #[serde(default = "default_build_dir")]
    pub build_dir: String,

    /// Per-locale overrides merged into every platform's model
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub language_model: BTreeMap<String, Value>,

    /// Stage-specific overrides, selected with `--stage`
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub stages: BTreeMap<String, StageConfig>,

    /// Platform plugin sections keyed by platform id (`dialogflow`, ...)
    #[serde(flatten)]
    pub platforms: BTreeMap<String, PlatformConfig>,
}

impl Default for ProjectConfigFile {
    fn default() -> Self {
        Self {
            name: None,
            default_locale: None,
            locales: BTreeMap::new(),
            locale_prefix_fallback: true,
            models_dir: default_models_dir(),
            build_dir: default_build_dir(),
            language_model: BTreeMap::new(),
            stages: BTreeMap::new(),
            platforms: BTreeMap::new(),
        }
    }
}

/// Overrides applied when a stage is active
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_locale: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub language_model: BTreeMap<String, Value>,

    #[serde(flatten)]
    pub platforms: BTreeMap<String, PlatformConfig>,
}

/// Settings for a single platform plugin
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_locale: Option<String>,

    /// Platform-specific locale mappings, taking precedence over the root ones
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub locales: BTreeMap<String, Vec<String>>,

    /// Per-locale overrides merged only into this platform's model
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub language_model: BTreeMap<String, Value>,

    /// Any other plugin options
    #[serde(flatten)]
    pub options: Map<String, Value>,
}

fn default_true() -> bool {
    true
}

fn default_models_dir() -> String {
    "models".to_string()
}

fn default_build_dir() -> String {
    "build".to_string()
}
