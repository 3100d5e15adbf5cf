//! Agent metadata files (`agent.json`, `package.json`)

use crate::error::{Error, Result};
use crate::files::{read_json, write_json, AgentLayout};
use crate::PLATFORM_ID;
use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::debug;
use vocalis_core::Invocation;

/// Version written to a fresh `package.json`
pub const PACKAGE_VERSION: &str = "1.0.0";

/// `agent.json`; fields the build does not manage are kept as they are
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub supported_languages: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook: Option<Map<String, Value>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AgentFile {
    /// Default language followed by the supported languages
    pub fn locales(&self) -> Vec<String> {
        let mut locales: Vec<String> = self.language.iter().cloned().collect();
        for locale in &self.supported_languages {
            if !locales.contains(locale) {
                locales.push(locale.clone());
            }
        }
        locales
    }
}

/// Values the build writes into `agent.json`
#[derive(Debug, Clone, Default)]
pub struct AgentSettings {
    pub display_name: String,
    pub default_locale: String,
    /// Every built locale; the default locale is filtered out
    pub locales: Vec<String>,
    pub endpoint: Option<String>,
}

/// Dialogflow display name from the model invocation
pub fn display_name(invocation: &Invocation, locale: &str) -> Result<String> {
    invocation
        .for_platform(PLATFORM_ID)
        .map(str::to_string)
        .ok_or_else(|| Error::MissingInvocation {
            locale: locale.to_string(),
        })
}

/// Load `agent.json` if it exists
pub fn read_agent(layout: &AgentLayout) -> Result<Option<AgentFile>> {
    let path = layout.agent_file();
    if !path.is_file() {
        return Ok(None);
    }
    Ok(Some(read_json(&path)?))
}

/// Create or update `agent.json`
pub fn write_agent(layout: &AgentLayout, settings: &AgentSettings) -> Result<Utf8PathBuf> {
    let mut agent = read_agent(layout)?.unwrap_or_default();

    agent.display_name = Some(settings.display_name.clone());
    agent.language = Some(settings.default_locale.clone());
    agent.supported_languages = settings
        .locales
        .iter()
        .filter(|l| **l != settings.default_locale)
        .fold(Vec::new(), |mut acc, l| {
            if !acc.contains(l) {
                acc.push(l.clone());
            }
            acc
        });

    if let Some(endpoint) = &settings.endpoint {
        let webhook = agent.webhook.get_or_insert_with(Map::new);
        webhook.insert("url".to_string(), json!(endpoint));
        webhook.insert("available".to_string(), json!(true));
    }

    let path = layout.agent_file();
    write_json(&path, &agent)?;
    Ok(path)
}

/// Write `package.json` unless it already exists. Returns whether it was written.
pub fn write_package(layout: &AgentLayout) -> Result<bool> {
    let path = layout.package_file();
    if path.exists() {
        debug!("{} exists, leaving it alone", path);
        return Ok(false);
    }
    write_json(&path, &json!({ "version": PACKAGE_VERSION }))?;
    Ok(true)
}
