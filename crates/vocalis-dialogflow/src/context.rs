//! Explicit state of a single locale build

use crate::files::AgentLayout;

/// Everything a forward or reverse build needs to know about where it runs
#[derive(Debug, Clone)]
pub struct BuildContext {
    /// Agent directory the files are read from and written to
    pub layout: AgentLayout,

    /// Locale of the neutral model file (`en`)
    pub model_locale: String,

    /// Platform locale the agent files are written for (`en-US`)
    pub locale: String,

    /// Active stage, if any
    pub stage: Option<String>,
}

impl BuildContext {
    /// Context where the model locale and the platform locale are the same
    pub fn new(layout: AgentLayout, locale: impl Into<String>) -> Self {
        let locale = locale.into();
        Self {
            layout,
            model_locale: locale.clone(),
            locale,
            stage: None,
        }
    }

    pub fn with_model_locale(mut self, model_locale: impl Into<String>) -> Self {
        self.model_locale = model_locale.into();
        self
    }

    pub fn with_stage(mut self, stage: Option<&str>) -> Self {
        self.stage = stage.map(str::to_string);
        self
    }

    /// Locale suffix used in companion file names
    pub fn output_locale(&self) -> String {
        self.locale.to_lowercase()
    }
}
