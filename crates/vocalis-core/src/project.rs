//! Project layout and language model loading

use crate::config::ProjectConfig;
use crate::error::{Error, Result};
use crate::merge::DeepMerge;
use crate::model::NeutralModel;
use camino::{Utf8Path, Utf8PathBuf};
use serde_json::Value;
use std::fs;
use tracing::debug;

/// Source of neutral language models.
///
/// Platform builders only need this seam, so tests can hand them models
/// without a project on disk.
pub trait ModelSource {
    /// Model for `locale` with the configured overrides for `stage` applied.
    /// When `platform` is given, that platform's overrides are applied too.
    fn model(&self, locale: &str, stage: Option<&str>, platform: Option<&str>)
        -> Result<NeutralModel>;
}

/// A Vocalis project on disk
#[derive(Debug, Clone)]
pub struct Project {
    config: ProjectConfig,
}

impl Project {
    /// Open the project whose configuration is found at or above `dir`
    /// (or the current directory)
    pub fn open(dir: Option<&Utf8Path>) -> Result<Self> {
        let config = match dir {
            Some(d) => ProjectConfig::find_from(d)?,
            None => ProjectConfig::load(None)?,
        };
        Ok(Self { config })
    }

    /// Wrap an already loaded configuration
    pub fn from_config(config: ProjectConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    /// Project root directory
    pub fn root(&self) -> &Utf8Path {
        &self.config.project_dir
    }

    pub fn models_dir(&self) -> Utf8PathBuf {
        self.config.models_dir()
    }

    pub fn build_dir(&self) -> Utf8PathBuf {
        self.config.build_dir()
    }

    /// Build output directory of a platform plugin
    pub fn platform_dir(&self, platform: &str) -> Utf8PathBuf {
        self.build_dir().join(platform)
    }

    /// Whether a platform has been built before
    pub fn has_platform(&self, platform: &str) -> bool {
        self.platform_dir(platform).is_dir()
    }

    /// Path of the model file for `locale`
    pub fn model_path(&self, locale: &str) -> Utf8PathBuf {
        self.models_dir().join(format!("{}.json", locale))
    }

    pub fn has_model(&self, locale: &str) -> bool {
        self.model_path(locale).is_file()
    }

    /// Locales with a model file, sorted
    pub fn locales(&self) -> Result<Vec<String>> {
        let dir = self.models_dir();
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut locales = Vec::new();
        for entry in dir.read_dir_utf8()? {
            let entry = entry?;
            let path = entry.path();
            if path.extension() == Some("json") {
                if let Some(stem) = path.file_stem() {
                    locales.push(stem.to_string());
                }
            }
        }
        locales.sort();
        Ok(locales)
    }

    /// Model file for `locale` as raw JSON, without any overrides
    pub fn raw_model(&self, locale: &str) -> Result<Value> {
        let path = self.model_path(locale);
        let content = fs::read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::model_not_found(locale, path.as_str())
            } else {
                Error::Io(e)
            }
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Write a model file for `locale`, creating the models directory if needed
    pub fn save_model(&self, locale: &str, model: &NeutralModel) -> Result<Utf8PathBuf> {
        let dir = self.models_dir();
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }
        let path = self.model_path(locale);
        fs::write(&path, model.to_json_pretty()?)?;
        debug!("Saved language model {}", path);
        Ok(path)
    }
}

impl ModelSource for Project {
    fn model(
        &self,
        locale: &str,
        stage: Option<&str>,
        platform: Option<&str>,
    ) -> Result<NeutralModel> {
        let mut model = self.raw_model(locale)?;
        let merger = DeepMerge::concat_arrays();

        if let Some(overrides) = self.config.language_model(locale, stage) {
            debug!("Merging languageModel.{} overrides", locale);
            merger.merge(&mut model, overrides);
        }

        if let Some(platform) = platform {
            if let Some(overrides) = self.config.platform_language_model(platform, locale, stage) {
                debug!("Merging {}.languageModel.{} overrides", platform, locale);
                merger.merge(&mut model, overrides);
            }
        }

        Ok(serde_json::from_value(model)?)
    }
}
