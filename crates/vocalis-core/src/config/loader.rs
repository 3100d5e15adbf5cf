//! Configuration file loading and stage-aware lookups

use super::types::{PlatformConfig, ProjectConfigFile};
use crate::error::{Error, Result};
use crate::locale::LocaleResolver;
use camino::{Utf8Path, Utf8PathBuf};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use tracing::debug;

/// Configuration file names to search for
pub const CONFIG_FILE_NAMES: &[&str] = &["vocalis.yaml", "vocalis.yml"];

/// Loaded Vocalis project configuration
#[derive(Debug, Clone)]
pub struct ProjectConfig {
    /// The parsed configuration
    pub config: ProjectConfigFile,

    /// Path to the configuration file
    pub config_path: Utf8PathBuf,

    /// Project root (the directory holding the configuration file)
    pub project_dir: Utf8PathBuf,
}

impl ProjectConfig {
    /// Load configuration from the specified file, or search upwards from the
    /// current directory
    pub fn load(path: Option<&Utf8Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load_file(p),
            None => {
                let cwd = std::env::current_dir()?;
                let cwd = Utf8PathBuf::try_from(cwd).map_err(|_| {
                    Error::invalid_config("Current directory path is not valid UTF-8")
                })?;
                Self::find_from(&cwd)
            }
        }
    }

    /// Search `start` and its parent directories for a configuration file
    pub fn find_from(start: &Utf8Path) -> Result<Self> {
        let mut current = start;

        loop {
            for name in CONFIG_FILE_NAMES {
                let path = current.join(name);
                if path.exists() {
                    return Self::load_file(&path);
                }
            }

            match current.parent() {
                Some(parent) => current = parent,
                None => break,
            }
        }

        Err(Error::config_not_found(
            "vocalis.yaml (searched current and parent directories)",
        ))
    }

    /// Load a specific configuration file
    pub fn load_file(path: &Utf8Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::config_not_found(path.as_str())
            } else {
                Error::Io(e)
            }
        })?;

        let config = Self::parse(&content)?;
        debug!("Loaded project configuration from {}", path);

        let project_dir = path
            .parent()
            .filter(|p| !p.as_str().is_empty())
            .map(|p| p.to_owned())
            .unwrap_or_else(|| Utf8PathBuf::from("."));

        Ok(Self {
            config,
            config_path: path.to_owned(),
            project_dir,
        })
    }

    /// Parse configuration from YAML text
    pub fn parse(content: &str) -> Result<ProjectConfigFile> {
        if content.trim().is_empty() {
            return Ok(ProjectConfigFile::default());
        }
        Ok(serde_yaml_ng::from_str(content)?)
    }

    /// Wrap an in-memory configuration rooted at `project_dir`
    pub fn from_parts(config: ProjectConfigFile, project_dir: impl Into<Utf8PathBuf>) -> Self {
        let project_dir = project_dir.into();
        Self {
            config,
            config_path: project_dir.join(CONFIG_FILE_NAMES[0]),
            project_dir,
        }
    }

    /// Get the inner configuration file
    pub fn inner(&self) -> &ProjectConfigFile {
        &self.config
    }

    /// Platform section from the root of the configuration
    pub fn platform(&self, platform: &str) -> Option<&PlatformConfig> {
        self.config.platforms.get(platform)
    }

    fn stage_platform(&self, platform: &str, stage: Option<&str>) -> Option<&PlatformConfig> {
        stage
            .and_then(|s| self.config.stages.get(s))
            .and_then(|s| s.platforms.get(platform))
    }

    /// Neutral overrides for `languageModel.<locale>`.
    ///
    /// A value configured for the active stage replaces the root value.
    pub fn language_model(&self, locale: &str, stage: Option<&str>) -> Option<&Value> {
        stage
            .and_then(|s| self.config.stages.get(s))
            .and_then(|s| s.language_model.get(locale))
            .or_else(|| self.config.language_model.get(locale))
    }

    /// Platform overrides for `<platform>.languageModel.<locale>`, stage first
    pub fn platform_language_model(
        &self,
        platform: &str,
        locale: &str,
        stage: Option<&str>,
    ) -> Option<&Value> {
        self.stage_platform(platform, stage)
            .and_then(|p| p.language_model.get(locale))
            .or_else(|| {
                self.platform(platform)
                    .and_then(|p| p.language_model.get(locale))
            })
    }

    /// Free-form plugin option (e.g. `dialogflow.endpoint`), stage first
    pub fn platform_option(&self, platform: &str, key: &str, stage: Option<&str>) -> Option<&Value> {
        self.stage_platform(platform, stage)
            .and_then(|p| p.options.get(key))
            .or_else(|| self.platform(platform).and_then(|p| p.options.get(key)))
    }

    /// Configured default locale, most specific source first:
    /// stage platform, platform, stage, root
    pub fn default_locale(&self, platform: Option<&str>, stage: Option<&str>) -> Option<&str> {
        let from_platform = platform.and_then(|p| {
            self.stage_platform(p, stage)
                .and_then(|c| c.default_locale.as_deref())
                .or_else(|| self.platform(p).and_then(|c| c.default_locale.as_deref()))
        });

        from_platform
            .or_else(|| {
                stage
                    .and_then(|s| self.config.stages.get(s))
                    .and_then(|s| s.default_locale.as_deref())
            })
            .or(self.config.default_locale.as_deref())
    }

    /// Locale resolver for a platform; platform mappings override root mappings
    pub fn locale_resolver(&self, platform: Option<&str>) -> LocaleResolver {
        let mut mappings: BTreeMap<String, Vec<String>> = self.config.locales.clone();
        if let Some(p) = platform.and_then(|p| self.platform(p)) {
            for (locale, resolved) in &p.locales {
                mappings.insert(locale.clone(), resolved.clone());
            }
        }
        LocaleResolver::new(mappings, self.config.locale_prefix_fallback)
    }

    /// Directory holding the neutral model files
    pub fn models_dir(&self) -> Utf8PathBuf {
        self.project_dir.join(&self.config.models_dir)
    }

    /// Directory receiving platform build output
    pub fn build_dir(&self) -> Utf8PathBuf {
        self.project_dir.join(&self.config.build_dir)
    }
}
