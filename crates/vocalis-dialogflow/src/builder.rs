//! Project-level Dialogflow builds
//!
//! [`DialogflowBuilder`] ties the pure transforms to a project: it loads the
//! merged model for a locale, expands the model locale into platform locales,
//! and keeps the agent metadata files in sync.

use crate::agent::{self, AgentSettings};
use crate::context::BuildContext;
use crate::error::Result;
use crate::files::AgentLayout;
use crate::forward::{forward_build, BuildReport};
use crate::reverse::reverse_build;
use crate::PLATFORM_ID;
use camino::Utf8PathBuf;
use serde_json::Value;
use std::fs;
use tracing::{debug, info};
use vocalis_core::locale::locale_prefix;
use vocalis_core::{LocaleResolver, ModelSource, NeutralModel, ProjectConfig};

/// Dialogflow builds for one project
pub struct DialogflowBuilder<'a, S: ModelSource> {
    source: &'a S,
    config: &'a ProjectConfig,
    layout: AgentLayout,
}

impl<'a, S: ModelSource> DialogflowBuilder<'a, S> {
    /// Builder writing to `<buildDir>/dialogflow`
    pub fn new(source: &'a S, config: &'a ProjectConfig) -> Self {
        Self::with_layout(source, config, AgentLayout::new(config.build_dir().join(PLATFORM_ID)))
    }

    pub fn with_layout(source: &'a S, config: &'a ProjectConfig, layout: AgentLayout) -> Self {
        Self {
            source,
            config,
            layout,
        }
    }

    pub fn layout(&self) -> &AgentLayout {
        &self.layout
    }

    fn resolver(&self) -> LocaleResolver {
        self.config.locale_resolver(Some(PLATFORM_ID))
    }

    /// Platform locales a model locale is built for
    pub fn platform_locales(&self, model_locale: &str) -> Vec<String> {
        self.resolver().resolve(model_locale)
    }

    /// Forward build of one model locale into all of its platform locales
    pub fn build(&self, locale: &str, stage: Option<&str>) -> Result<BuildReport> {
        let model = self.source.model(locale, stage, Some(PLATFORM_ID))?;
        let mut report = BuildReport::default();

        for platform_locale in self.platform_locales(locale) {
            debug!("Building {} as {}", locale, platform_locale);
            let ctx = BuildContext::new(self.layout.clone(), &platform_locale)
                .with_model_locale(locale)
                .with_stage(stage);
            let built = forward_build(&ctx, &model)?;

            for name in built.intents {
                if !report.intents.contains(&name) {
                    report.intents.push(name);
                }
            }
            for name in built.entities {
                if !report.entities.contains(&name) {
                    report.entities.push(name);
                }
            }
            for file in built.files {
                if !report.files.contains(&file) {
                    report.files.push(file);
                }
            }
        }

        Ok(report)
    }

    /// Write `package.json` and `agent.json` for the built model locales
    pub fn write_agent(&self, model_locales: &[String], stage: Option<&str>) -> Result<Utf8PathBuf> {
        let resolver = self.resolver();
        let default_locale = resolver.default_locale(
            self.config.default_locale(Some(PLATFORM_ID), stage),
            model_locales,
        )?;

        let mut locales: Vec<String> = Vec::new();
        for model_locale in model_locales {
            for locale in resolver.resolve(model_locale) {
                let locale = locale.to_lowercase();
                if !locales.contains(&locale) {
                    locales.push(locale);
                }
            }
        }

        // The invocation comes from the model file closest to the default locale
        let invocation_locale = model_locales
            .iter()
            .find(|l| **l == default_locale)
            .or_else(|| {
                model_locales
                    .iter()
                    .find(|l| locale_prefix(l) == locale_prefix(&default_locale))
            })
            .or_else(|| model_locales.first())
            .map(String::as_str)
            .unwrap_or(default_locale.as_str());
        let model = self.source.model(invocation_locale, stage, Some(PLATFORM_ID))?;

        let settings = AgentSettings {
            display_name: agent::display_name(&model.invocation, invocation_locale)?,
            default_locale: default_locale.to_lowercase(),
            locales,
            endpoint: self
                .config
                .platform_option(PLATFORM_ID, "endpoint", stage)
                .and_then(Value::as_str)
                .map(str::to_string),
        };

        if agent::write_package(&self.layout)? {
            debug!("Created {}", self.layout.package_file());
        }
        let path = agent::write_agent(&self.layout, &settings)?;
        info!("Updated {}", path);
        Ok(path)
    }

    /// Reverse build of the agent files written for `platform_locale` into a
    /// model for `model_locale`
    pub fn reverse(&self, model_locale: &str, platform_locale: &str) -> Result<NeutralModel> {
        let ctx = BuildContext::new(self.layout.clone(), platform_locale)
            .with_model_locale(model_locale);
        reverse_build(&ctx)
    }

    /// Pair every `agent.json` language with the model locale it was built from.
    ///
    /// Agent languages are lowercase, so matching against `model_locales` ignores
    /// case: first a direct match, then any model locale that resolves to the
    /// language. A language with no model keeps its own spelling. Each model
    /// locale appears once, preferring the language spelled like the model.
    pub fn reverse_locales(&self, model_locales: &[String]) -> Result<Vec<(String, String)>> {
        let resolver = self.resolver();
        let mut targets: Vec<(String, String)> = Vec::new();

        for agent_locale in self.agent_locales()? {
            let model_locale = model_locales
                .iter()
                .find(|m| m.eq_ignore_ascii_case(&agent_locale))
                .or_else(|| {
                    model_locales.iter().find(|m| {
                        resolver
                            .resolve(m)
                            .iter()
                            .any(|l| l.eq_ignore_ascii_case(&agent_locale))
                    })
                })
                .cloned()
                .unwrap_or_else(|| agent_locale.clone());

            match targets.iter_mut().find(|(m, _)| *m == model_locale) {
                Some(target) => {
                    if model_locale.eq_ignore_ascii_case(&agent_locale) {
                        target.1 = agent_locale;
                    }
                }
                None => targets.push((model_locale, agent_locale)),
            }
        }

        Ok(targets)
    }

    /// Locales declared in `agent.json`, default language first
    pub fn agent_locales(&self) -> Result<Vec<String>> {
        Ok(agent::read_agent(&self.layout)?
            .map(|a| a.locales())
            .unwrap_or_default())
    }

    /// Whether a forward build has produced intents before
    pub fn has_agent(&self) -> bool {
        self.layout.intents_dir().is_dir()
    }

    /// Remove the agent directory. Returns whether anything was removed.
    pub fn clean(&self) -> Result<bool> {
        let root = self.layout.root();
        if !root.exists() {
            return Ok(false);
        }
        fs::remove_dir_all(root)?;
        info!("Removed {}", root);
        Ok(true)
    }
}
