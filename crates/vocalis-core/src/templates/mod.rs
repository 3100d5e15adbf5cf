//! Project scaffolding templates
//!
//! `vocalis.yaml` is rendered from an embedded Tera template. Project templates
//! (README, per-locale model files) come from the embedded
//! `project-templates.yaml` and are rendered with the same context.

mod context;

pub use context::{LocaleMapping, ScaffoldContext};

use crate::error::{Error, Result};
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use tera::Tera;
use tracing::debug;

const PROJECT_TEMPLATES_YAML: &str = include_str!("../../templates/project-templates.yaml");

/// Complete template set from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateConfig {
    pub version: String,
    pub templates: BTreeMap<String, ProjectTemplate>,
}

/// Individual project template definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectTemplate {
    pub description: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Extra files, path to content; both are rendered
    #[serde(default)]
    pub files: BTreeMap<String, String>,
    /// Model file content, rendered once per locale into `models/<locale>.json`
    pub model: String,
}

/// Registry of embedded templates
pub struct TemplateRegistry {
    tera: Tera,
    config: TemplateConfig,
}

impl TemplateRegistry {
    /// Create a registry from the embedded templates
    pub fn new() -> Result<Self> {
        Self::from_yaml(PROJECT_TEMPLATES_YAML)
    }

    /// Create a registry from a custom project template set
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template("vocalis.yaml", include_str!("vocalis.yaml.tera"))?;

        let config: TemplateConfig = serde_yaml_ng::from_str(yaml)?;
        Ok(Self { tera, config })
    }

    /// Names of all project templates
    pub fn template_names(&self) -> Vec<&str> {
        self.config.templates.keys().map(String::as_str).collect()
    }

    /// Find a template by name or alias
    pub fn get(&self, name: &str) -> Result<(&str, &ProjectTemplate)> {
        self.config
            .templates
            .iter()
            .find(|(key, template)| *key == name || template.aliases.iter().any(|a| a == name))
            .map(|(key, template)| (key.as_str(), template))
            .ok_or_else(|| Error::unknown_template(name))
    }

    /// Render vocalis.yaml
    pub fn render_config(&self, context: &ScaffoldContext) -> Result<String> {
        debug!("Rendering vocalis.yaml for project {}", context.name);
        let rendered = self.tera.render("vocalis.yaml", &context.to_tera_context()?)?;
        Ok(rendered)
    }

    /// Render a template file set into `target_dir`, returning the created files
    pub fn scaffold(
        &self,
        template_name: &str,
        context: &ScaffoldContext,
        target_dir: &Utf8Path,
    ) -> Result<Vec<Utf8PathBuf>> {
        let (_, template) = self.get(template_name)?;
        let tera_context = context.to_tera_context()?;
        let mut created = Vec::new();

        let config_path = target_dir.join("vocalis.yaml");
        write_file(&config_path, &self.render_config(context)?)?;
        created.push(config_path);

        let model = Tera::one_off(&template.model, &tera_context, false)?;
        // Rendered models must be valid JSON before they are written out
        serde_json::from_str::<serde_json::Value>(&model)?;
        for locale in &context.locales {
            let path = target_dir.join("models").join(format!("{}.json", locale));
            write_file(&path, &model)?;
            created.push(path);
        }

        for (path_template, content_template) in &template.files {
            let relative = Tera::one_off(path_template, &tera_context, false)?;
            let content = Tera::one_off(content_template, &tera_context, false)?;
            let path = target_dir.join(relative);
            write_file(&path, &content)?;
            created.push(path);
        }

        Ok(created)
    }
}

fn write_file(path: &Utf8Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    debug!("Created {}", path);
    Ok(())
}
