//! Config command

use anyhow::{Context, Result};
use camino::Utf8Path;
use vocalis_core::Project;
use vocalis_dialogflow::PLATFORM_ID;

use crate::cli::{ConfigCommands, ConfigLocalesArgs, ConfigShowArgs};
use crate::output;

pub fn run(cmd: ConfigCommands, project_dir: Option<&Utf8Path>) -> Result<()> {
    let project = Project::open(project_dir).context("Failed to open Vocalis project")?;

    match cmd {
        ConfigCommands::Show(args) => show(args, &project),
        ConfigCommands::Locales(args) => locales(args, &project),
    }
}

fn show(args: ConfigShowArgs, project: &Project) -> Result<()> {
    let config = project.config();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&config.config)?);
    } else {
        output::kv("Config file", config.config_path.as_str());
        println!();
        print!("{}", serde_yaml_ng::to_string(&config.config)?);
    }

    Ok(())
}

fn locales(args: ConfigLocalesArgs, project: &Project) -> Result<()> {
    let config = project.config();
    let resolver = config.locale_resolver(Some(PLATFORM_ID));
    let model_locales = project.locales()?;

    output::header("Locales");
    if model_locales.is_empty() {
        output::warning(&format!("No language models found in {}", project.models_dir()));
        return Ok(());
    }

    for locale in &model_locales {
        output::kv(locale, &resolver.resolve(locale).join(", "));
    }

    let default_locale = resolver.default_locale(
        config.default_locale(Some(PLATFORM_ID), args.stage.as_deref()),
        &model_locales,
    )?;
    println!();
    output::info(&format!("Default locale: {}", default_locale));

    Ok(())
}
