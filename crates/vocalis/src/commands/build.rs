//! `vocalis build` command handler

use anyhow::{bail, Context, Result};
use camino::Utf8Path;
use tracing::debug;
use vocalis_core::locale::validate_locale;
use vocalis_core::Project;
use vocalis_dialogflow::DialogflowBuilder;

use crate::cli::BuildArgs;
use crate::output;

pub fn run(args: BuildArgs, project_dir: Option<&Utf8Path>) -> Result<()> {
    let project = Project::open(project_dir).context("Failed to open Vocalis project")?;
    let builder = DialogflowBuilder::new(&project, project.config());
    debug!("Project root: {}", project.root());

    if args.reverse {
        reverse(&args, &project, &builder)
    } else {
        forward(&args, &project, &builder)
    }
}

fn forward(args: &BuildArgs, project: &Project, builder: &DialogflowBuilder<'_, Project>) -> Result<()> {
    let all_locales = project.locales()?;
    if all_locales.is_empty() {
        bail!("No language models found in {}", project.models_dir());
    }

    let locales = match &args.locale {
        Some(locale) => {
            validate_locale(locale)?;
            if !project.has_model(locale) {
                bail!("No language model for locale {} at {}", locale, project.model_path(locale));
            }
            vec![locale.clone()]
        }
        None => all_locales.clone(),
    };

    output::header("Build Dialogflow Agent");
    if let Some(stage) = &args.stage {
        output::kv("Stage", stage);
    }
    output::kv("Output", builder.layout().root().as_str());
    println!();

    if args.clean && builder.clean()? {
        output::info("Removed previous build output");
    }

    let mut files = 0;
    for locale in &locales {
        let spinner = output::spinner(&format!("Building {}...", locale));
        let result = builder
            .build(locale, args.stage.as_deref())
            .with_context(|| format!("Failed to build language model {}", locale));
        spinner.finish_and_clear();
        let report = result?;

        debug!("Wrote {} files for {}", report.files.len(), locale);
        files += report.files.len();
        output::success(&format!(
            "{} ({}): {} intents, {} entities",
            locale,
            builder.platform_locales(locale).join(", "),
            report.intents.len(),
            report.entities.len()
        ));
    }

    let agent = builder
        .write_agent(&all_locales, args.stage.as_deref())
        .context("Failed to write agent metadata")?;
    output::success(&format!("Updated {}", agent));

    println!();
    output::kv("Files written", &files.to_string());
    Ok(())
}

fn reverse(args: &BuildArgs, project: &Project, builder: &DialogflowBuilder<'_, Project>) -> Result<()> {
    if !builder.has_agent() {
        bail!(
            "No Dialogflow agent found at {}. Run `vocalis build` first.",
            builder.layout().root()
        );
    }

    let targets = builder
        .reverse_locales(&project.locales()?)
        .context("Failed to read agent languages")?;
    let targets = match &args.locale {
        Some(locale) => {
            let platform_locale = targets
                .into_iter()
                .find(|(model_locale, _)| model_locale == locale)
                .map(|(_, platform_locale)| platform_locale)
                .unwrap_or_else(|| locale.clone());
            vec![(locale.clone(), platform_locale)]
        }
        None => targets,
    };
    if targets.is_empty() {
        bail!("agent.json lists no languages. Pass --locale to choose one.");
    }

    // Check everything up front so a refused overwrite leaves all models untouched
    for (model_locale, _) in &targets {
        validate_locale(model_locale)?;
        if project.has_model(model_locale) && !args.force {
            bail!(
                "Language model {} already exists. Use --force to overwrite it.",
                project.model_path(model_locale)
            );
        }
    }

    output::header("Reverse Build Dialogflow Agent");
    for (model_locale, platform_locale) in &targets {
        let spinner = output::spinner(&format!("Reading {}...", platform_locale));
        let result = builder
            .reverse(model_locale, platform_locale)
            .with_context(|| format!("Failed to reverse build locale {}", platform_locale));
        spinner.finish_and_clear();
        let model = result?;

        if model.intents.is_empty() {
            output::warning(&format!("No intents found for {}", platform_locale));
        }
        let existed = project.has_model(model_locale);
        let path = project.save_model(model_locale, &model)?;
        if existed {
            output::success(&format!("Overwrote {}", path));
        } else {
            output::success(&format!("Created {}", path));
        }
    }

    Ok(())
}
