//! `vocalis new` command handler

use anyhow::{anyhow, bail, Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use vocalis_core::locale::validate_locale;
use vocalis_core::templates::{ScaffoldContext, TemplateRegistry};

use crate::cli::NewArgs;
use crate::output;

/// Create a new project directory from a template
pub fn run(args: NewArgs, base_dir: Option<&Utf8Path>) -> Result<()> {
    output::header("Create New Project");

    let base = match base_dir {
        Some(dir) => dir.to_owned(),
        None => current_dir()?,
    };
    let project_dir = base.join(&args.name);

    if is_non_empty_dir(&project_dir)? && !args.force {
        bail!(
            "Directory {} already exists and is not empty. Use --force to create the project anyway.",
            project_dir
        );
    }

    let locales = if args.locales.is_empty() {
        vec!["en".to_string()]
    } else {
        args.locales.clone()
    };
    for locale in &locales {
        validate_locale(locale)?;
    }

    let registry = TemplateRegistry::new().context("Failed to load project templates")?;
    let (template_name, template) = registry.get(&args.template).map_err(|e| {
        anyhow!(
            "{}. Available templates: {}",
            e,
            registry.template_names().join(", ")
        )
    })?;

    output::kv("Project name", &args.name);
    output::kv("Template", &format!("{} ({})", template_name, template.description));
    output::kv("Locales", &locales.join(", "));
    output::kv("Location", project_dir.as_str());
    println!();

    let mut context = ScaffoldContext::new(&args.name, locales);
    if let Some(invocation) = &args.invocation {
        context = context.with_invocation(invocation);
    }

    let created = registry
        .scaffold(template_name, &context, &project_dir)
        .with_context(|| format!("Failed to create project in {}", project_dir))?;

    for path in &created {
        let relative = path.strip_prefix(&project_dir).unwrap_or(path);
        output::success(&format!("Created {}", relative));
    }

    println!();
    output::info("Next steps:");
    println!("  cd {}", args.name);
    println!("  vocalis build");

    Ok(())
}

fn current_dir() -> Result<Utf8PathBuf> {
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    Utf8PathBuf::try_from(cwd).map_err(|e| anyhow!("Current directory is not valid UTF-8: {}", e))
}

fn is_non_empty_dir(dir: &Utf8Path) -> Result<bool> {
    if !dir.exists() {
        return Ok(false);
    }
    if !dir.is_dir() {
        bail!("{} exists and is not a directory", dir);
    }
    Ok(dir.read_dir_utf8()?.next().is_some())
}
