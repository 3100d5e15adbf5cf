//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

/// Vocalis - build voice applications from one language model
#[derive(Parser, Debug)]
#[command(name = "vocalis")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress log output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Project directory (defaults to the current directory and its parents)
    #[arg(short = 'C', long, global = true)]
    pub project: Option<Utf8PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new project from a template
    New(NewArgs),

    /// Build platform files from the language models
    Build(BuildArgs),

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Show version information
    Version(VersionArgs),
}

// New command
#[derive(Args, Debug)]
pub struct NewArgs {
    /// Project name, also the directory to create
    pub name: String,

    /// Project template
    #[arg(short, long, default_value = "hello-world")]
    pub template: String,

    /// Model locales to create (repeatable)
    #[arg(short, long = "locale", value_name = "LOCALE")]
    pub locales: Vec<String>,

    /// Invocation name (defaults to the project name)
    #[arg(short, long)]
    pub invocation: Option<String>,

    /// Create the project even if the directory is not empty
    #[arg(short, long)]
    pub force: bool,
}

// Build command
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Only build this model locale
    #[arg(short, long)]
    pub locale: Option<String>,

    /// Stage whose overrides are applied
    #[arg(short, long, env = "VOCALIS_STAGE")]
    pub stage: Option<String>,

    /// Remove previous build output first
    #[arg(long, conflicts_with = "reverse")]
    pub clean: bool,

    /// Turn the platform files back into language models
    #[arg(short, long)]
    pub reverse: bool,

    /// Overwrite existing language models when reversing
    #[arg(short, long, requires = "reverse")]
    pub force: bool,
}

// Config commands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show resolved configuration
    Show(ConfigShowArgs),

    /// Show how model locales map to platform locales
    Locales(ConfigLocalesArgs),
}

#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ConfigLocalesArgs {
    /// Stage used to pick the default locale
    #[arg(short, long)]
    pub stage: Option<String>,
}

// Version command
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
