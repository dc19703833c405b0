//! Command-line interface for the pybolt and lightbolt binaries.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

use crate::installer::PYTHON_ENV;
use crate::templates::TEMPLATES_ENV;

/// Arguments of the `create` command shared by both front ends.
#[derive(clap::Args, Debug, Clone)]
pub struct CreateArgs {
    /// Name of your project
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Backend framework (fastapi, flask or django)
    #[arg(short, long, value_name = "FRAMEWORK")]
    pub framework: String,

    /// Output directory
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output: PathBuf,

    /// Skip installing dependencies
    #[arg(long)]
    pub skip_install: bool,

    /// Python executable used to install dependencies and run the project
    #[arg(long, value_name = "EXE", env = PYTHON_ENV)]
    pub python: Option<String>,

    /// Directory containing the framework templates
    #[arg(long, value_name = "DIR", env = TEMPLATES_ENV)]
    pub templates: Option<PathBuf>,
}

/// Command-line arguments of `pybolt`.
#[derive(Parser, Debug)]
#[command(
    name = "pybolt",
    author,
    version,
    about = "PyBolt - Scaffold Python backend projects instantly.",
    long_about = None
)]
pub struct Args {
    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new project from a framework template
    Create(CreateArgs),
}

/// `create` for lightbolt, which also starts the development server.
#[derive(clap::Args, Debug, Clone)]
pub struct ServeCreateArgs {
    #[command(flatten)]
    pub create: CreateArgs,

    /// Do not start the development server after generation
    #[arg(long)]
    pub no_serve: bool,
}

/// Command-line arguments of `lightbolt`.
#[derive(Parser, Debug)]
#[command(
    name = "lightbolt",
    author,
    version,
    about = "lightbolt - Scaffold Python backend projects instantly.",
    long_about = None
)]
pub struct LightboltArgs {
    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: LightboltCommand,
}

#[derive(Subcommand, Debug)]
pub enum LightboltCommand {
    /// Create a new project and start its development server
    Create(ServeCreateArgs),
}

/// Parses command line arguments.
///
/// # Exits
/// * With status code 1 and the help text if no command is given
/// * With clap's default error handling for other argument errors
pub fn get_args<T: Parser>() -> T {
    match T::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if matches!(
                e.kind(),
                ErrorKind::MissingSubcommand
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) {
                let mut command = <T as CommandFactory>::command().help_template(
                    r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                );
                let _ = command.print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
