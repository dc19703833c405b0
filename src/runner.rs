//! Command execution shared by the pybolt and lightbolt binaries.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use indicatif::MultiProgress;
use log::debug;

use crate::cli::{CreateArgs, ServeCreateArgs};
use crate::error::Result;
use crate::framework::Framework;
use crate::generator::{GenerateOptions, GeneratedProject, Generator};
use crate::progress::ProgressBarReporter;
use crate::renderer::MiniJinjaRenderer;
use crate::server;
use crate::templates::TemplateStore;

/// Path to show in the suggested `cd` command: relative to the current
/// directory when the project lives below it.
pub fn cd_target(project_dir: &Path) -> PathBuf {
    std::env::current_dir()
        .ok()
        .and_then(|cwd| project_dir.strip_prefix(cwd).ok().map(Path::to_path_buf))
        .filter(|relative| !relative.as_os_str().is_empty())
        .unwrap_or_else(|| project_dir.to_path_buf())
}

/// Validates the framework, generates the project and prints where it is.
///
/// The framework is checked before anything touches the filesystem. On a
/// terminal the progress bar is drawn through `progress`.
pub fn create(
    args: &CreateArgs,
    progress: &MultiProgress,
) -> Result<(Framework, GeneratedProject)> {
    let framework: Framework = args.framework.parse()?;

    let store = TemplateStore::locate(args.templates.clone());
    debug!("Using templates from the {}", store.source());
    let template_dir = store.template_dir(framework)?;

    let engine = MiniJinjaRenderer::new();
    let reporter = if std::io::stderr().is_terminal() {
        ProgressBarReporter::new(progress)
    } else {
        ProgressBarReporter::hidden()
    };

    let options = GenerateOptions {
        template_dir,
        project_name: args.name.clone(),
        output_dir: args.output.clone(),
        skip_install: args.skip_install,
        python: args.python.clone(),
    };
    let project = Generator::new(&engine, &reporter).generate(&options)?;

    println!("Project created at {}", project.path.display());
    println!("  cd {}", cd_target(&project.path).display());
    Ok((framework, project))
}

/// `create` followed by the development server, unless `--no-serve` is given.
pub fn create_and_serve(args: &ServeCreateArgs, progress: &MultiProgress) -> Result<()> {
    let (framework, project) = create(&args.create, progress)?;
    if args.no_serve {
        debug!("Not starting the development server (--no-serve)");
        return Ok(());
    }
    server::launch(framework, &project.path, args.create.python.as_deref())?;
    Ok(())
}
