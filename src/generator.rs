//! Project generation: render a template, confirm where the project landed,
//! install its dependencies and report progress along the way.

use std::fs;
use std::path::{Component, Path, PathBuf};
use std::time::{Duration, SystemTime};

use log::{debug, info, warn};
use regex::Regex;

use crate::config::TemplateConfig;
use crate::context::{project_slug, RenderContext};
use crate::error::{Error, Result};
use crate::installer::{InstallOutcome, Installer};
use crate::processor::Processor;
use crate::progress::{Reporter, INSTALL_UNITS, SCAFFOLD_UNITS};
use crate::renderer::TemplateRenderer;

/// How far before the invocation started a directory's mtime may be and
/// still count as freshly generated.
pub const MTIME_TOLERANCE: Duration = Duration::from_secs(1);

/// Inputs of a single "create project" operation.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub template_dir: PathBuf,
    pub project_name: String,
    pub output_dir: PathBuf,
    pub skip_install: bool,
    /// Python executable used for `pip`; defaults to `python3`/`python`
    pub python: Option<String>,
}

impl GenerateOptions {
    pub fn new<P: Into<PathBuf>, S: Into<String>>(template_dir: P, project_name: S) -> Self {
        Self {
            template_dir: template_dir.into(),
            project_name: project_name.into(),
            output_dir: PathBuf::from("."),
            skip_install: false,
            python: None,
        }
    }
}

/// A project that has been written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedProject {
    pub path: PathBuf,
    /// `None` when installation was skipped on request.
    pub install: Option<InstallOutcome>,
}

/// Checks that `name` can be used as a single directory name and yields an
/// importable `project_slug`.
pub fn validate_project_name(name: &str) -> Result<()> {
    let invalid = |reason: &str| Error::InvalidProjectName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.trim().is_empty() {
        return Err(invalid("name is empty"));
    }
    if name == "." || name == ".." {
        return Err(invalid("name must not be a relative path marker"));
    }
    let forbidden = Regex::new(r"[/\\\x00-\x1f]").map_err(|e| invalid(&e.to_string()))?;
    if forbidden.is_match(name) {
        return Err(invalid("name must not contain path separators or control characters"));
    }
    let slug = project_slug(name);
    match slug.chars().next() {
        None => Err(invalid("name has no letters or digits to derive a package name from")),
        Some(first) if first.is_ascii_digit() => Err(invalid(&format!(
            "package name '{slug}' would start with a digit"
        ))),
        Some(_) => Ok(()),
    }
}

/// Resolves `path` against the current directory without touching the
/// filesystem. `.` components are dropped; `..` is kept.
pub fn absolute(path: &Path) -> Result<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    Ok(joined.components().filter(|c| !matches!(c, Component::CurDir)).collect())
}

fn modified(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}

/// Finds the directory a renderer produced inside `output_dir`.
///
/// Checks `output_dir/expected_name` first. Otherwise looks at the immediate
/// child directories modified no earlier than `started_at` minus
/// [`MTIME_TOLERANCE`]: the most recently modified one whose name contains
/// `expected_name`, or failing that the most recently modified one overall.
pub fn locate_generated_dir(
    output_dir: &Path,
    expected_name: &str,
    started_at: SystemTime,
) -> Option<PathBuf> {
    let expected = output_dir.join(expected_name);
    if expected.is_dir() {
        return Some(expected);
    }

    let threshold = started_at.checked_sub(MTIME_TOLERANCE).unwrap_or(started_at);
    let recent: Vec<(PathBuf, SystemTime)> = fs::read_dir(output_dir)
        .ok()?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_dir())
        .filter_map(|path| modified(&path).map(|mtime| (path, mtime)))
        .filter(|(_, mtime)| *mtime >= threshold)
        .collect();

    let newest = |candidates: Vec<&(PathBuf, SystemTime)>| {
        candidates.into_iter().max_by_key(|(_, mtime)| *mtime).map(|(path, _)| path.clone())
    };

    let named: Vec<_> = recent
        .iter()
        .filter(|(path, _)| {
            path.file_name().is_some_and(|n| n.to_string_lossy().contains(expected_name))
        })
        .collect();
    newest(named).or_else(|| newest(recent.iter().collect()))
}

/// Coordinates rendering and installation into one operation.
pub struct Generator<'a> {
    engine: &'a dyn TemplateRenderer,
    reporter: &'a dyn Reporter,
}

impl<'a> Generator<'a> {
    pub fn new(engine: &'a dyn TemplateRenderer, reporter: &'a dyn Reporter) -> Self {
        Self { engine, reporter }
    }

    /// Creates `output_dir/project_name` from `template_dir`.
    ///
    /// # Errors
    /// * `Error::InvalidProjectName` for names that are not a single path segment
    /// * `Error::TemplateNotFound` if the template directory is missing
    /// * `Error::AlreadyExists` if the target directory is present
    /// * `Error::RenderFailure` if rendering stops partway
    ///
    /// Installer problems are logged and reported in [`GeneratedProject::install`].
    pub fn generate(&self, options: &GenerateOptions) -> Result<GeneratedProject> {
        validate_project_name(&options.project_name)?;

        let template_dir = absolute(&options.template_dir)?;
        let output_dir = absolute(&options.output_dir)?;

        if !template_dir.is_dir() {
            return Err(Error::TemplateNotFound {
                template_dir: template_dir.display().to_string(),
            });
        }

        let target_dir = output_dir.join(&options.project_name);
        if target_dir.exists() {
            return Err(Error::AlreadyExists { target_dir: target_dir.display().to_string() });
        }

        let config = TemplateConfig::load(&template_dir)?;
        if let Some(description) = &config.description {
            debug!("Template: {description}");
        }
        let context = RenderContext::for_template(&*options.project_name, &config, self.engine)?;
        let processor = Processor::new(self.engine, &template_dir)?;

        fs::create_dir_all(&output_dir)?;

        info!(
            "Generating project {} from template {}",
            options.project_name,
            template_dir.display()
        );
        let started_at = SystemTime::now();

        self.reporter.stage("Scaffolding project...");
        let rendered = processor.render_tree(&template_dir, &target_dir, &context.to_value());
        let rendered = match rendered {
            Ok(path) => path,
            Err(e) => {
                self.reporter.finish();
                return Err(e);
            }
        };
        self.reporter.advance(SCAFFOLD_UNITS);

        let project_dir =
            match locate_generated_dir(&output_dir, &options.project_name, started_at) {
                Some(found) => found,
                None => {
                    warn!(
                        "{}",
                        Error::DirectoryResolutionAmbiguous {
                            expected: rendered.display().to_string()
                        }
                    );
                    rendered
                }
            };

        let install = self.install_phase(&project_dir, options);
        self.reporter.finish();

        info!("Project ready: {}", project_dir.display());
        Ok(GeneratedProject { path: project_dir, install })
    }

    fn install_phase(
        &self,
        project_dir: &Path,
        options: &GenerateOptions,
    ) -> Option<InstallOutcome> {
        if options.skip_install {
            self.reporter.advance(INSTALL_UNITS);
            info!("Skipped installing dependencies (user requested).");
            return None;
        }

        if !Installer::manifest_path(project_dir).is_file() {
            self.reporter.advance(INSTALL_UNITS);
            info!("No requirements.txt found, skipped install.");
            return Some(InstallOutcome::NoManifest);
        }

        self.reporter.stage("Installing dependencies...");
        let outcome = Installer::new(options.python.clone()).install(project_dir);
        self.reporter.advance(INSTALL_UNITS);
        if !outcome.is_success() {
            warn!("Installation completed with issues.");
        }
        Some(outcome)
    }
}
