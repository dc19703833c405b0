//! Template tree processing.
//! Walks a template directory, renders every path and text file through the
//! template renderer and materializes the result under the target directory.

use globset::GlobSet;
use log::{debug, warn};
use std::fs;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

use crate::{
    error::{Error, Result},
    ignore::parse_boltignore_file,
    renderer::{has_markup, TemplateRenderer},
};

/// What happened to a single template entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryAction {
    CreateDir,
    Render,
    Copy,
    Skip,
}

/// Ensures `target_dir` does not exist yet, then creates it.
///
/// The parent must already exist. `create_dir` is not recursive, so two
/// invocations racing for the same name cannot both succeed.
pub fn create_target_dir(target_dir: &Path) -> Result<()> {
    if target_dir.exists() {
        return Err(Error::AlreadyExists { target_dir: target_dir.display().to_string() });
    }
    fs::create_dir(target_dir).map_err(|e| match e.kind() {
        std::io::ErrorKind::AlreadyExists => {
            Error::AlreadyExists { target_dir: target_dir.display().to_string() }
        }
        _ => Error::IoError(e),
    })
}

/// Validates a rendered relative path.
///
/// Rejects empty paths, absolute paths, empty segments and anything that
/// would climb out of the target directory.
pub fn is_rendered_path_valid(rendered: &str) -> bool {
    if rendered.trim().is_empty() || rendered.contains("//") {
        return false;
    }
    let path = Path::new(rendered);
    path.components().all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// Renders template trees onto disk.
pub struct Processor<'a> {
    engine: &'a dyn TemplateRenderer,
    ignored: GlobSet,
}

impl<'a> Processor<'a> {
    /// Creates a processor for `template_root`, loading its ignore rules.
    pub fn new(engine: &'a dyn TemplateRenderer, template_root: &Path) -> Result<Self> {
        let ignored = parse_boltignore_file(template_root)?;
        Ok(Self { engine, ignored })
    }

    /// Renders `template_root` into `target_dir` and returns the directory it created.
    ///
    /// # Errors
    /// * `Error::TemplateNotFound` if `template_root` is not a directory
    /// * `Error::AlreadyExists` if `target_dir` exists
    /// * `Error::RenderFailure` if any entry fails to render or copy;
    ///   everything written before the failure stays on disk
    pub fn render_tree(
        &self,
        template_root: &Path,
        target_dir: &Path,
        context: &serde_json::Value,
    ) -> Result<PathBuf> {
        if !template_root.is_dir() {
            return Err(Error::TemplateNotFound {
                template_dir: template_root.display().to_string(),
            });
        }
        create_target_dir(target_dir)?;

        debug!("Processing template {}", template_root.display());

        let walker = WalkDir::new(template_root).min_depth(1).sort_by_file_name();
        let mut it = walker.into_iter();
        while let Some(entry) = it.next() {
            let entry = entry.map_err(|e| {
                let path = e.path().map(Path::to_path_buf).unwrap_or_default();
                Error::IoError(e.into()).at_path(path)
            })?;
            let source = entry.path();
            let relative = source
                .strip_prefix(template_root)
                .map_err(|e| Error::ConfigError(e.to_string()).at_path(source))?;

            if self.ignored.is_match(relative) {
                debug!("Skipping '{}' (ignored)", relative.display());
                if entry.file_type().is_dir() {
                    it.skip_current_dir();
                }
                continue;
            }

            let action =
                self.process_entry(source, relative, entry.file_type().is_dir(), target_dir, context)?;
            if action == EntryAction::Skip && entry.file_type().is_dir() {
                it.skip_current_dir();
            }
        }

        Ok(target_dir.to_path_buf())
    }

    fn process_entry(
        &self,
        source: &Path,
        relative: &Path,
        is_dir: bool,
        target_dir: &Path,
        context: &serde_json::Value,
    ) -> Result<EntryAction> {
        let relative_str = relative.to_string_lossy();
        let rendered = self.render_path(&relative_str, context).map_err(|e| e.at_path(source))?;

        if !is_rendered_path_valid(&rendered) {
            warn!("Skipping '{}': rendered path '{}' is not usable", relative_str, rendered);
            return Ok(EntryAction::Skip);
        }

        let target = target_dir.join(&rendered);
        let action = if is_dir {
            fs::create_dir_all(&target).map_err(|e| Error::IoError(e).at_path(&target))?;
            EntryAction::CreateDir
        } else {
            self.write_file(source, &target, context).map_err(|e| e.at_path(source))?
        };

        debug!("{:?}: '{}'", action, target.display());
        Ok(action)
    }

    fn render_path(&self, relative: &str, context: &serde_json::Value) -> Result<String> {
        if has_markup(relative) {
            self.engine.render(relative, context)
        } else {
            Ok(relative.to_string())
        }
    }

    fn write_file(
        &self,
        source: &Path,
        target: &Path,
        context: &serde_json::Value,
    ) -> Result<EntryAction> {
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }

        let bytes = fs::read(source)?;
        let action = match String::from_utf8(bytes) {
            Ok(text) if has_markup(&text) => {
                let rendered = self.engine.render(&text, context)?;
                fs::write(target, rendered)?;
                EntryAction::Render
            }
            Ok(text) => {
                fs::write(target, text)?;
                EntryAction::Copy
            }
            Err(binary) => {
                fs::write(target, binary.into_bytes())?;
                EntryAction::Copy
            }
        };

        let permissions = fs::metadata(source)?.permissions();
        fs::set_permissions(target, permissions)?;
        Ok(action)
    }
}
