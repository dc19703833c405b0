//! Template store lookup.
//! The store is a directory holding one template tree per supported framework.

use std::fmt;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{Error, Result};
use crate::framework::Framework;

/// Environment variable that points at an alternative template store.
pub const TEMPLATES_ENV: &str = "PYBOLT_TEMPLATES";

/// Name of the store directory shipped next to the binary or in the source tree.
pub const TEMPLATES_DIR: &str = "templates";

/// Where the template store root was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreSource {
    /// Given explicitly on the command line or through the environment
    Explicit(PathBuf),
    /// Installed alongside the running executable
    Executable(PathBuf),
    /// Source tree the binary was built from
    Bundled(PathBuf),
}

impl fmt::Display for StoreSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreSource::Explicit(path) => write!(f, "explicit path: '{}'", path.display()),
            StoreSource::Executable(path) => {
                write!(f, "installation directory: '{}'", path.display())
            }
            StoreSource::Bundled(path) => write!(f, "bundled templates: '{}'", path.display()),
        }
    }
}

impl StoreSource {
    pub fn path(&self) -> &Path {
        match self {
            StoreSource::Explicit(path)
            | StoreSource::Executable(path)
            | StoreSource::Bundled(path) => path,
        }
    }
}

/// Directory containing one template per framework.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    source: StoreSource,
}

impl TemplateStore {
    /// Uses `root` as the store without probing any other location.
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { source: StoreSource::Explicit(root.into()) }
    }

    /// Resolves the store root.
    ///
    /// Order: `explicit` (the `--templates` flag, which clap also fills from
    /// `PYBOLT_TEMPLATES`), then `templates/` next to the executable, then the
    /// `templates/` directory of the source tree this binary was built from.
    pub fn locate(explicit: Option<PathBuf>) -> Self {
        if let Some(root) = explicit {
            return Self::new(root);
        }

        if let Some(root) = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join(TEMPLATES_DIR)))
            .filter(|root| root.is_dir())
        {
            return Self { source: StoreSource::Executable(root) };
        }

        let bundled = Path::new(env!("CARGO_MANIFEST_DIR")).join(TEMPLATES_DIR);
        Self { source: StoreSource::Bundled(bundled) }
    }

    pub fn source(&self) -> &StoreSource {
        &self.source
    }

    pub fn root(&self) -> &Path {
        self.source.path()
    }

    /// Returns the template directory for `framework`.
    ///
    /// # Errors
    /// * `Error::TemplateNotFound` if the directory is missing from the store
    pub fn template_dir(&self, framework: Framework) -> Result<PathBuf> {
        let dir = self.root().join(framework.as_str());
        debug!("Looking up {} template in {}", framework, self.source);
        if !dir.is_dir() {
            return Err(Error::TemplateNotFound { template_dir: dir.display().to_string() });
        }
        Ok(dir)
    }
}
