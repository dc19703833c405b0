//! Dependency installation for generated projects.
//! Delegates to `python -m pip install -r requirements.txt`; installer
//! failures are reported, never raised.

use std::path::{Path, PathBuf};
use std::process::Command;

use log::{debug, info, warn};

use crate::error::Error;

/// Dependency manifest looked up at the project root
pub const MANIFEST_FILE: &str = "requirements.txt";

/// Environment variable selecting the python executable
pub const PYTHON_ENV: &str = "PYBOLT_PYTHON";

/// Python executable used when none is given.
pub fn default_python() -> &'static str {
    if cfg!(windows) {
        "python"
    } else {
        "python3"
    }
}

/// Result of an installation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// The project has no manifest; nothing to install.
    NoManifest,
    Installed,
    /// The installer could not be started (`code` is `None`) or exited non-zero.
    Failed { code: Option<i32>, stderr: String },
}

impl InstallOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, InstallOutcome::Failed { .. })
    }
}

/// Runs pip against a project's `requirements.txt`.
#[derive(Debug, Clone)]
pub struct Installer {
    python: String,
}

impl Default for Installer {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Installer {
    pub fn new(python: Option<String>) -> Self {
        Self { python: python.unwrap_or_else(|| default_python().to_string()) }
    }

    pub fn python(&self) -> &str {
        &self.python
    }

    pub fn manifest_path(project_dir: &Path) -> PathBuf {
        project_dir.join(MANIFEST_FILE)
    }

    /// Command line a user can run to retry the installation by hand.
    pub fn manual_command(&self, project_dir: &Path) -> String {
        format!(
            "{} -m pip install -r {}",
            self.python,
            Self::manifest_path(project_dir).display()
        )
    }

    /// Installs the dependencies declared in `project_dir/requirements.txt`.
    ///
    /// The installer runs with `project_dir` as its working directory and its
    /// output captured; captured stdout is logged at debug level.
    pub fn install(&self, project_dir: &Path) -> InstallOutcome {
        let manifest = Self::manifest_path(project_dir);
        if !manifest.is_file() {
            warn!("No {MANIFEST_FILE} found, skipping dependency installation.");
            return InstallOutcome::NoManifest;
        }

        let command = self.manual_command(project_dir);
        info!("Installing dependencies with: {command}");

        let output = Command::new(&self.python)
            .args(["-m", "pip", "install", "-r"])
            .arg(&manifest)
            .current_dir(project_dir)
            .output();

        let outcome = match output {
            Ok(output) => {
                debug!("{}", String::from_utf8_lossy(&output.stdout).trim_end());
                if output.status.success() {
                    InstallOutcome::Installed
                } else {
                    InstallOutcome::Failed {
                        code: output.status.code(),
                        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                    }
                }
            }
            Err(e) => {
                warn!("Could not start '{}': {}", self.python, e);
                InstallOutcome::Failed { code: None, stderr: e.to_string() }
            }
        };

        match &outcome {
            InstallOutcome::Installed => info!("Dependencies installed successfully!"),
            InstallOutcome::Failed { code, stderr } => {
                if !stderr.trim().is_empty() {
                    debug!("{}", stderr.trim_end());
                }
                warn!("{}", Error::InstallFailure { command, code: *code });
            }
            InstallOutcome::NoManifest => {}
        }

        outcome
    }
}
