//! Error handling for pybolt.
//! Defines the error type and result alias used throughout the crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while scaffolding a project.
///
/// `InstallFailure` and `DirectoryResolutionAmbiguous` are never returned as
/// `Err` from the generator; they are built so the warning that gets logged
/// reads the same as every other error.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    /// Represents errors that occur while rendering a single template string
    #[error("Template error: {0}.")]
    MinijinjaError(#[from] minijinja::Error),

    /// Represents errors in the optional template configuration file
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// Represents errors in processing .boltignore files
    #[error("Ignore file error: {0}.")]
    IgnoreError(String),

    #[error("Template directory does not exist: {template_dir}.")]
    TemplateNotFound { template_dir: String },

    #[error("Target directory already exists: {target_dir}.")]
    AlreadyExists { target_dir: String },

    /// Rendering stopped partway; files written so far are left on disk.
    #[error("Failed to render '{path}': {source}")]
    RenderFailure {
        path: String,
        #[source]
        source: Box<Error>,
    },

    #[error("Invalid framework '{framework}'. Choose from: {choices}.")]
    InvalidFramework { framework: String, choices: String },

    #[error("Invalid project name '{name}': {reason}.")]
    InvalidProjectName { name: String, reason: String },

    #[error("Dependency installation failed ({}). Run manually: {command}", display_code(.code))]
    InstallFailure { command: String, code: Option<i32> },

    #[error("Could not find generated project folder automatically, assuming {expected}.")]
    DirectoryResolutionAmbiguous { expected: String },

    #[error("Failed to launch development server with '{command}': {source}")]
    ServerLaunch {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

fn display_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code: {code}"),
        None => "no exit code".to_string(),
    }
}

impl Error {
    /// Wraps `self` as the cause of a rendering failure at `path`.
    pub fn at_path<P: Into<PathBuf>>(self, path: P) -> Self {
        Error::RenderFailure {
            path: path.into().display().to_string(),
            source: Box::new(self),
        }
    }
}

/// Convenience type alias for Results with pybolt's Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) -> ! {
    eprintln!("{err}");
    std::process::exit(1);
}
