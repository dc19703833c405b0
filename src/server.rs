//! Development server launcher for generated projects.

use std::path::Path;
use std::process::{Command, Stdio};

use log::{info, warn};

use crate::error::{Error, Result};
use crate::framework::Framework;
use crate::installer::default_python;

/// How a development server session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerExit {
    pub command: String,
    /// `None` when the server was terminated by a signal
    pub code: Option<i32>,
}

impl ServerExit {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Builds the command that starts `framework`'s development server.
pub fn dev_server_command(framework: Framework, project_dir: &Path, python: &str) -> Command {
    let mut command = Command::new(python);
    command.args(framework.dev_server_args()).current_dir(project_dir);
    command
}

fn describe(python: &str, framework: Framework) -> String {
    std::iter::once(python)
        .chain(framework.dev_server_args().iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Starts the development server inside `project_dir` and blocks until it exits.
///
/// The server inherits the terminal. A non-zero exit is logged and returned,
/// not raised.
///
/// # Errors
/// * `Error::ServerLaunch` if the process cannot be started
pub fn launch(
    framework: Framework,
    project_dir: &Path,
    python: Option<&str>,
) -> Result<ServerExit> {
    let python = python.unwrap_or(default_python());
    let description = describe(python, framework);
    info!("Starting {} development server: {}", framework, description);

    let status = dev_server_command(framework, project_dir, python)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|source| Error::ServerLaunch { command: description.clone(), source })?;

    let exit = ServerExit { command: description, code: status.code() };
    if !exit.success() {
        warn!("Development server exited with status: {}", status);
    }
    Ok(exit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dev_server_command() {
        let command = dev_server_command(Framework::Django, Path::new("blog"), "python3");
        assert_eq!(command.get_program(), "python3");
        let args: Vec<_> = command.get_args().collect();
        assert_eq!(args, ["manage.py", "runserver"]);
        assert_eq!(command.get_current_dir(), Some(Path::new("blog")));
    }

    #[test]
    fn test_describe() {
        assert_eq!(describe("py", Framework::FastApi), "py -m uvicorn main:app --reload");
    }

    #[test]
    fn test_missing_executable_is_launch_error() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let result =
            launch(Framework::Flask, temp_dir.path(), Some("pybolt-no-such-python-binary"));
        assert!(matches!(result, Err(Error::ServerLaunch { .. })));
    }
}
