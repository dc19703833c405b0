//! Supported backend frameworks.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A backend framework pybolt ships a template for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Framework {
    FastApi,
    Flask,
    Django,
}

impl Framework {
    pub const ALL: [Framework; 3] = [Framework::FastApi, Framework::Flask, Framework::Django];

    /// Identifier accepted on the command line and used as the template directory name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Framework::FastApi => "fastapi",
            Framework::Flask => "flask",
            Framework::Django => "django",
        }
    }

    /// Comma separated list of every accepted identifier.
    pub fn choices() -> String {
        Self::ALL.iter().map(|f| f.as_str()).collect::<Vec<_>>().join(", ")
    }

    /// Arguments passed after the python executable to start a development server
    /// from inside a generated project.
    pub fn dev_server_args(&self) -> &'static [&'static str] {
        match self {
            Framework::FastApi => &["-m", "uvicorn", "main:app", "--reload"],
            Framework::Flask => &["-m", "flask", "--app", "app", "run", "--debug"],
            Framework::Django => &["manage.py", "runserver"],
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Framework {
    type Err = Error;

    /// Case-insensitive lookup of a framework identifier.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|f| f.as_str() == wanted).ok_or_else(|| {
            Error::InvalidFramework { framework: s.to_string(), choices: Self::choices() }
        })
    }
}
