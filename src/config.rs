//! Optional per-template configuration.
//!
//! A template may ship `bolt.json`, `bolt.yml` or `bolt.yaml` at its root to
//! declare extra variables. Defaults are templates themselves and are rendered
//! in declaration order, so later variables can refer to earlier ones:
//!
//! ```yaml
//! description: Flask application
//! variables:
//!   project_slug: "{{ project_name | lower | replace('-', '_') }}"
//!   module_name: "{{ project_slug }}"
//! ```

use crate::error::{Error, Result};
use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Supported configuration file names, in lookup order
pub const CONFIG_FILES: [&str; 3] = ["bolt.json", "bolt.yml", "bolt.yaml"];

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TemplateConfig {
    /// Human readable summary shown in verbose output
    #[serde(default)]
    pub description: Option<String>,

    /// Variable name to default value template
    #[serde(default)]
    pub variables: IndexMap<String, String>,

    /// File the configuration was read from
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl TemplateConfig {
    /// Loads the configuration of `template_root`.
    ///
    /// Returns the default (empty) configuration when no file exists.
    ///
    /// # Errors
    /// * `Error::ConfigError` if a file exists but does not parse
    pub fn load<P: AsRef<Path>>(template_root: P) -> Result<Self> {
        for file in CONFIG_FILES {
            let config_path = template_root.as_ref().join(file);
            if config_path.is_file() {
                debug!("Loading configuration from {}", config_path.display());
                let content = std::fs::read_to_string(&config_path)?;
                let mut config = Self::parse(&content, file.ends_with(".json"))?;
                config.source = Some(config_path);
                return Ok(config);
            }
        }

        debug!("No template configuration found (tried: {})", CONFIG_FILES.join(", "));
        Ok(Self::default())
    }

    pub fn parse(content: &str, is_json: bool) -> Result<Self> {
        let parsed: std::result::Result<Self, String> = if is_json {
            serde_json::from_str(content).map_err(|e| e.to_string())
        } else {
            serde_yaml::from_str(content).map_err(|e| e.to_string())
        };

        // An empty yaml document deserializes to unit, not to a struct.
        match parsed {
            Ok(config) => Ok(config),
            Err(_) if content.trim().is_empty() => Ok(Self::default()),
            Err(e) => Err(Error::ConfigError(format!("Invalid configuration format: {e}"))),
        }
    }

    /// Location reported when the default of `key` fails to render.
    pub fn variable_location(&self, key: &str) -> String {
        match &self.source {
            Some(source) => format!("{} (variable '{key}')", source.display()),
            None => format!("variable '{key}'"),
        }
    }
}
