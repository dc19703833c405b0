//! File and directory ignore pattern handling for templates.
//! This module processes .boltignore files to exclude specific paths
//! from template processing, similar to .gitignore functionality.

use crate::config::CONFIG_FILES;
use crate::error::{Error, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use log::debug;
use std::{fs::read_to_string, path::Path};

/// Ignore file name looked up in the template root
pub const IGNORE_FILE: &str = ".boltignore";

/// Patterns that are always ignored
pub const DEFAULT_IGNORE_PATTERNS: &[&str] = &[
    "**/.git/**",
    "**/.git",
    "**/__pycache__/**",
    "**/__pycache__",
    "**/*.pyc",
    "**/.DS_Store",
];

/// Reads the .boltignore file of a template and builds the set of glob patterns
/// that exclude entries from rendering.
///
/// # Arguments
/// * `template_root` - Root directory of the template
///
/// # Returns
/// * `Result<GlobSet>` - Default patterns, the ignore file itself, the template
///   configuration files and every pattern listed in .boltignore
///
/// # Notes
/// - A missing .boltignore is not an error
/// - Blank lines and lines starting with `#` are skipped
/// - Invalid patterns result in `Error::IgnoreError`
pub fn parse_boltignore_file<P: AsRef<Path>>(template_root: P) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();

    let always = DEFAULT_IGNORE_PATTERNS.iter().copied().chain([IGNORE_FILE]).chain(CONFIG_FILES);
    for pattern in always {
        builder.add(compile(pattern)?);
    }

    let ignore_path = template_root.as_ref().join(IGNORE_FILE);
    if let Ok(contents) = read_to_string(&ignore_path) {
        for line in contents.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            builder.add(compile(line)?);
        }
    } else {
        debug!("{} does not exist", ignore_path.display());
    }

    builder
        .build()
        .map_err(|e| Error::IgnoreError(format!("{IGNORE_FILE} loading failed: {e}")))
}

fn compile(pattern: &str) -> Result<Glob> {
    Glob::new(pattern)
        .map_err(|e| Error::IgnoreError(format!("{IGNORE_FILE} loading failed: {e}")))
}
