//! pybolt scaffolds Python backend projects from framework templates.
//! It renders a template tree with the project's name, installs the declared
//! dependencies and, for the lightbolt front end, starts the development server.

/// Command-line interface shared by the pybolt and lightbolt binaries
pub mod cli;

/// Optional per-template configuration
/// Supports JSON and YAML formats (bolt.json, bolt.yml, bolt.yaml)
pub mod config;

/// Render context built from the project name and template variables
pub mod context;

/// Error types and handling
pub mod error;

/// Supported frameworks and their development server commands
pub mod framework;

/// Project generation orchestration
pub mod generator;

/// File and directory ignore patterns
/// Processes .boltignore files to exclude specific paths
pub mod ignore;

/// Dependency installation through pip
pub mod installer;

pub mod logger;

/// Template tree processing
pub mod processor;

/// Progress reporting
pub mod progress;

/// Template string rendering
pub mod renderer;

/// Command execution for the binaries
pub mod runner;

/// Development server launcher
pub mod server;

/// Template store lookup
pub mod templates;
