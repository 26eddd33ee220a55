//! pybake generates Python package skeletons from a Jinja project template.
//! It resolves a `cookiecutter.json` option schema into answers, renders
//! paths and file contents, runs optional hooks and writes the project.

/// Command-line interface module for the pybake application
pub mod cli;

/// Option schema handling
/// Supports JSON and YAML formats (cookiecutter.json, cookiecutter.yml, cookiecutter.yaml)
pub mod config;

/// Common constants
pub mod constants;

/// Error types and handling for the pybake application
pub mod error;

/// End-to-end generation flow
pub mod generate;

/// Pre and post generation hook processing
/// Handles execution of scripts in:
/// - hooks/pre_gen_project
/// - hooks/post_gen_project
pub mod hooks;

/// File and directory ignore patterns
/// Processes .pybakeignore files and `_copy_without_render` globs
pub mod ignore;

/// Template sources: local directories and git repositories
pub mod loader;

/// Answer resolution from defaults, overrides and preloaded answers
pub mod parser;

/// Generation plan building and application
pub mod processor;

/// User input and interaction handling
pub mod prompt;

/// Template rendering
pub mod renderer;

/// Recorded answers
pub mod replay;

/// User configuration file
pub mod user_config;

/// Answer validation
pub mod validate;
