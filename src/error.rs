//! Error handling for pybake.
//! Defines the error type and result alias used throughout the application.

use thiserror::Error;

/// Custom error types for pybake operations.
///
/// This enum represents all possible errors that can occur while loading a
/// template, resolving answers and generating a project.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    /// Represents errors that occur during template processing
    #[error("Template error: {0}.")]
    TemplateError(String),

    /// Rendering failures raised by MiniJinja, including references to
    /// undeclared options and unbalanced blocks.
    #[error("Template rendering error: {0}.")]
    MinijinjaError(#[from] minijinja::Error),

    /// Represents errors that occur during configuration parsing or processing
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    #[error("JSON error: {0}.")]
    JSONParseError(#[from] serde_json::Error),

    #[error("YAML error: {0}.")]
    YAMLParseError(#[from] serde_yaml::Error),

    /// Represents errors that occur during hook script execution
    #[error("Hook execution error: {0}.")]
    HookError(String),

    /// Represents validation failures in answers
    #[error("Validation error: {0}.")]
    ValidationError(String),

    /// Represents errors in processing .pybakeignore files
    #[error("Ignore file error: {0}.")]
    IgnoreError(String),

    #[error("Git error: {0}.")]
    Git2Error(#[from] git2::Error),

    #[error("Output directory '{output_dir}' already exists. Use --overwrite-if-exists to overwrite it")]
    OutputDirectoryExistsError { output_dir: String },

    #[error("Template directory '{template_dir}' does not exist")]
    TemplateDoesNotExistsError { template_dir: String },

    /// Failure while processing a single template entry.
    #[error("Cannot process '{source_path}': {e}")]
    ProcessError { source_path: String, e: String },
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
