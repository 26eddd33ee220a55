//! Answer validation.
//! Checks the resolved answers against a JSON Schema derived from the
//! option declarations, then applies the Python project checks to the
//! well-known options when the template declares them.

use crate::config::{Config, OptionKind};
use crate::error::{Error, Result};
use regex::Regex;

/// Python reserved keywords, as reported by `keyword.kwlist`.
pub const PYTHON_KEYWORDS: [&str; 35] = [
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield",
];

/// Oldest Python release generated projects may target.
pub const MIN_PYTHON_VERSION: (u32, u32) = (3, 10);

/// Builds the JSON Schema that answers must satisfy.
pub fn answers_schema(config: &Config) -> serde_json::Value {
    let mut properties = serde_json::Map::new();
    for (name, option) in &config.options {
        let property = match &option.kind {
            OptionKind::Text { .. } => serde_json::json!({ "type": "string" }),
            OptionKind::Toggle { .. } => serde_json::json!({ "type": "boolean" }),
            // Templated choices are only known after rendering.
            OptionKind::Choice { choices } if choices.iter().any(|c| c.contains("{{") || c.contains("{%")) => {
                serde_json::json!({ "type": "string" })
            }
            OptionKind::Choice { choices } => serde_json::json!({ "type": "string", "enum": choices }),
        };
        properties.insert(name.clone(), property);
    }
    let required: Vec<&String> = config.options.keys().collect();
    serde_json::json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

fn schema_errors(config: &Config, answers: &serde_json::Value) -> Result<Vec<String>> {
    let schema = answers_schema(config);
    let validator = jsonschema::validator_for(&schema)
        .map_err(|e| Error::ConfigError(format!("Invalid answers schema: {e}")))?;
    Ok(validator.iter_errors(answers).map(|e| e.to_string()).collect())
}

pub fn validate_project_name(project_name: &str) -> std::result::Result<(), String> {
    if project_name.is_empty() {
        return Err("Project name cannot be empty".to_string());
    }
    let pattern = Regex::new(r"^[a-zA-Z0-9]([a-zA-Z0-9\s\-_]*[a-zA-Z0-9])?$").map_err(|e| e.to_string())?;
    if !pattern.is_match(project_name) {
        return Err(
            "Project name must start and end with alphanumeric characters and can contain spaces, hyphens, and underscores in between"
                .to_string(),
        );
    }
    Ok(())
}

pub fn validate_package_name(package_name: &str) -> std::result::Result<(), String> {
    if package_name.is_empty() {
        return Err("Package name cannot be empty".to_string());
    }
    let pattern = Regex::new(r"^[a-zA-Z][a-zA-Z0-9_]*$").map_err(|e| e.to_string())?;
    if !pattern.is_match(package_name) {
        return Err(format!(
            "Package name '{package_name}' must be a valid Python identifier (start with letter, contain only letters, numbers, and underscores)"
        ));
    }
    if PYTHON_KEYWORDS.contains(&package_name) {
        return Err(format!("'{package_name}' is a Python reserved keyword"));
    }
    Ok(())
}

pub fn validate_version(version: &str) -> std::result::Result<(), String> {
    if version.is_empty() {
        return Err("Version cannot be empty".to_string());
    }
    let pattern = Regex::new(r"^\d+\.\d+\.\d+([a-zA-Z0-9\-\.]*)?$").map_err(|e| e.to_string())?;
    if !pattern.is_match(version) {
        return Err(format!("Version '{version}' must follow semantic versioning (e.g., 1.0.0)"));
    }
    Ok(())
}

pub fn validate_python_version(python_version: &str) -> std::result::Result<(), String> {
    let invalid = || format!("Python version '{python_version}' must be in format X.Y (e.g., 3.12)");
    let (major, minor) = python_version.split_once('.').ok_or_else(invalid)?;
    let major: u32 = major.parse().map_err(|_| invalid())?;
    let minor: u32 = minor.parse().map_err(|_| invalid())?;
    if (major, minor) < MIN_PYTHON_VERSION {
        return Err(format!(
            "Minimum supported Python version is {}.{}",
            MIN_PYTHON_VERSION.0, MIN_PYTHON_VERSION.1
        ));
    }
    Ok(())
}

type Check = fn(&str) -> std::result::Result<(), String>;

const PROJECT_CHECKS: [(&str, Check); 4] = [
    ("project_name", validate_project_name),
    ("package_name", validate_package_name),
    ("version", validate_version),
    ("python_version", validate_python_version),
];

/// Validates resolved answers.
///
/// # Errors
/// * `Error::ValidationError` listing every failed check
pub fn validate_answers(config: &Config, answers: &serde_json::Value) -> Result<()> {
    let mut failures = schema_errors(config, answers)?;

    for (key, check) in PROJECT_CHECKS {
        if !config.options.contains_key(key) {
            continue;
        }
        if let Some(value) = answers.get(key).and_then(|v| v.as_str()) {
            if let Err(message) = check(value) {
                failures.push(message);
            }
        }
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(Error::ValidationError(failures.join("; ")))
    }
}
