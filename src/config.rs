//! Option schema handling for pybake templates.
//! Loads `cookiecutter.json` (or its YAML variants) from the template root
//! and turns it into an ordered set of options plus private entries.

use crate::constants::{CONFIG_FILES, COPY_WITHOUT_RENDER_KEY, PROMPTS_KEY};
use crate::error::{Error, Result};
use indexmap::IndexMap;
use log::debug;
use std::path::Path;

/// The kind of a public option, derived from its JSON value.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionKind {
    /// Free text. The default may reference earlier options.
    Text { default: String },
    /// Boolean toggle.
    Toggle { default: bool },
    /// Enumeration; the first choice is the default.
    Choice { choices: Vec<String> },
}

/// A single user-facing option declared in the schema.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateOption {
    pub name: String,
    pub kind: OptionKind,
    /// Human prompt from `__prompts__`, falls back to the option name.
    pub prompt: Option<String>,
}

impl TemplateOption {
    pub fn prompt_text(&self) -> &str {
        self.prompt.as_deref().unwrap_or(&self.name)
    }
}

/// Parsed option schema.
#[derive(Debug, Default)]
pub struct Config {
    /// Public options in declaration order.
    pub options: IndexMap<String, TemplateOption>,
    /// Keys starting with `_`, passed verbatim to the template context.
    pub private: IndexMap<String, serde_json::Value>,
    /// Globs of files copied without rendering.
    pub copy_without_render: Vec<String>,
}

impl Config {
    /// Names of toggle options whose answer is `true`.
    pub fn enabled_toggles<'a>(&'a self, answers: &'a serde_json::Value) -> Vec<&'a str> {
        self.options
            .values()
            .filter(|option| matches!(option.kind, OptionKind::Toggle { .. }))
            .filter(|option| answers.get(&option.name).and_then(|v| v.as_bool()) == Some(true))
            .map(|option| option.name.as_str())
            .collect()
    }
}

/// Loads the schema from a template directory, trying multiple file formats.
///
/// # Errors
/// * `Error::ConfigError` if none of the schema files exists
pub fn load_config<P: AsRef<Path>>(template_dir: P) -> Result<String> {
    for file in CONFIG_FILES {
        let config_path = template_dir.as_ref().join(file);
        if config_path.exists() {
            debug!("Loading configuration from {}", config_path.display());
            return Ok(std::fs::read_to_string(&config_path)?);
        }
    }

    Err(Error::ConfigError(format!(
        "No configuration file found (tried: {})",
        CONFIG_FILES.join(", ")
    )))
}

fn parse_option(name: &str, value: &serde_json::Value) -> Result<OptionKind> {
    match value {
        serde_json::Value::String(default) => Ok(OptionKind::Text { default: default.clone() }),
        serde_json::Value::Number(n) => Ok(OptionKind::Text { default: n.to_string() }),
        serde_json::Value::Bool(default) => Ok(OptionKind::Toggle { default: *default }),
        serde_json::Value::Array(items) => {
            if items.is_empty() {
                return Err(Error::ConfigError(format!(
                    "option '{name}' declares an empty list of choices"
                )));
            }
            let choices = items
                .iter()
                .map(|item| {
                    item.as_str().map(str::to_string).ok_or_else(|| {
                        Error::ConfigError(format!(
                            "option '{name}' has a non-string choice: {item}"
                        ))
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(OptionKind::Choice { choices })
        }
        other => Err(Error::ConfigError(format!(
            "option '{name}' has an unsupported value: {other}"
        ))),
    }
}

fn parse_string_list(key: &str, value: &serde_json::Value) -> Result<Vec<String>> {
    let invalid = || Error::ConfigError(format!("'{key}' must be a list of strings"));
    value
        .as_array()
        .ok_or_else(invalid)?
        .iter()
        .map(|item| item.as_str().map(str::to_string).ok_or_else(invalid))
        .collect()
}

/// Parses schema content, JSON first with YAML as the fallback.
///
/// # Errors
/// * `Error::ConfigError` if the content is neither a JSON nor a YAML
///   mapping, or if an option is malformed
pub fn parse_config(content: &str) -> Result<Config> {
    let raw: IndexMap<String, serde_json::Value> = match serde_json::from_str(content) {
        Ok(v) => v,
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("Invalid configuration format: {e}")))?,
    };

    let prompts: IndexMap<String, String> = match raw.get(PROMPTS_KEY) {
        Some(value) => serde_json::from_value(value.clone())
            .map_err(|e| Error::ConfigError(format!("Invalid '{PROMPTS_KEY}': {e}")))?,
        None => IndexMap::new(),
    };

    let mut config = Config::default();
    for (key, value) in raw {
        if key.starts_with('_') {
            if key == COPY_WITHOUT_RENDER_KEY {
                config.copy_without_render = parse_string_list(&key, &value)?;
            }
            config.private.insert(key, value);
            continue;
        }

        let kind = parse_option(&key, &value)?;
        let prompt = prompts.get(&key).cloned();
        config.options.insert(key.clone(), TemplateOption { name: key, kind, prompt });
    }

    debug!(
        "Parsed {} options and {} private entries",
        config.options.len(),
        config.private.len()
    );
    Ok(config)
}

/// Loads and parses the schema of a template directory.
pub fn get_config<P: AsRef<Path>>(template_dir: P) -> Result<Config> {
    let content = load_config(template_dir)?;
    parse_config(&content)
}
