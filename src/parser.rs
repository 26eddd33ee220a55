//! Answer resolution.
//! Combines schema defaults, user overrides, preloaded answers and prompts
//! into the final answer object exposed to templates as `cookiecutter`.

use crate::config::{Config, OptionKind, TemplateOption};
use crate::constants::CONTEXT_NAMESPACE;
use crate::error::{Error, Result};
use crate::prompt::Prompter;
use crate::renderer::TemplateRenderer;
use indexmap::IndexMap;
use log::debug;
use std::io::Read;

/// Where preloaded answers come from.
#[derive(Debug)]
pub enum AnswerSource {
    /// Content read from stdin
    Stdin(String),
    Replay(serde_json::Value),
    None,
}

/// Wraps answers into the template context.
pub fn template_context(answers: &serde_json::Map<String, serde_json::Value>) -> serde_json::Value {
    let mut root = serde_json::Map::new();
    root.insert(CONTEXT_NAMESPACE.to_string(), serde_json::Value::Object(answers.clone()));
    serde_json::Value::Object(root)
}

/// Parses `key=value` pairs given on the command line.
///
/// # Errors
/// * `Error::ConfigError` for a pair without `=` or with an empty key
pub fn parse_extra_context<S: AsRef<str>>(pairs: &[S]) -> Result<IndexMap<String, serde_json::Value>> {
    let mut context = IndexMap::new();
    for pair in pairs {
        let pair = pair.as_ref();
        match pair.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                context.insert(key.trim().to_string(), serde_json::Value::String(value.to_string()));
            }
            _ => {
                return Err(Error::ConfigError(format!(
                    "Invalid extra context '{pair}', expected KEY=VALUE"
                )))
            }
        }
    }
    Ok(context)
}

/// Interprets user supplied booleans the way the CLI accepts them.
pub fn coerce_bool(value: &serde_json::Value) -> Option<bool> {
    match value {
        serde_json::Value::Bool(b) => Some(*b),
        serde_json::Value::String(s) => match s.trim().to_lowercase().as_str() {
            "1" | "true" | "t" | "yes" | "y" | "on" => Some(true),
            "0" | "false" | "f" | "no" | "n" | "off" => Some(false),
            _ => None,
        },
        serde_json::Value::Number(n) => n.as_i64().and_then(|n| match n {
            0 => Some(false),
            1 => Some(true),
            _ => None,
        }),
        _ => None,
    }
}

fn value_to_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Renders the templated parts of an option against the answers so far:
/// the text default and every choice entry.
pub fn render_option(
    option: &TemplateOption,
    context: &serde_json::Value,
    engine: &dyn TemplateRenderer,
) -> Result<TemplateOption> {
    let kind = match &option.kind {
        OptionKind::Text { default } => OptionKind::Text { default: engine.render(default, context)? },
        OptionKind::Toggle { default } => OptionKind::Toggle { default: *default },
        OptionKind::Choice { choices } => OptionKind::Choice {
            choices: choices
                .iter()
                .map(|choice| engine.render(choice, context))
                .collect::<Result<Vec<_>>>()?,
        },
    };
    Ok(TemplateOption { name: option.name.clone(), kind, prompt: option.prompt.clone() })
}

/// Computes the default of a rendered option: its own default, or the
/// override if any.
///
/// # Errors
/// * `Error::ValidationError` for a toggle override that is not a boolean,
///   or a choice override outside the declared choices
pub fn get_default(
    option: &TemplateOption,
    override_value: Option<&serde_json::Value>,
) -> Result<serde_json::Value> {
    match &option.kind {
        OptionKind::Text { default } => Ok(serde_json::Value::String(
            override_value.map(value_to_string).unwrap_or_else(|| default.clone()),
        )),
        OptionKind::Toggle { default } => match override_value {
            Some(v) => coerce_bool(v).map(serde_json::Value::Bool).ok_or_else(|| {
                Error::ValidationError(format!(
                    "'{}' expects a boolean, got {}",
                    option.name, v
                ))
            }),
            None => Ok(serde_json::Value::Bool(*default)),
        },
        OptionKind::Choice { choices } => match override_value {
            Some(v) => {
                let wanted = value_to_string(v);
                if choices.contains(&wanted) {
                    Ok(serde_json::Value::String(wanted))
                } else {
                    Err(Error::ValidationError(format!(
                        "'{}' must be one of [{}], got '{}'",
                        option.name,
                        choices.join(", "),
                        wanted
                    )))
                }
            }
            None => Ok(serde_json::Value::String(choices[0].clone())),
        },
    }
}

/// Reads everything piped to stdin.
pub fn load_from_stdin() -> Result<String> {
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}

/// Parses preloaded answers; anything that is not a JSON object counts as
/// no answers.
pub fn get_preloaded_answers(content: &str) -> serde_json::Value {
    match serde_json::from_str::<serde_json::Value>(content.trim()) {
        Ok(value @ serde_json::Value::Object(_)) => value,
        _ => {
            debug!("No preloaded answers found");
            serde_json::Value::Null
        }
    }
}

pub fn get_answers_from(source: AnswerSource) -> Result<serde_json::Value> {
    match source {
        AnswerSource::Stdin(content) => Ok(get_preloaded_answers(&content)),
        AnswerSource::Replay(answers) => Ok(answers),
        AnswerSource::None => Ok(serde_json::Value::Null),
    }
}

/// Resolves every option of `config` into an answer.
///
/// # Arguments
/// * `overrides` - Default overrides (user config, then extra context)
/// * `preloaded_answers` - Answers taken verbatim, never prompted
///
/// # Returns
/// * `Result<serde_json::Value>` - Object of answers, public options first
///   followed by private entries
pub fn get_answers(
    engine: &dyn TemplateRenderer,
    prompt: &dyn Prompter,
    config: &Config,
    overrides: &IndexMap<String, serde_json::Value>,
    preloaded_answers: &serde_json::Value,
) -> Result<serde_json::Value> {
    let mut answers = serde_json::Map::new();

    for (key, option) in &config.options {
        let value = if let Some(preloaded) = preloaded_answers.get(key) {
            debug!("Using preloaded answer for '{key}'");
            preloaded.clone()
        } else {
            let current_context = template_context(&answers);
            let option = render_option(option, &current_context, engine)?;
            let default_value = get_default(&option, overrides.get(key))?;
            prompt.answer(&option, default_value)?
        };
        answers.insert(key.clone(), value);
    }

    for (key, value) in &config.private {
        answers.insert(key.clone(), value.clone());
    }

    Ok(serde_json::Value::Object(answers))
}
