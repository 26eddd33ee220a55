//! User input and interaction handling.
//! Interactive prompts go through dialoguer; `--no-input` swaps in a
//! prompter that always takes the default.

use crate::config::{OptionKind, TemplateOption};
use crate::error::{Error, Result};
use dialoguer::{Confirm, Input, Select};

/// Source of answers and confirmations.
pub trait Prompter {
    /// Asks a yes/no question. `skip_prompt` answers yes without asking.
    fn confirm(&self, skip_prompt: bool, prompt: String) -> Result<bool>;

    /// Asks for the value of an option.
    ///
    /// # Arguments
    /// * `option` - Option being asked for
    /// * `default_value` - Resolved default: a string for text options, a
    ///   boolean for toggles and the pre-selected choice for enumerations
    fn answer(
        &self,
        option: &TemplateOption,
        default_value: serde_json::Value,
    ) -> Result<serde_json::Value>;
}

/// Terminal prompter backed by dialoguer.
#[derive(Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for DialoguerPrompter {
    fn confirm(&self, skip_prompt: bool, prompt: String) -> Result<bool> {
        if skip_prompt {
            return Ok(true);
        }
        Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(|e| Error::ConfigError(e.to_string()))
    }

    fn answer(
        &self,
        option: &TemplateOption,
        default_value: serde_json::Value,
    ) -> Result<serde_json::Value> {
        let prompt = option.prompt_text().to_string();
        match &option.kind {
            OptionKind::Text { .. } => {
                let default = default_value.as_str().unwrap_or_default().to_string();
                let input: String = Input::new()
                    .with_prompt(prompt)
                    .default(default)
                    .interact_text()
                    .map_err(|e| Error::ConfigError(e.to_string()))?;
                Ok(serde_json::Value::String(input))
            }
            OptionKind::Toggle { .. } => {
                let result = Confirm::new()
                    .with_prompt(prompt)
                    .default(default_value.as_bool().unwrap_or(false))
                    .interact()
                    .map_err(|e| Error::ConfigError(e.to_string()))?;
                Ok(serde_json::Value::Bool(result))
            }
            OptionKind::Choice { choices } => {
                let default = default_value
                    .as_str()
                    .and_then(|d| choices.iter().position(|choice| choice == d))
                    .unwrap_or(0);
                let selection = Select::new()
                    .with_prompt(prompt)
                    .default(default)
                    .items(choices)
                    .interact()
                    .map_err(|e| Error::ConfigError(e.to_string()))?;
                Ok(serde_json::Value::String(choices[selection].clone()))
            }
        }
    }
}

/// Prompter for non-interactive runs.
///
/// Every option takes its default. Confirmations are only granted when the
/// caller already opted in through `skip_prompt`.
#[derive(Default)]
pub struct DefaultsPrompter;

impl DefaultsPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for DefaultsPrompter {
    fn confirm(&self, skip_prompt: bool, _prompt: String) -> Result<bool> {
        Ok(skip_prompt)
    }

    fn answer(
        &self,
        _option: &TemplateOption,
        default_value: serde_json::Value,
    ) -> Result<serde_json::Value> {
        Ok(default_value)
    }
}
