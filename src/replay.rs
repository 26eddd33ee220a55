//! Recorded answers, so a project can be regenerated without prompts.

use crate::error::{Error, Result};
use log::debug;
use std::path::{Path, PathBuf};

/// Path of the replay file for a template.
pub fn replay_file<P: AsRef<Path>>(replay_dir: P, template_name: &str) -> PathBuf {
    replay_dir.as_ref().join(format!("{template_name}.json"))
}

/// Writes answers to `<replay_dir>/<template_name>.json`.
pub fn dump<P: AsRef<Path>>(
    replay_dir: P,
    template_name: &str,
    answers: &serde_json::Value,
) -> Result<PathBuf> {
    let replay_dir = replay_dir.as_ref();
    std::fs::create_dir_all(replay_dir)?;
    let path = replay_file(replay_dir, template_name);
    std::fs::write(&path, serde_json::to_string_pretty(answers)?)?;
    debug!("Recorded answers in {}", path.display());
    Ok(path)
}

/// Reads recorded answers.
///
/// # Errors
/// * `Error::ConfigError` if the file is missing or is not a JSON object
pub fn load<P: AsRef<Path>>(path: P) -> Result<serde_json::Value> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::ConfigError(format!(
            "Replay file '{}' does not exist",
            path.display()
        )));
    }
    let answers: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(path)?)?;
    if !answers.is_object() {
        return Err(Error::ConfigError(format!(
            "Replay file '{}' must contain a JSON object",
            path.display()
        )));
    }
    Ok(answers)
}
