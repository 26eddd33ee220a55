//! User-level configuration overriding template defaults.

use crate::constants::{DEFAULT_REPLAY_DIR, USER_CONFIG_ENV};
use crate::error::{Error, Result};
use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Contents of a user config file.
///
/// ```yaml
/// default_context:
///   author_name: "Jane Doe"
/// replay_dir: "/home/jane/.pybake_replay"
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    pub default_context: IndexMap<String, serde_json::Value>,
    pub replay_dir: Option<PathBuf>,
}

impl UserConfig {
    /// Replay directory from the config, else `~/.pybake_replay`.
    /// `None` when no home directory is known.
    pub fn replay_dir(&self) -> Option<PathBuf> {
        self.replay_dir
            .clone()
            .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(DEFAULT_REPLAY_DIR)))
    }
}

/// Reads a user config file.
///
/// # Errors
/// * `Error::ConfigError` if the file does not exist
/// * `Error::YAMLParseError` if it is not valid YAML of the expected shape
pub fn read_user_config<P: AsRef<Path>>(path: P) -> Result<UserConfig> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::ConfigError(format!(
            "User config file '{}' does not exist",
            path.display()
        )));
    }
    debug!("Loading user config from {}", path.display());
    let content = std::fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(UserConfig::default());
    }
    Ok(serde_yaml::from_str(&content)?)
}

/// Resolves the user config from an explicit path or `PYBAKE_CONFIG`.
pub fn get_user_config(explicit: Option<&Path>) -> Result<UserConfig> {
    match explicit {
        Some(path) => read_user_config(path),
        None => match std::env::var_os(USER_CONFIG_ENV) {
            Some(path) => read_user_config(PathBuf::from(path)),
            None => Ok(UserConfig::default()),
        },
    }
}
