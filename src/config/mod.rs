//! User preferences for the shell and the location of the data directory.

use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    errors::{Result, TrackerError},
    utils::{files, paths},
};

/// Stores user-configurable preferences. Missing fields fall back to defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Symbol printed in front of amounts. Display only; amounts carry no currency.
    pub currency_symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Overrides where the transaction slot lives. Defaults to the app data dir.
    pub data_dir: Option<PathBuf>,
    pub ui_color_enabled: bool,
    pub plain_output: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_symbol: "$".into(),
            data_dir: None,
            ui_color_enabled: true,
            plain_output: false,
        }
    }
}

impl Config {
    pub fn resolve_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(paths::app_data_dir)
    }
}

/// Loads and saves [`Config`] as JSON.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    /// Manager for `config.json` in the application data directory.
    pub fn new() -> Self {
        Self::with_base_dir(paths::app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Self {
        Self {
            path: paths::config_file_in(&base),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the stored configuration, or defaults when none was saved.
    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        serde_json::from_str(&data).map_err(|err| {
            TrackerError::Config(format!("{}: {}", self.path.display(), err))
        })
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        files::write_atomic(&self.path, &json)
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_fields_use_defaults() {
        let cfg: Config = serde_json::from_str(r#"{"currency_symbol":"€"}"#).unwrap();
        assert_eq!(cfg.currency_symbol, "€");
        assert!(cfg.ui_color_enabled);
    }

    #[test]
    fn serialized_config_carries_only_display_and_storage_settings() {
        let value = serde_json::to_value(Config::default()).unwrap();
        let mut keys: Vec<_> = value.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort();
        assert_eq!(keys, ["currency_symbol", "plain_output", "ui_color_enabled"]);

        let older: Config =
            serde_json::from_str(r#"{"locale":"en-GB","currency_symbol":"£"}"#).unwrap();
        assert_eq!(older.currency_symbol, "£");
    }

    #[test]
    fn explicit_data_dir_wins() {
        let cfg = Config {
            data_dir: Some(PathBuf::from("/tmp/ledger")),
            ..Config::default()
        };
        assert_eq!(cfg.resolve_data_dir(), PathBuf::from("/tmp/ledger"));
    }

    #[test]
    fn corrupt_config_is_a_config_error() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf());
        fs::write(manager.path(), "{oops").unwrap();
        assert!(matches!(manager.load(), Err(TrackerError::Config(_))));
    }
}
