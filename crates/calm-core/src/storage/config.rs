//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Session log location
//! - Countdown redraw cadence
//! - Bell behaviour
//! - Box-breathing defaults
//!
//! Configuration is stored at `~/.config/calm/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::{data_dir, LOG_FILE_NAME};
use crate::error::ConfigError;

/// Bell configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BellConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Print a `***` separator instead of the terminal bell.
    #[serde(default)]
    pub visual_fallback: bool,
}

/// Defaults offered at the box-breathing prompts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoxBreathingConfig {
    #[serde(default = "default_count")]
    pub cycles: u32,
    #[serde(default = "default_count")]
    pub inhale: u32,
    #[serde(default = "default_count")]
    pub hold: u32,
    #[serde(default = "default_count")]
    pub exhale: u32,
    /// Pause between the start bell and the first inhale.
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/calm/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Session log location. Defaults to `meditation_log.csv` in the data dir.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    #[serde(default = "default_true")]
    pub clear_screen: bool,
    #[serde(default)]
    pub bell: BellConfig,
    #[serde(default)]
    pub box_breathing: BoxBreathingConfig,
}

// Default functions
fn default_true() -> bool {
    true
}
fn default_count() -> u32 {
    4
}
fn default_settle_ms() -> u64 {
    1200
}
fn default_tick_interval_ms() -> u64 {
    500
}

impl Default for BellConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            visual_fallback: false,
        }
    }
}

impl Default for BoxBreathingConfig {
    fn default() -> Self {
        Self {
            cycles: default_count(),
            inhale: default_count(),
            hold: default_count(),
            exhale: default_count(),
            settle_ms: default_settle_ms(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_file: None,
            tick_interval_ms: default_tick_interval_ms(),
            clear_screen: true,
            bell: BellConfig::default(),
            box_breathing: BoxBreathingConfig::default(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() || key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let new_value = match obj.get(part) {
                    Some(serde_json::Value::Bool(_)) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                    ),
                    Some(serde_json::Value::Number(_)) => value
                        .parse::<u64>()
                        .map(|n| serde_json::Value::Number(n.into()))
                        .map_err(|_| invalid(format!("cannot parse '{value}' as a whole number")))?,
                    Some(serde_json::Value::Object(_)) | Some(serde_json::Value::Array(_)) => {
                        return Err(invalid("cannot overwrite a table".to_string()));
                    }
                    Some(_) => serde_json::Value::String(value.into()),
                    // Optional keys are omitted while unset.
                    None if part == "log_file" => serde_json::Value::String(value.into()),
                    None => return Err(unknown()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or create the default file.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key. The change is in memory until saved.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed
    /// or is out of range.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config =
            serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let positive = |key: &str, value: u64| {
            if value == 0 {
                Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: "must be greater than zero".to_string(),
                })
            } else {
                Ok(())
            }
        };
        positive("tick_interval_ms", self.tick_interval_ms)?;
        positive("box_breathing.cycles", self.box_breathing.cycles.into())?;
        positive("box_breathing.inhale", self.box_breathing.inhale.into())?;
        positive("box_breathing.hold", self.box_breathing.hold.into())?;
        positive("box_breathing.exhale", self.box_breathing.exhale.into())
    }

    /// Where completed sessions are appended.
    pub fn log_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.log_file {
            Some(path) => Ok(path.clone()),
            None => Ok(data_dir()?.join(LOG_FILE_NAME)),
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.box_breathing.settle_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert!(parsed.bell.enabled);
        assert_eq!(parsed.tick_interval_ms, 500);
        assert!(parsed.log_file.is_none());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let parsed: Config = toml::from_str("tick_interval_ms = 250\n[box_breathing]\ncycles = 6\n").unwrap();
        assert_eq!(parsed.tick_interval(), Duration::from_millis(250));
        assert_eq!(parsed.box_breathing.cycles, 6);
        assert_eq!(parsed.box_breathing.inhale, 4);
        assert_eq!(parsed.settle(), Duration::from_millis(1200));
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("bell.enabled").as_deref(), Some("true"));
        assert_eq!(cfg.get("box_breathing.hold").as_deref(), Some("4"));
        assert!(cfg.get("bell.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_updates_nested_values() {
        let mut cfg = Config::default();
        cfg.set("bell.visual_fallback", "true").unwrap();
        cfg.set("box_breathing.exhale", "6").unwrap();
        assert!(cfg.bell.visual_fallback);
        assert_eq!(cfg.box_breathing.exhale, 6);
    }

    #[test]
    fn set_log_file_while_unset() {
        let mut cfg = Config::default();
        cfg.set("log_file", "/tmp/sessions.csv").unwrap();
        assert_eq!(cfg.log_path().unwrap(), PathBuf::from("/tmp/sessions.csv"));
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("bell.volume", "3"),
            Err(ConfigError::UnknownKey(_))
        ));
    }

    #[test]
    fn set_rejects_invalid_type() {
        let mut cfg = Config::default();
        assert!(cfg.set("bell.enabled", "not_a_bool").is_err());
        assert!(cfg.set("tick_interval_ms", "fast").is_err());
        assert!(cfg.set("bell", "true").is_err());
    }

    #[test]
    fn set_rejects_zero_and_leaves_config_untouched() {
        let mut cfg = Config::default();
        assert!(cfg.set("box_breathing.cycles", "0").is_err());
        assert_eq!(cfg.box_breathing.cycles, 4);
    }

    #[test]
    fn load_from_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(cfg.tick_interval_ms, 500);
    }

    #[test]
    fn save_then_load_preserves_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.set("clear_screen", "false").unwrap();
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert!(!loaded.clear_screen);
    }

    #[test]
    fn load_from_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "tick_interval_ms = \"soon\"").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::LoadFailed { .. })
        ));
    }
}
