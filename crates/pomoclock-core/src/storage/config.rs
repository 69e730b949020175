//! TOML-based application configuration.
//!
//! Stores:
//! - Clock speed multiplier and wall-clock tick period
//! - Button debounce and renderer refresh for the panel
//! - An optional custom interval sequence
//!
//! Configuration is stored at `~/.config/pomoclock/config.toml`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::{ConfigError, CoreError};
use crate::timer::{IntervalFactory, SequenceTemplate, Speed};

/// Clock driver configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockConfig {
    /// Logical seconds advanced per wall-clock tick.
    #[serde(default = "default_speed")]
    pub speed: u32,
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    /// Start the first interval as soon as the clock runs.
    #[serde(default)]
    pub autostart: bool,
}

/// Presentation boundary configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelConfig {
    /// A press is accepted only if strictly more than this has passed since
    /// the last accepted press.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default = "default_refresh_ms")]
    pub refresh_ms: u64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/pomoclock/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub clock: ClockConfig,
    #[serde(default)]
    pub panel: PanelConfig,
    /// Custom sequence override. The reference sequence is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence: Option<SequenceTemplate>,
}

// Default functions
fn default_speed() -> u32 {
    1
}
fn default_tick_ms() -> u64 {
    1000
}
fn default_debounce_ms() -> u64 {
    2000
}
fn default_refresh_ms() -> u64 {
    500
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            speed: default_speed(),
            tick_ms: default_tick_ms(),
            autostart: false,
        }
    }
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            refresh_ms: default_refresh_ms(),
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
        if parts.peek().map_or(true, |p| p.is_empty()) {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => serde_json::Value::Number(
                        value
                            .parse::<u64>()
                            .map_err(|e| invalid(format!("cannot parse '{value}' as number: {e}")))?
                            .into(),
                    ),
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    pub fn path() -> Result<PathBuf, CoreError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk, writing defaults on first run.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or
    /// parsed, or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, CoreError> {
        let path = Self::path()?;
        if !path.exists() {
            let cfg = Self::default();
            cfg.save_to(&path)?;
            return Ok(cfg);
        }
        Ok(Self::load_from(&path)?)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let cfg: Config = toml::from_str(&content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<(), CoreError> {
        self.save_to(&Self::path()?)?;
        Ok(())
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

    /// Set a config value by key. The value is coerced to the type of the
    /// existing value and the result must still validate.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value is invalid. On
    /// error the config is unchanged.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Check every value the engine will reject later.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Speed::new(self.clock.speed).map_err(|e| ConfigError::InvalidValue {
            key: "clock.speed".into(),
            message: e.to_string(),
        })?;
        for (key, value) in [
            ("clock.tick_ms", self.clock.tick_ms),
            ("panel.refresh_ms", self.panel.refresh_ms),
        ] {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    key: key.into(),
                    message: "must be greater than 0".into(),
                });
            }
        }
        if let Some(ref sequence) = self.sequence {
            if sequence.is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: "sequence".into(),
                    message: "sequence must contain at least one interval".into(),
                });
            }
            let mut factory = IntervalFactory::new();
            for (i, entry) in sequence.entries.iter().enumerate() {
                factory
                    .from_template(entry)
                    .map_err(|e| ConfigError::InvalidValue {
                        key: format!("sequence[{i}]"),
                        message: e.to_string(),
                    })?;
            }
        }
        Ok(())
    }

    pub fn speed(&self) -> Result<Speed, ConfigError> {
        Speed::new(self.clock.speed).map_err(|e| ConfigError::InvalidValue {
            key: "clock.speed".into(),
            message: e.to_string(),
        })
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.clock.tick_ms)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.panel.debounce_ms)
    }

    pub fn refresh_period(&self) -> Duration {
        Duration::from_millis(self.panel.refresh_ms)
    }

    /// Custom sequence if configured, otherwise the reference sequence.
    pub fn template(&self) -> SequenceTemplate {
        self.sequence.clone().unwrap_or_default()
    }
}
