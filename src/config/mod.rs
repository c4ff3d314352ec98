pub mod models;
#[cfg(test)]
mod tests;

use std::fs;
use std::ops::Index;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter as EnumIterDerive, EnumString};

use crate::config::models::{
    ColumnGapConfigItem, ConfigItem, FileLoggingConfigItem, HourHeightConfigItem,
    MaxColumnsConfigItem, StackNudgeConfigItem,
};
use crate::errors::{Error, Result};
use crate::extensions::enums::valid_csv;

pub const DEFAULT_CONFIG_PATH: &str = "config.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIterDerive, EnumString, Display, AsRefStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum ConfigKey {
    HourHeightPx,
    MaxColumns,
    ColumnGapPercent,
    StackNudgePx,
    FileLoggingEnabled,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub hour_height_px: HourHeightConfigItem,
    #[serde(default)]
    pub max_columns: MaxColumnsConfigItem,
    #[serde(default)]
    pub column_gap_percent: ColumnGapConfigItem,
    #[serde(default)]
    pub stack_nudge_px: StackNudgeConfigItem,
    #[serde(default)]
    pub file_logging_enabled: FileLoggingConfigItem,
}

impl ConfigFile {
    fn check(&self) -> Result<()> {
        self.hour_height_px.check()?;
        self.max_columns.check()?;
        self.column_gap_percent.check()?;
        self.stack_nudge_px.check()?;
        self.file_logging_enabled.check()
    }

    fn value_of(&self, key: ConfigKey) -> String {
        match key {
            ConfigKey::HourHeightPx => self.hour_height_px.get_value().to_string(),
            ConfigKey::MaxColumns => self.max_columns.get_value().to_string(),
            ConfigKey::ColumnGapPercent => self.column_gap_percent.get_value().to_string(),
            ConfigKey::StackNudgePx => self.stack_nudge_px.get_value().to_string(),
            ConfigKey::FileLoggingEnabled => self.file_logging_enabled.get_value().to_string(),
        }
    }

    fn description_of(&self, key: ConfigKey) -> &str {
        match key {
            ConfigKey::HourHeightPx => self.hour_height_px.description(),
            ConfigKey::MaxColumns => self.max_columns.description(),
            ConfigKey::ColumnGapPercent => self.column_gap_percent.description(),
            ConfigKey::StackNudgePx => self.stack_nudge_px.description(),
            ConfigKey::FileLoggingEnabled => self.file_logging_enabled.description(),
        }
    }

    fn set_value_of(&mut self, key: ConfigKey, raw: &str) -> Result<()> {
        match key {
            ConfigKey::HourHeightPx => self.hour_height_px.set_value(raw),
            ConfigKey::MaxColumns => self.max_columns.set_value(raw),
            ConfigKey::ColumnGapPercent => self.column_gap_percent.set_value(raw),
            ConfigKey::StackNudgePx => self.stack_nudge_px.set_value(raw),
            ConfigKey::FileLoggingEnabled => self.file_logging_enabled.set_value(raw),
        }
    }
}

/// A settings change: key, old value, new value.
pub type ConfigChange = (String, String, String);

#[derive(Debug, Clone)]
pub struct Config {
    path: PathBuf,
    data: ConfigFile,
    pub last_change: Option<ConfigChange>,
}

#[derive(Debug, Clone)]
pub struct ConfigRows(Vec<(String, String, String)>);

impl ConfigRows {
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = &(String, String, String)> {
        self.0.iter()
    }
    pub fn get(&self, index: usize) -> Option<&(String, String, String)> {
        self.0.get(index)
    }
}

impl Index<usize> for ConfigRows {
    type Output = (String, String, String);
    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl Config {
    /// Built-in defaults bound to `path`; nothing is written until a value changes.
    pub fn defaults_at<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            data: ConfigFile::default(),
            last_change: None,
        }
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Err(Error::config(format!(
                "Configuration file '{}' not found.",
                path.display()
            )));
        }
        let text = fs::read_to_string(&path)
            .map_err(|e| Error::config(format!("Failed to read {}: {}", path.display(), e)))?;
        let data: ConfigFile = serde_json::from_str(&text)
            .map_err(|e| Error::config(format!("Invalid JSON in '{}': {}", path.display(), e)))?;
        data.check()?;
        Ok(Self {
            path,
            data,
            last_change: None,
        })
    }

    /// Loads `path`, writing the defaults there first when it does not exist yet.
    pub fn load_or_init<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            return Self::load_from(path);
        }
        let config = Self::defaults_at(path);
        config.save()?;
        Ok(config)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn view(&self) -> &ConfigFile {
        &self.data
    }

    pub fn hour_height_px(&self) -> f64 {
        *self.data.hour_height_px.get_value()
    }
    pub fn max_columns(&self) -> usize {
        *self.data.max_columns.get_value()
    }
    pub fn column_gap_percent(&self) -> f64 {
        *self.data.column_gap_percent.get_value()
    }
    pub fn stack_nudge_px(&self) -> f64 {
        *self.data.stack_nudge_px.get_value()
    }
    pub fn file_logging_enabled(&self) -> bool {
        self.data.file_logging_enabled.get_value().0
    }

    pub fn rows(&self) -> ConfigRows {
        ConfigRows(
            ConfigKey::iter()
                .map(|key| {
                    (
                        key.to_string(),
                        self.data.description_of(key).to_string(),
                        self.data.value_of(key),
                    )
                })
                .collect(),
        )
    }

    pub fn set_by_index(&mut self, index: usize, new_value: &str) -> Result<()> {
        let key = ConfigKey::iter()
            .nth(index)
            .ok_or_else(|| Error::config(format!("Invalid ID: {index}")))?;
        self.set_key(key, new_value)
    }

    /// Validates, applies, and persists one value. A rejected value leaves both the in-memory
    /// and on-disk settings untouched.
    pub fn set_key(&mut self, key: ConfigKey, new_value: &str) -> Result<()> {
        let old = self.data.value_of(key);
        let mut next = self.data.clone();
        next.set_value_of(key, new_value)?;
        Self::write(&self.path, &next)?;
        self.data = next;
        self.last_change = Some((key.to_string(), old, self.data.value_of(key)));
        Ok(())
    }

    pub fn take_last_change(&mut self) -> Option<ConfigChange> {
        self.last_change.take()
    }

    pub fn set(&mut self, key_str: &str, new_value: &str) -> Result<()> {
        let key = ConfigKey::from_str(key_str.trim()).map_err(|_| {
            Error::config(format!(
                "Unknown configuration key '{}'. Valid keys: {}",
                key_str.trim(),
                valid_csv::<ConfigKey>()
            ))
        })?;
        self.set_key(key, new_value)
    }

    fn save(&self) -> Result<()> {
        Self::write(&self.path, &self.data)
    }

    fn write(path: &Path, data: &ConfigFile) -> Result<()> {
        let json = serde_json::to_string_pretty(data)
            .map_err(|e| Error::config(format!("Failed to encode config: {}", e)))?;
        fs::write(path, json)
            .map_err(|e| Error::config(format!("Failed to write {}: {}", path.display(), e)))
    }
}
