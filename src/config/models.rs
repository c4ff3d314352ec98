use crate::errors::{Error, Result};
use crate::extensions::enums::valid_csv;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use strum_macros::{AsRefStr, Display, EnumIter as EnumIterDerive, EnumString};

pub trait ConfigItem<T> {
    fn get_value(&self) -> &T;
    fn set_value(&mut self, new_value: &str) -> Result<()>;
    fn description(&self) -> &str;
    /// Re-check a value that arrived through deserialization.
    fn check(&self) -> Result<()>;
}

fn parse_number<T: FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| Error::config(format!("Invalid number for {key}: '{}'.", raw.trim())))
}

fn within(key: &str, value: f64, min: f64, max: f64, max_inclusive: bool) -> Result<()> {
    let upper_ok = if max_inclusive { value <= max } else { value < max };
    if value.is_finite() && value >= min && upper_ok {
        Ok(())
    } else {
        let close = if max_inclusive { ']' } else { ')' };
        Err(Error::config(format!(
            "{key} must be in [{min}, {max}{close}, got {value}."
        )))
    }
}

// ============
// Hour height
// ============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourHeightConfigItem {
    pub value: f64,
    pub description: String,
}

impl Default for HourHeightConfigItem {
    fn default() -> Self {
        Self {
            value: 60.0,
            description: "Pixel height of one hour row in the day grid.".into(),
        }
    }
}

impl HourHeightConfigItem {
    fn validate(value: f64) -> Result<()> {
        if value.is_finite() && value > 0.0 && value <= 600.0 {
            Ok(())
        } else {
            Err(Error::config(format!(
                "HOUR_HEIGHT_PX must be greater than 0 and at most 600, got {value}."
            )))
        }
    }
}

impl ConfigItem<f64> for HourHeightConfigItem {
    fn get_value(&self) -> &f64 {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<()> {
        let v = parse_number::<f64>("HOUR_HEIGHT_PX", new_value)?;
        Self::validate(v)?;
        self.value = v;
        Ok(())
    }
    fn description(&self) -> &str {
        &self.description
    }
    fn check(&self) -> Result<()> {
        Self::validate(self.value)
    }
}

// ===========
// Max columns
// ===========

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaxColumnsConfigItem {
    pub value: usize,
    pub description: String,
}

impl Default for MaxColumnsConfigItem {
    fn default() -> Self {
        Self {
            value: 3,
            description: "Most side-by-side columns for overlapping meetings.".into(),
        }
    }
}

impl MaxColumnsConfigItem {
    fn validate(value: usize) -> Result<()> {
        if (1..=12).contains(&value) {
            Ok(())
        } else {
            Err(Error::config(format!(
                "MAX_COLUMNS must be between 1 and 12, got {value}."
            )))
        }
    }
}

impl ConfigItem<usize> for MaxColumnsConfigItem {
    fn get_value(&self) -> &usize {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<()> {
        let v = parse_number::<usize>("MAX_COLUMNS", new_value)?;
        Self::validate(v)?;
        self.value = v;
        Ok(())
    }
    fn description(&self) -> &str {
        &self.description
    }
    fn check(&self) -> Result<()> {
        Self::validate(self.value)
    }
}

// ==========
// Column gap
// ==========

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnGapConfigItem {
    pub value: f64,
    pub description: String,
}

impl Default for ColumnGapConfigItem {
    fn default() -> Self {
        Self {
            value: 0.5,
            description: "Percent of the day width left as a seam between columns.".into(),
        }
    }
}

impl ConfigItem<f64> for ColumnGapConfigItem {
    fn get_value(&self) -> &f64 {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<()> {
        let v = parse_number::<f64>("COLUMN_GAP_PERCENT", new_value)?;
        within("COLUMN_GAP_PERCENT", v, 0.0, 10.0, false)?;
        self.value = v;
        Ok(())
    }
    fn description(&self) -> &str {
        &self.description
    }
    fn check(&self) -> Result<()> {
        within("COLUMN_GAP_PERCENT", self.value, 0.0, 10.0, false)
    }
}

// ============
// Stack nudge
// ============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackNudgeConfigItem {
    pub value: f64,
    pub description: String,
}

impl Default for StackNudgeConfigItem {
    fn default() -> Self {
        Self {
            value: 4.0,
            description: "Pixels each stacked meeting is pushed down past the column cap.".into(),
        }
    }
}

impl ConfigItem<f64> for StackNudgeConfigItem {
    fn get_value(&self) -> &f64 {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<()> {
        let v = parse_number::<f64>("STACK_NUDGE_PX", new_value)?;
        within("STACK_NUDGE_PX", v, 0.0, 60.0, true)?;
        self.value = v;
        Ok(())
    }
    fn description(&self) -> &str {
        &self.description
    }
    fn check(&self) -> Result<()> {
        within("STACK_NUDGE_PX", self.value, 0.0, 60.0, true)
    }
}

// ============
// File logging
// ============

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr, EnumIterDerive)]
#[strum(ascii_case_insensitive)]
pub enum BoolFormat {
    #[strum(serialize = "true", serialize = "yes", serialize = "on", to_string = "True")]
    TextTrue,
    #[strum(serialize = "false", serialize = "no", serialize = "off", to_string = "False")]
    TextFalse,
}

/// Boolean stored as `"True"` / `"False"` in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bool(pub bool);

impl Bool {
    pub fn try_from_str(s: &str) -> Result<Self> {
        BoolFormat::from_str(s.trim())
            .map(|f| Bool(matches!(f, BoolFormat::TextTrue)))
            .map_err(|_| {
                Error::config(format!(
                    "Invalid string value for boolean: '{}'. Valid values: {}",
                    s.trim(),
                    valid_csv::<BoolFormat>()
                ))
            })
    }
}

impl fmt::Display for Bool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", if self.0 { "True" } else { "False" })
    }
}

impl Serialize for Bool {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Bool {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Bool, D::Error> {
        let s = String::deserialize(deserializer)?;
        Bool::try_from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileLoggingConfigItem {
    pub value: Bool,
    pub description: String,
}

impl Default for FileLoggingConfigItem {
    fn default() -> Self {
        Self {
            value: Bool(true),
            description: "Enable writing log messages to file.".into(),
        }
    }
}

impl ConfigItem<Bool> for FileLoggingConfigItem {
    fn get_value(&self) -> &Bool {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<()> {
        self.value = Bool::try_from_str(new_value)?;
        Ok(())
    }
    fn description(&self) -> &str {
        &self.description
    }
    fn check(&self) -> Result<()> {
        Ok(())
    }
}
