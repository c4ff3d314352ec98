use crate::errors::{Error, Result};
use crate::extensions::enums::valid_csv;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter as EnumIterDerive, EnumString};

/// Day of week, numbered from Sunday = 0 to Saturday = 6.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumString, Display, AsRefStr, EnumIterDerive,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum DayOfWeek {
    #[strum(serialize = "sun", serialize = "sunday", serialize = "su", to_string = "SUN")]
    Sun,
    #[strum(serialize = "mon", serialize = "monday", serialize = "m", to_string = "MON")]
    Mon,
    #[strum(serialize = "tue", serialize = "tuesday", serialize = "tu", to_string = "TUE")]
    Tue,
    #[strum(serialize = "wed", serialize = "wednesday", serialize = "w", to_string = "WED")]
    Wed,
    #[strum(serialize = "thu", serialize = "thursday", serialize = "th", to_string = "THU")]
    Thu,
    #[strum(serialize = "fri", serialize = "friday", serialize = "f", to_string = "FRI")]
    Fri,
    #[strum(serialize = "sat", serialize = "saturday", serialize = "sa", to_string = "SAT")]
    Sat,
}

impl DayOfWeek {
    pub const COUNT: usize = 7;

    pub fn from_index(index: i64) -> Result<Self> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::iter().nth(i))
            .ok_or_else(|| {
                Error::validation(format!(
                    "Day of week {index} is out of range; expected 0 (Sunday) to 6 (Saturday)."
                ))
            })
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn try_from(s: &str) -> Result<Self> {
        if let Ok(n) = s.trim().parse::<i64>() {
            return Self::from_index(n);
        }
        Self::from_str(s.trim()).map_err(|_| {
            Error::parse(format!(
                "Invalid day of the week: '{}'. Valid days: {}",
                s.trim(),
                valid_csv::<DayOfWeek>()
            ))
        })
    }
}

impl Serialize for DayOfWeek {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.index() as u8)
    }
}

impl<'de> Deserialize<'de> for DayOfWeek {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let n = i64::deserialize(deserializer)?;
        DayOfWeek::from_index(n).map_err(serde::de::Error::custom)
    }
}

/// A CSS hex color, normalized to lowercase `#rrggbb`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CourseColor(String);

impl CourseColor {
    pub fn parse(raw: &str) -> Result<Self> {
        let hex = raw.trim().trim_start_matches('#');
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Self::invalid(raw));
        }
        let full = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).collect::<String>(),
            6 => hex.to_string(),
            _ => return Err(Self::invalid(raw)),
        };
        Ok(CourseColor(format!("#{}", full.to_ascii_lowercase())))
    }

    /// For literals already in `#rrggbb` lowercase form.
    pub(crate) fn from_normalized(hex: &str) -> Self {
        CourseColor(hex.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn rgb(&self) -> (u8, u8, u8) {
        let channel = |i: usize| u8::from_str_radix(&self.0[i..i + 2], 16).unwrap_or(0);
        (channel(1), channel(3), channel(5))
    }

    fn invalid(raw: &str) -> Error {
        Error::validation(format!(
            "Invalid color: '{}'. Expected a hex color such as '#3b82f6'.",
            raw.trim()
        ))
    }
}

impl fmt::Display for CourseColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for CourseColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CourseColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        CourseColor::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum EntityKind {
    Course,
    Schedule,
}

/// Direction for paging the displayed week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr, EnumIterDerive)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum WeekStep {
    #[strum(serialize = "prev", serialize = "back", serialize = "-1", to_string = "prev")]
    Back,
    #[strum(serialize = "next", serialize = "forward", serialize = "+1", to_string = "next")]
    Forward,
}

impl WeekStep {
    pub fn from_direction(direction: i32) -> Result<Self> {
        match direction {
            -1 => Ok(WeekStep::Back),
            1 => Ok(WeekStep::Forward),
            other => Err(Error::validation(format!(
                "Week direction must be -1 or +1, got {other}."
            ))),
        }
    }

    pub fn days(self) -> i64 {
        match self {
            WeekStep::Back => -7,
            WeekStep::Forward => 7,
        }
    }
}

// ==============
// Prompt commands
// ==============

/// Commands that change or redraw the displayed week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr, EnumIterDerive)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum ViewCommand {
    #[strum(serialize = "show", serialize = "ls", to_string = "show")]
    Show,
    #[strum(serialize = "next", serialize = "n", to_string = "next")]
    Next,
    #[strum(serialize = "prev", serialize = "p", to_string = "prev")]
    Prev,
    Today,
    Week,
}

impl ViewCommand {
    pub fn try_from(s: &str) -> Result<Self> {
        Self::from_str(s.trim()).map_err(|_| {
            Error::parse(format!(
                "Unsupported view command: '{}'. Valid view commands: {}",
                s.trim(),
                valid_csv::<ViewCommand>()
            ))
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr, EnumIterDerive)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum CourseCommand {
    Courses,
    Course,
    #[strum(serialize = "color", serialize = "colour", to_string = "color")]
    Color,
}

impl CourseCommand {
    pub fn try_from(s: &str) -> Result<Self> {
        Self::from_str(s.trim()).map_err(|_| {
            Error::parse(format!(
                "Unsupported course command: '{}'. Valid course commands: {}",
                s.trim(),
                valid_csv::<CourseCommand>()
            ))
        })
    }
}

/// Second word of `course <action> ...`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr, EnumIterDerive)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum CourseAction {
    #[strum(serialize = "add", serialize = "new", to_string = "add")]
    Add,
    #[strum(serialize = "del", serialize = "delete", serialize = "rm", to_string = "del")]
    Delete,
    Show,
}

impl CourseAction {
    pub fn try_from(s: &str) -> Result<Self> {
        Self::from_str(s.trim()).map_err(|_| {
            Error::parse(format!(
                "Unsupported course action: '{}'. Valid actions: {}",
                s.trim(),
                valid_csv::<CourseAction>()
            ))
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr, EnumIterDerive)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum ScheduleCommand {
    Sched,
    Unsched,
    Edit,
}

impl ScheduleCommand {
    pub fn try_from(s: &str) -> Result<Self> {
        Self::from_str(s.trim()).map_err(|_| {
            Error::parse(format!(
                "Unsupported schedule command: '{}'. Valid schedule commands: {}",
                s.trim(),
                valid_csv::<ScheduleCommand>()
            ))
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr, EnumIterDerive)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum GlobalCommand {
    Config,
    Set,
    #[strum(serialize = "help", serialize = "man", serialize = "?", to_string = "help")]
    Help,
}

impl GlobalCommand {
    pub fn try_from(s: &str) -> Result<Self> {
        Self::from_str(s.trim()).map_err(|_| {
            Error::parse(format!(
                "Unsupported global command: '{}'. Valid global commands: {}",
                s.trim(),
                valid_csv::<GlobalCommand>()
            ))
        })
    }
}
