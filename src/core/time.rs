use crate::errors::{Error, Result};
use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, EnumIter as EnumIterDerive};

pub const MINUTES_PER_HOUR: u32 = 60;

/// Formats accepted for stored wall-clock times. `HH:MM:SS` is what SQL `TIME` columns hand back.
#[derive(Copy, Clone, Debug, EnumIterDerive, AsRefStr)]
enum StoredTimeFormat {
    #[strum(serialize = "%H:%M", to_string = "%H:%M")]
    HourMinute,
    #[strum(serialize = "%H:%M:%S", to_string = "%H:%M:%S")]
    HourMinuteSecond,
}

#[derive(Copy, Clone, Debug, EnumIterDerive, AsRefStr)]
enum DisplayTimeFormat {
    #[strum(serialize = "%I:%M %p", to_string = "%I:%M %p")]
    Spaced,
    #[strum(serialize = "%I:%M%p", to_string = "%I:%M%p")]
    Compact,
}

/// A time of day at minute granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    pub fn from_hm(hour: u32, minute: u32) -> Result<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(ClockTime)
            .ok_or_else(|| Error::validation(format!("Invalid time {hour:02}:{minute:02}.")))
    }

    /// Parse `HH:MM` (24-hour). `HH:MM:SS` is accepted and truncated to the minute.
    pub fn parse(raw: &str) -> Result<Self> {
        let input = raw.trim();
        if !Self::has_stored_shape(input) {
            return Err(Error::validation(Self::error_message(raw)));
        }
        for fmt in StoredTimeFormat::iter() {
            if let Ok(t) = NaiveTime::parse_from_str(input, fmt.as_ref()) {
                return Self::from_hm(t.hour(), t.minute());
            }
        }
        Err(Error::validation(Self::error_message(raw)))
    }

    /// Inverse of [`ClockTime::format_display`].
    pub fn parse_display(raw: &str) -> Result<Self> {
        let input = raw.trim().to_ascii_uppercase();
        for fmt in DisplayTimeFormat::iter() {
            if let Ok(t) = NaiveTime::parse_from_str(&input, fmt.as_ref()) {
                return Self::from_hm(t.hour(), t.minute());
            }
        }
        Err(Error::validation(format!(
            "Invalid display time: '{}'. Expected 'h:mm AM' or 'h:mm PM'.",
            raw.trim()
        )))
    }

    pub fn minutes(&self) -> u32 {
        self.0.hour() * MINUTES_PER_HOUR + self.0.minute()
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// 12-hour label, e.g. `12:00 AM`, `9:05 AM`, `12:30 PM`.
    pub fn format_display(&self) -> String {
        self.0.format("%-I:%M %p").to_string()
    }

    // 1-2 digit hour, then one or two 2-digit groups; chrono checks the ranges.
    fn has_stored_shape(s: &str) -> bool {
        let parts: Vec<&str> = s.split(':').collect();
        if !(2..=3).contains(&parts.len()) {
            return false;
        }
        let all_digits = parts
            .iter()
            .all(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()));
        all_digits && parts[0].len() <= 2 && parts[1..].iter().all(|p| p.len() == 2)
    }

    fn error_message(input: &str) -> String {
        format!(
            "Invalid time format: '{}'. Expected 24-hour 'HH:MM'.",
            input.trim()
        )
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        ClockTime::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// `toMinutes`: minutes since midnight for an `HH:MM` string.
pub fn to_minutes(time: &str) -> Result<u32> {
    ClockTime::parse(time).map(|t| t.minutes())
}

/// `formatDisplay`: `HH:MM` to `h:mm AM/PM`.
pub fn format_display(time: &str) -> Result<String> {
    ClockTime::parse(time).map(|t| t.format_display())
}

/// A validated `[start, end)` interval within one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSpan")]
pub struct TimeSpan {
    pub start: ClockTime,
    pub end: ClockTime,
}

/// Wire shape of a [`TimeSpan`] before the ordering check.
#[derive(Deserialize)]
struct RawSpan {
    start: ClockTime,
    end: ClockTime,
}

impl TryFrom<RawSpan> for TimeSpan {
    type Error = Error;

    fn try_from(raw: RawSpan) -> Result<Self> {
        TimeSpan::new(raw.start, raw.end)
    }
}

impl TimeSpan {
    pub fn new(start: ClockTime, end: ClockTime) -> Result<Self> {
        if start == end {
            return Err(Error::validation(format!(
                "Start time '{start}' cannot be the same as end time '{end}'."
            )));
        }
        if start > end {
            return Err(Error::validation(format!(
                "Start time '{start}' must be earlier than end time '{end}'."
            )));
        }
        Ok(Self { start, end })
    }

    pub fn try_from_parts(start: &str, end: &str) -> Result<Self> {
        Self::new(ClockTime::parse(start)?, ClockTime::parse(end)?)
    }

    /// Parse `HH:MM-HH:MM`.
    pub fn try_from_str(s: &str) -> Result<Self> {
        let (start, end) = s.trim().split_once('-').ok_or_else(|| {
            Error::validation(format!(
                "Invalid time range: '{}'. Expected 'HH:MM-HH:MM'.",
                s.trim()
            ))
        })?;
        Self::try_from_parts(start, end)
    }

    pub fn start_minutes(&self) -> u32 {
        self.start.minutes()
    }

    pub fn end_minutes(&self) -> u32 {
        self.end.minutes()
    }

    pub fn duration_minutes(&self) -> u32 {
        self.end_minutes() - self.start_minutes()
    }

    /// Half-open overlap: touching intervals do not overlap.
    pub fn overlaps(&self, other: &TimeSpan) -> bool {
        self.start < other.end && self.end > other.start
    }

    pub fn display_label(&self) -> String {
        format!(
            "{} - {}",
            self.start.format_display(),
            self.end.format_display()
        )
    }
}

impl fmt::Display for TimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
