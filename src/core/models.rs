use crate::core::time::{ClockTime, TimeSpan};
use crate::core::types::{CourseColor, DayOfWeek};
use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

pub trait BaseEntity {
    fn id(&self) -> i32;
    fn set_id(&mut self, id: i32);
}

// ======
// Course
// ======

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: i32,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<CourseColor>,
}

impl Course {
    pub fn new(title: impl Into<String>, color: Option<CourseColor>) -> Self {
        Self {
            id: 1,
            title: title.into(),
            color,
        }
    }
}

impl BaseEntity for Course {
    fn id(&self) -> i32 {
        self.id
    }
    fn set_id(&mut self, id: i32) {
        self.id = id;
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Course(id={}, title='{}', color={})",
            self.id,
            self.title,
            self.color.as_ref().map(|c| c.as_str()).unwrap_or("-")
        )
    }
}

// ========
// Schedule
// ========

/// Validated day and time fields of one weekly meeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSlot {
    pub day: DayOfWeek,
    pub span: TimeSpan,
}

impl ScheduleSlot {
    pub fn new(day: DayOfWeek, span: TimeSpan) -> Self {
        Self { day, span }
    }
}

/// Raw schedule row as submitted from a course edit form, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDraft {
    pub day_of_week: i64,
    pub start_time: String,
    pub end_time: String,
}

impl ScheduleDraft {
    pub fn new(day_of_week: i64, start_time: impl Into<String>, end_time: impl Into<String>) -> Self {
        Self {
            day_of_week,
            start_time: start_time.into(),
            end_time: end_time.into(),
        }
    }

    pub fn validate(&self) -> Result<ScheduleSlot> {
        let day = DayOfWeek::from_index(self.day_of_week)?;
        let span = TimeSpan::try_from_parts(&self.start_time, &self.end_time)?;
        Ok(ScheduleSlot::new(day, span))
    }

    /// Validate a whole batch; the first failure names its 1-based position.
    pub fn validate_all(drafts: &[ScheduleDraft]) -> Result<Vec<ScheduleSlot>> {
        drafts
            .iter()
            .enumerate()
            .map(|(i, d)| {
                d.validate().map_err(|err| match err {
                    Error::Validation(msg) => Error::validation(format!("Schedule #{}: {msg}", i + 1)),
                    other => other,
                })
            })
            .collect()
    }
}

/// Persisted schedule row. The course title is joined in on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRow {
    pub id: i32,
    pub course_id: i32,
    pub slot: ScheduleSlot,
}

impl ScheduleRow {
    pub fn new(course_id: i32, slot: ScheduleSlot) -> Self {
        Self {
            id: 1,
            course_id,
            slot,
        }
    }
}

impl BaseEntity for ScheduleRow {
    fn id(&self) -> i32 {
        self.id
    }
    fn set_id(&mut self, id: i32) {
        self.id = id;
    }
}

/// One recurring weekly meeting, in the JSON shape handed to hosts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawEntry")]
pub struct ScheduleEntry {
    pub id: i32,
    pub course_id: i32,
    pub day_of_week: DayOfWeek,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    #[serde(default)]
    pub course_title: String,
}

/// Wire shape of a [`ScheduleEntry`] before its times are checked.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEntry {
    id: i32,
    course_id: i32,
    day_of_week: DayOfWeek,
    start_time: ClockTime,
    end_time: ClockTime,
    #[serde(default)]
    course_title: String,
}

impl TryFrom<RawEntry> for ScheduleEntry {
    type Error = Error;

    fn try_from(raw: RawEntry) -> Result<Self> {
        let span = TimeSpan::new(raw.start_time, raw.end_time)?;
        Ok(Self {
            id: raw.id,
            course_id: raw.course_id,
            day_of_week: raw.day_of_week,
            start_time: span.start,
            end_time: span.end,
            course_title: raw.course_title,
        })
    }
}

impl ScheduleEntry {
    pub fn from_row(row: &ScheduleRow, course_title: impl Into<String>) -> Self {
        Self {
            id: row.id,
            course_id: row.course_id,
            day_of_week: row.slot.day,
            start_time: row.slot.span.start,
            end_time: row.slot.span.end,
            course_title: course_title.into(),
        }
    }

    pub fn span(&self) -> TimeSpan {
        TimeSpan {
            start: self.start_time,
            end: self.end_time,
        }
    }

    pub fn start_minutes(&self) -> u32 {
        self.start_time.minutes()
    }

    pub fn end_minutes(&self) -> u32 {
        self.end_time.minutes()
    }

    pub fn overlaps(&self, other: &ScheduleEntry) -> bool {
        self.span().overlaps(&other.span())
    }
}

impl fmt::Display for ScheduleEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Schedule(id={}, course='{}', day={}, time={})",
            self.id,
            self.course_title,
            self.day_of_week,
            self.span().display_label()
        )
    }
}
