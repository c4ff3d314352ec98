mod table_printer_tests;

use crate::core::models::ScheduleEntry;
use crate::core::time::TimeSpan;
use crate::core::types::DayOfWeek;
use crate::layout::colors::ColorAssigner;
use crate::layout::week::WeekWindow;
use crate::layout::{LayoutEngine, WeekLayout};
use chrono::NaiveDate;
use std::collections::HashMap;

pub(super) fn entry(id: i32, course_id: i32, title: &str, day: DayOfWeek, span: &str) -> ScheduleEntry {
    let span = TimeSpan::try_from_str(span).unwrap();
    ScheduleEntry {
        id,
        course_id,
        day_of_week: day,
        start_time: span.start,
        end_time: span.end,
        course_title: title.to_string(),
    }
}

/// Week of Oct 18 2026 with today on Wednesday.
pub(super) fn sample_layout(entries: &[ScheduleEntry]) -> WeekLayout {
    let today = NaiveDate::from_ymd_opt(2026, 10, 21).unwrap();
    let colors = ColorAssigner::default().assign(entries, &HashMap::new());
    LayoutEngine::new().layout_week(WeekWindow::containing(today), entries, colors, today)
}
