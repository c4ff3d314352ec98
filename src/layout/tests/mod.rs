mod packer_tests;

use crate::core::models::ScheduleEntry;
use crate::core::time::TimeSpan;
use crate::core::types::DayOfWeek;
use chrono::NaiveDate;

/// Builds an entry from `HH:MM-HH:MM`.
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

pub(super) fn monday(id: i32, span: &str) -> ScheduleEntry {
    entry(id, id, &format!("Course {id}"), DayOfWeek::Mon, span)
}

/// Wednesday, Oct 21 2026.
pub(super) fn sample_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 21).unwrap()
}

/// Every ordering of `items`, for permutation checks on small inputs.
pub(super) fn permutations<T: Clone>(items: &[T]) -> Vec<Vec<T>> {
    if items.len() <= 1 {
        return vec![items.to_vec()];
    }
    let mut out = Vec::new();
    for i in 0..items.len() {
        let mut rest = items.to_vec();
        let head = rest.remove(i);
        for mut tail in permutations(&rest) {
            tail.insert(0, head.clone());
            out.push(tail);
        }
    }
    out
}
