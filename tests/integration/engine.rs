use chrono::NaiveDate;
use weekgrid::core::models::ScheduleDraft;
use weekgrid::core::store::MemoryStore;
use weekgrid::core::types::{DayOfWeek, WeekStep};
use weekgrid::errors::Error;

use crate::common::{build_context, make_temp_dir};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn monday_overlap_pairs_share_the_width_and_loner_gets_it_all() {
    let dir = make_temp_dir("engine");
    let mut ctx = build_context(&dir, MemoryStore::new());
    let algebra = ctx.create_course("Algebra", None).unwrap();
    let biology = ctx.create_course("Biology", None).unwrap();
    ctx.save_course_schedules(
        algebra.id,
        &[
            ScheduleDraft::new(1, "09:00", "10:00"),
            ScheduleDraft::new(1, "11:00", "12:00"),
        ],
    )
    .unwrap();
    ctx.save_course_schedules(biology.id, &[ScheduleDraft::new(1, "09:30", "10:30")])
        .unwrap();

    let layout = ctx.week_layout();
    let monday = layout.day(DayOfWeek::Mon);
    assert_eq!(monday.group_count, 2);
    assert_eq!(monday.records.len(), 3);

    let first = &monday.records[0];
    let second = &monday.records[1];
    let third = &monday.records[2];
    assert_eq!(first.entry.course_title, "Algebra");
    assert!(approx(first.top_px, 540.0) && approx(first.height_px, 60.0));
    assert!(approx(first.left_percent, 0.0) && approx(first.width_percent, 49.75));
    assert_eq!(second.entry.course_title, "Biology");
    assert!(approx(second.top_px, 570.0));
    assert!(approx(second.left_percent, 50.0) && approx(second.width_percent, 49.75));
    assert!(approx(third.top_px, 660.0));
    assert!(approx(third.left_percent, 0.0) && approx(third.width_percent, 100.0));
    assert_eq!(layout.record_count(), 3);
}

#[test]
fn five_overlaps_wrap_into_three_columns() {
    let dir = make_temp_dir("engine");
    let mut ctx = build_context(&dir, MemoryStore::new());
    let course = ctx.create_course("Seminar", None).unwrap();
    let drafts: Vec<ScheduleDraft> = (0..5)
        .map(|i| ScheduleDraft::new(3, format!("09:{:02}", i * 5), "11:00"))
        .collect();
    ctx.save_course_schedules(course.id, &drafts).unwrap();

    let layout = ctx.week_layout();
    let records = &layout.day(DayOfWeek::Wed).records;
    let columns: Vec<usize> = records.iter().map(|r| r.column).collect();
    let layers: Vec<usize> = records.iter().map(|r| r.z_offset).collect();
    assert_eq!(columns, vec![0, 1, 2, 0, 1]);
    assert_eq!(layers, vec![0, 0, 0, 1, 1]);
    let expected_width = (100.0 - 0.5) / 3.0;
    assert!(records.iter().all(|r| approx(r.width_percent, expected_width)));
    assert!(approx(records[4].left_percent, 100.0 / 3.0));
}

#[test]
fn deleting_a_course_clears_its_meetings_from_the_week() {
    let dir = make_temp_dir("engine");
    let mut ctx = build_context(&dir, MemoryStore::new());
    let course = ctx.create_course("History", None).unwrap();
    ctx.save_course_schedules(
        course.id,
        &[
            ScheduleDraft::new(2, "13:00", "14:00"),
            ScheduleDraft::new(4, "13:00", "14:00"),
        ],
    )
    .unwrap();
    assert_eq!(ctx.week_layout().record_count(), 2);

    assert!(ctx.delete_course(course.id).unwrap());
    assert_eq!(ctx.week_layout().record_count(), 0);
    assert!(ctx.courses().unwrap().is_empty());
}

#[test]
fn invalid_batch_keeps_previous_meetings() {
    let dir = make_temp_dir("engine");
    let mut ctx = build_context(&dir, MemoryStore::new());
    let course = ctx.create_course("Music", None).unwrap();
    ctx.save_course_schedules(course.id, &[ScheduleDraft::new(5, "15:00", "16:00")])
        .unwrap();

    let err = ctx
        .save_course_schedules(
            course.id,
            &[
                ScheduleDraft::new(1, "09:00", "10:00"),
                ScheduleDraft::new(1, "12:00", "11:00"),
            ],
        )
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    let entries = ctx.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].day_of_week, DayOfWeek::Fri);
    assert!(ctx.take_alerts().is_empty());
}

#[test]
fn navigation_round_trip_returns_to_the_same_week() {
    let dir = make_temp_dir("engine");
    let mut ctx = build_context(&dir, MemoryStore::new());
    let start = ctx.window();
    assert_eq!(start.start(), NaiveDate::from_ymd_opt(2026, 10, 18).unwrap());

    let next = ctx.navigate(WeekStep::Forward);
    assert_eq!(next.start(), NaiveDate::from_ymd_opt(2026, 10, 25).unwrap());
    assert!(ctx.week_layout().days.iter().all(|d| !d.is_today));

    ctx.navigate(WeekStep::Back);
    assert_eq!(ctx.window(), start);
    assert!(ctx.week_layout().day(DayOfWeek::Wed).is_today);

    ctx.jump_to(NaiveDate::from_ymd_opt(2027, 1, 1).unwrap());
    assert_eq!(ctx.window().start(), NaiveDate::from_ymd_opt(2026, 12, 27).unwrap());
    assert_eq!(ctx.today(), start);
}

#[test]
fn meetings_repeat_every_week() {
    let dir = make_temp_dir("engine");
    let mut ctx = build_context(&dir, MemoryStore::new());
    let course = ctx.create_course("Drawing", None).unwrap();
    ctx.save_course_schedules(course.id, &[ScheduleDraft::new(0, "18:00", "19:30")])
        .unwrap();

    ctx.navigate_by(1).unwrap();
    let sunday = ctx.week_layout().day(DayOfWeek::Sun).clone();
    assert_eq!(sunday.date, NaiveDate::from_ymd_opt(2026, 10, 25).unwrap());
    assert_eq!(sunday.records.len(), 1);
    assert!(approx(sunday.records[0].height_px, 90.0));
    assert!(ctx.navigate_by(2).is_err());
}
