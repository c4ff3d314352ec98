use weekgrid::core::models::ScheduleDraft;
use weekgrid::core::store::{CourseStore, JsonFileStore, ScheduleStore};
use weekgrid::core::types::DayOfWeek;
use weekgrid::errors::Error;

use crate::common::{build_context, make_temp_dir};

#[test]
fn json_store_survives_reopen_and_keeps_counting_ids() {
    let dir = make_temp_dir("store");
    let path = dir.join("weekgrid.json");

    {
        let store = JsonFileStore::open(&path).unwrap();
        let mut ctx = build_context(&dir, store);
        let course = ctx.create_course("Chemistry", Some("#10b981")).unwrap();
        ctx.save_course_schedules(
            course.id,
            &[
                ScheduleDraft::new(2, "10:00", "11:15"),
                ScheduleDraft::new(4, "10:00", "11:15"),
            ],
        )
        .unwrap();
    }

    let reopened = JsonFileStore::open(&path).unwrap();
    let courses = reopened.list_courses().unwrap();
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0].title, "Chemistry");
    assert_eq!(courses[0].color.as_ref().map(|c| c.as_str()), Some("#10b981"));

    let entries = reopened.list_schedules_for_user().unwrap();
    assert_eq!(entries.len(), 2);
    assert!(entries.iter().all(|e| e.course_title == "Chemistry"));

    let mut ctx = build_context(&dir, reopened);
    let next = ctx.create_course("Physics", None).unwrap();
    assert_eq!(next.id, 2);
    let saved = ctx
        .save_course_schedules(next.id, &[ScheduleDraft::new(1, "08:00", "09:00")])
        .unwrap();
    assert_eq!(saved[0].id, 3);
    assert_eq!(saved[0].day_of_week, DayOfWeek::Mon);
}

#[test]
fn missing_store_file_starts_empty_without_writing() {
    let dir = make_temp_dir("store");
    let path = dir.join("nested").join("weekgrid.json");
    let store = JsonFileStore::open(&path).unwrap();
    assert!(store.list_courses().unwrap().is_empty());
    assert!(!path.exists());
}

#[test]
fn first_mutation_creates_parent_dirs() {
    let dir = make_temp_dir("store");
    let path = dir.join("nested").join("weekgrid.json");
    let mut store = JsonFileStore::open(&path).unwrap();
    store.create_course("Art", None).unwrap();
    assert!(path.exists());
}

#[test]
fn corrupt_store_file_is_a_persistence_error() {
    let dir = make_temp_dir("store");
    let path = dir.join("weekgrid.json");
    std::fs::write(&path, "[1, 2").unwrap();
    match JsonFileStore::open(&path) {
        Err(Error::Persistence(msg)) => assert!(msg.contains("Invalid store file")),
        other => panic!("expected persistence error, got {other:?}"),
    }
}

#[test]
fn deleting_a_course_removes_its_rows_from_disk() {
    let dir = make_temp_dir("store");
    let path = dir.join("weekgrid.json");
    {
        let store = JsonFileStore::open(&path).unwrap();
        let mut ctx = build_context(&dir, store);
        let keep = ctx.create_course("Keep", None).unwrap();
        let drop = ctx.create_course("Drop", None).unwrap();
        ctx.save_course_schedules(keep.id, &[ScheduleDraft::new(1, "09:00", "10:00")])
            .unwrap();
        ctx.save_course_schedules(drop.id, &[ScheduleDraft::new(1, "09:00", "10:00")])
            .unwrap();
        assert!(ctx.delete_course(drop.id).unwrap());
    }

    let reopened = JsonFileStore::open(&path).unwrap();
    let entries = reopened.list_schedules_for_user().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].course_title, "Keep");
    assert!(reopened.list_schedules_for_course(2).unwrap().is_empty());
}
