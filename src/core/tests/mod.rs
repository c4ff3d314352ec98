
use crate::core::models::{Course, ScheduleEntry, ScheduleSlot};
use crate::core::store::{CourseStore, MemoryStore, ScheduleStore};
use crate::core::types::CourseColor;
use crate::errors::{Error, Result};
use crate::logging::Logger;
use chrono::NaiveDate;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static TEST_COUNTER: AtomicUsize = AtomicUsize::new(0);

pub(super) fn temp_path(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let uniq = TEST_COUNTER.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("weekgrid-{name}-{nanos}-{uniq}"))
}

/// Logger that never touches the filesystem.
pub(super) fn quiet_logger() -> Logger {
    let logger = Logger::new();
    logger.set_file_logging_enabled(false);
    logger
}

/// Wednesday, Oct 21 2026; its week starts Sunday Oct 18.
pub(super) fn sample_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 21).unwrap()
}

/// Memory store wrapper that can be told to fail reads or to fail after N creates.
#[derive(Debug, Default)]
pub(super) struct FlakyStore {
    pub inner: MemoryStore,
    pub fail_reads: bool,
    pub creates_before_failure: Option<usize>,
}

impl FlakyStore {
    fn check_reads(&self) -> Result<()> {
        if self.fail_reads {
            Err(Error::persistence("store offline"))
        } else {
            Ok(())
        }
    }
}

impl ScheduleStore for FlakyStore {
    fn list_schedules_for_user(&self) -> Result<Vec<ScheduleEntry>> {
        self.check_reads()?;
        self.inner.list_schedules_for_user()
    }

    fn list_schedules_for_course(&self, course_id: i32) -> Result<Vec<ScheduleEntry>> {
        self.check_reads()?;
        self.inner.list_schedules_for_course(course_id)
    }

    fn create_schedule(&mut self, course_id: i32, slot: ScheduleSlot) -> Result<ScheduleEntry> {
        match self.creates_before_failure {
            Some(0) => Err(Error::persistence("disk full")),
            Some(n) => {
                self.creates_before_failure = Some(n - 1);
                self.inner.create_schedule(course_id, slot)
            }
            None => self.inner.create_schedule(course_id, slot),
        }
    }

    fn update_schedule(&mut self, id: i32, slot: ScheduleSlot) -> Result<ScheduleEntry> {
        self.inner.update_schedule(id, slot)
    }

    fn delete_all_schedules_for_course(&mut self, course_id: i32) -> Result<bool> {
        self.inner.delete_all_schedules_for_course(course_id)
    }

    fn delete_schedule(&mut self, id: i32) -> Result<bool> {
        self.inner.delete_schedule(id)
    }
}

impl CourseStore for FlakyStore {
    fn list_courses(&self) -> Result<Vec<Course>> {
        self.check_reads()?;
        self.inner.list_courses()
    }

    fn get_course(&self, id: i32) -> Result<Course> {
        self.inner.get_course(id)
    }

    fn create_course(&mut self, title: &str, color: Option<CourseColor>) -> Result<Course> {
        self.inner.create_course(title, color)
    }

    fn set_course_color(&mut self, id: i32, color: Option<CourseColor>) -> Result<()> {
        self.inner.set_course_color(id, color)
    }

    fn delete_course(&mut self, id: i32) -> Result<bool> {
        self.inner.delete_course(id)
    }
}
